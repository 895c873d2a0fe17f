// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use bytes::Bytes;

use crate::{
    asn1::{tag, Asn1Node, DecodeError},
    pkcs7::Fields,
};

/// A single `Attribute`: a type plus a set of values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    /// Attribute type object identifier.
    pub attr_type: String,

    /// Attribute values, in encoded order, left undecoded.
    pub values: Vec<Asn1Node>,
}

impl TryFrom<&Asn1Node> for Attribute {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let attr_type = fields.required("attrType")?.as_object_identifier()?;

        let values = fields.required("attrValues")?;
        values.expect_tag(tag::SET)?;

        Ok(Self {
            attr_type,
            values: values.children()?,
        })
    }
}

/// A set of attributes as carried in a `SignerInfo`.
///
/// The complete original encoding is kept because the authenticated
/// attributes are what the signer actually signed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attributes {
    bytes: Bytes,
    attributes: Vec<Attribute>,
}

impl Attributes {
    /// All attributes, in encoded order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    /// All attributes of type `attr_type`, in encoded order.
    pub fn get<'a>(&'a self, attr_type: &'a str) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes
            .iter()
            .filter(move |attribute| attribute.attr_type == attr_type)
    }

    /// Return `true` if at least one attribute of type `attr_type` exists.
    pub fn contains(&self, attr_type: &str) -> bool {
        self.attributes
            .iter()
            .any(|attribute| attribute.attr_type == attr_type)
    }

    /// Original encoding, including the (possibly implicit) tag.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// The bytes covered by a signer's signature.
    ///
    /// Inside `SignerInfo` the authenticated attributes are tagged `[0]
    /// IMPLICIT`, but they are signed as a plain `SET OF`, so the identifier
    /// octet is replaced with the universal `SET` tag.
    pub fn signed_bytes(&self) -> Vec<u8> {
        let mut signed = self.bytes.to_vec();
        if let Some(first) = signed.first_mut() {
            *first = tag::SET;
        }
        signed
    }
}

impl TryFrom<&Asn1Node> for Attributes {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> Result<Self, DecodeError> {
        let attributes = node
            .children()?
            .iter()
            .map(Attribute::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bytes: node.bytes().clone(),
            attributes,
        })
    }
}
