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

use std::fmt;

use crate::{
    asn1::{tag, Asn1Node, DecodeError},
    oids,
    pkcs7::Fields,
    Error, Result,
};

/// An X.501 `Name` (`RDNSequence`) as found in a certificate's issuer or
/// subject.
///
/// Two names are equal only if every relative distinguished name has the
/// same encoding, component by component. No case folding or string type
/// normalization is done.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RdnSequence {
    rdns: Vec<Asn1Node>,
}

impl RdnSequence {
    /// Relative distinguished names, in encoded order.
    pub fn rdns(&self) -> &[Asn1Node] {
        &self.rdns
    }

    /// Return `true` if some attribute of this name has the selector's type
    /// and exactly the selector's value.
    pub fn contains_selector(
        &self,
        selector: &SubjectSelector,
    ) -> std::result::Result<bool, DecodeError> {
        for (attr_type, value) in self.attribute_values()? {
            if attr_type == selector.attr_type && value.as_string()? == selector.value {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn attribute_values(&self) -> std::result::Result<Vec<(String, Asn1Node)>, DecodeError> {
        let mut values = vec![];

        for rdn in &self.rdns {
            for atv in rdn.children()? {
                let mut fields = Fields::of(&atv, tag::SEQUENCE)?;
                let attr_type = fields.required("type")?.as_object_identifier()?;
                let value = fields.required("value")?;
                values.push((attr_type, value));
            }
        }

        Ok(values)
    }
}

impl TryFrom<&Asn1Node> for RdnSequence {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> std::result::Result<Self, DecodeError> {
        let rdns = Fields::of(node, tag::SEQUENCE)?.rest().collect::<Vec<_>>();

        if let Some(rdn) = rdns.iter().find(|rdn| rdn.identifier() != tag::SET) {
            return Err(DecodeError::UnexpectedTag {
                expected: tag::SET,
                found: rdn.identifier(),
            });
        }

        Ok(Self { rdns })
    }
}

impl fmt::Display for RdnSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(values) = self.attribute_values() else {
            return f.write_str("<malformed name>");
        };

        for (i, (attr_type, value)) in values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            match short_name(attr_type) {
                Some(name) => write!(f, "{name}=")?,
                None => write!(f, "{attr_type}=")?,
            }

            match value.as_string() {
                Ok(text) => f.write_str(&text)?,
                Err(_) => write!(f, "#{}", hex::encode(value.bytes()))?,
            }
        }

        Ok(())
    }
}

/// One `name=value` constraint on a certificate subject.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubjectSelector {
    attr_type: &'static str,
    value: String,
}

impl SubjectSelector {
    /// Create a selector for the attribute called `name` (for example `CN`,
    /// `O` or `emailAddress`).
    pub fn new(name: &str, value: impl Into<String>) -> Result<Self> {
        let attr_type = selector_oid(name.trim())
            .ok_or_else(|| Error::InvalidSelector(format!("unknown attribute name {name:?}")))?;

        Ok(Self {
            attr_type,
            value: value.into(),
        })
    }

    /// Parse a comma separated list of `name=value` pairs such as
    /// `"CN=signer.example.com,O=Example"`.
    ///
    /// Names are matched case-insensitively. Whitespace around names and
    /// values is ignored. A blank string yields no selectors.
    pub fn parse_list(selectors: &str) -> Result<Vec<Self>> {
        if selectors.trim().is_empty() {
            return Ok(vec![]);
        }

        selectors
            .split(',')
            .map(|pair| {
                let (name, value) = pair
                    .split_once('=')
                    .ok_or_else(|| Error::InvalidSelector(format!("missing '=' in {pair:?}")))?;

                Self::new(name, value.trim())
            })
            .collect()
    }

    /// Object identifier of the attribute type this selector constrains.
    pub fn attr_type(&self) -> &str {
        self.attr_type
    }

    /// Required value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for SubjectSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match short_name(self.attr_type) {
            Some(name) => write!(f, "{name}={}", self.value),
            None => write!(f, "{}={}", self.attr_type, self.value),
        }
    }
}

fn selector_oid(name: &str) -> Option<&'static str> {
    match name.to_ascii_uppercase().as_str() {
        "CN" | "COMMONNAME" => Some(oids::COMMON_NAME),
        "C" | "COUNTRYNAME" => Some(oids::COUNTRY_NAME),
        "L" | "LOCALITYNAME" => Some(oids::LOCALITY_NAME),
        "O" | "ORGANIZATIONNAME" => Some(oids::ORGANIZATION_NAME),
        "OU" | "ORGANIZATIONALUNITNAME" => Some(oids::ORGANIZATIONAL_UNIT_NAME),
        "E" | "EMAILADDRESS" => Some(oids::EMAIL_ADDRESS),
        _ => None,
    }
}

fn short_name(attr_type: &str) -> Option<&'static str> {
    match attr_type {
        oids::COMMON_NAME => Some("CN"),
        oids::COUNTRY_NAME => Some("C"),
        oids::LOCALITY_NAME => Some("L"),
        oids::STATE_OR_PROVINCE_NAME => Some("ST"),
        oids::ORGANIZATION_NAME => Some("O"),
        oids::ORGANIZATIONAL_UNIT_NAME => Some("OU"),
        oids::EMAIL_ADDRESS => Some("E"),
        _ => None,
    }
}
