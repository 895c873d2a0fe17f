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
use x509_parser::pem::Pem;

use crate::{
    asn1::{tag, Asn1Node, DecodeError},
    oids,
    pkcs7::{signed_data::explicit_content, Fields, SignedData},
    Error, Result,
};

/// The content carried by a [`Pkcs7Envelope`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Pkcs7Content {
    /// Decoded `SignedData`.
    SignedData(SignedData),

    /// Content of any other type, left undecoded.
    Other {
        /// Content type object identifier.
        content_type: String,

        /// The value inside the explicit `[0]` wrapper, if any.
        content: Option<Asn1Node>,
    },
}

/// The outermost PKCS #7 `ContentInfo`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pkcs7Envelope {
    content_type: String,
    content: Pkcs7Content,
}

impl Pkcs7Envelope {
    /// Decode a DER-encoded envelope.
    ///
    /// The content is decoded as [`SignedData`] when the content type says
    /// so. Bytes following the envelope are an error.
    pub fn from_der(der: impl Into<Bytes>) -> Result<Self> {
        let node = Asn1Node::from_bytes(der)?;
        let mut fields = Fields::of(&node, tag::SEQUENCE)?;

        let content_type = fields.required("contentType")?.as_object_identifier()?;
        let content = explicit_content(fields.context_tagged(0))?;

        let content = match (content_type.as_str(), content) {
            (oids::SIGNED_DATA, Some(content)) => {
                Pkcs7Content::SignedData(SignedData::try_from(&content)?)
            }
            (oids::SIGNED_DATA, None) => return Err(DecodeError::MissingField("content").into()),
            (_, content) => Pkcs7Content::Other {
                content_type: content_type.clone(),
                content,
            },
        };

        log::debug!("decoded PKCS #7 envelope with content type {content_type}");

        Ok(Self {
            content_type,
            content,
        })
    }

    /// Decode the first `PKCS7` or `CMS` block of a PEM buffer.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        for maybe_pem in Pem::iter_from_buffer(pem) {
            let pem = maybe_pem.map_err(|e| Error::InvalidPem(e.to_string()))?;
            if pem.label == "PKCS7" || pem.label == "CMS" {
                return Self::from_der(pem.contents);
            }

            log::debug!("skipping PEM block labeled {}", pem.label);
        }

        Err(Error::InvalidPem("no PKCS7 or CMS block found".to_owned()))
    }

    /// Content type object identifier.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The decoded content.
    pub fn content(&self) -> &Pkcs7Content {
        &self.content
    }
}
