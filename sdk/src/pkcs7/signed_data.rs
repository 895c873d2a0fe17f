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

use crate::{
    asn1::{tag, Asn1Node, DecodeError},
    oids,
    pkcs7::{AlgorithmIdentifier, Certificate, Fields, SignerInfo},
};

/// A `ContentInfo`: a content type plus optional content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContentInfo {
    /// Content type object identifier.
    pub content_type: String,

    /// The value inside the explicit `[0]` wrapper, if any.
    pub content: Option<Asn1Node>,
}

impl ContentInfo {
    /// Return the content octets when the content is `data` carried as an
    /// `OCTET STRING`.
    ///
    /// Detached signatures have no content and yield `None`.
    pub fn content_bytes(&self) -> Option<&[u8]> {
        if self.content_type != oids::DATA {
            return None;
        }

        self.content
            .as_ref()
            .and_then(|content| content.as_octet_string().ok())
    }
}

impl TryFrom<&Asn1Node> for ContentInfo {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let content_type = fields.required("contentType")?.as_object_identifier()?;
        let content = explicit_content(fields.context_tagged(0))?;

        Ok(Self {
            content_type,
            content,
        })
    }
}

/// Unwrap an explicit `[0]` wrapper, which must hold exactly one value.
pub(crate) fn explicit_content(
    wrapper: Option<Asn1Node>,
) -> Result<Option<Asn1Node>, DecodeError> {
    let Some(wrapper) = wrapper else {
        return Ok(None);
    };

    let mut children = wrapper.children()?.into_iter();
    let content = children.next().ok_or(DecodeError::MissingField("content"))?;
    if children.next().is_some() {
        return Err(DecodeError::TooManyBytes);
    }

    Ok(Some(content))
}

/// PKCS #7 `SignedData`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignedData {
    /// Syntax version.
    pub version: u32,

    /// Digest algorithms used by the signers.
    pub digest_algorithms: Vec<AlgorithmIdentifier>,

    /// The signed content, absent for detached signatures.
    pub content_info: ContentInfo,

    /// Certificates carried in the `[0]` field, in encoded order.
    pub certificates: Vec<Certificate>,

    /// The `[1]` CRLs field, left undecoded.
    pub crls: Option<Asn1Node>,

    /// One entry per signer.
    pub signer_infos: Vec<SignerInfo>,
}

impl SignedData {
    /// Return every certificate whose serial number equals `serial_number`,
    /// in encoded order.
    pub fn certificates_with_serial<'a>(
        &'a self,
        serial_number: &'a x509_parser::num_bigint::BigUint,
    ) -> impl Iterator<Item = &'a Certificate> + 'a {
        self.certificates
            .iter()
            .filter(move |cert| cert.serial_number() == serial_number)
    }
}

impl TryFrom<&Asn1Node> for SignedData {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let version = fields.required("version")?.as_u32()?;

        let digest_algorithms = fields.required("digestAlgorithms")?;
        digest_algorithms.expect_tag(tag::SET)?;
        let digest_algorithms = digest_algorithms
            .children()?
            .iter()
            .map(AlgorithmIdentifier::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let content_info = ContentInfo::try_from(&fields.required("contentInfo")?)?;

        let certificates = match fields.context_tagged(0) {
            Some(certs) => decode_certificates(&certs)?,
            None => vec![],
        };

        let crls = fields.context_tagged(1);

        let signer_infos = fields.required("signerInfos")?;
        signer_infos.expect_tag(tag::SET)?;
        let signer_infos = signer_infos
            .children()?
            .iter()
            .map(SignerInfo::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version,
            digest_algorithms,
            content_info,
            certificates,
            crls,
            signer_infos,
        })
    }
}

// The certificate set may also hold extended or attribute certificates,
// which carry other tags. Only plain X.509 certificates are kept.
fn decode_certificates(node: &Asn1Node) -> Result<Vec<Certificate>, DecodeError> {
    let mut certificates = vec![];

    for choice in node.children()? {
        if choice.identifier() == tag::SEQUENCE {
            certificates.push(Certificate::try_from(&choice)?);
        } else {
            log::warn!(
                "skipping certificate choice with tag {:#04x}",
                choice.identifier()
            );
        }
    }

    Ok(certificates)
}
