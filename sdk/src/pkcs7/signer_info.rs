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

use x509_parser::num_bigint::BigUint;

use crate::{
    asn1::{tag, Asn1Node, DecodeError},
    pkcs7::{AlgorithmIdentifier, Attributes, Fields, RdnSequence},
};

/// Identifies a certificate by its issuer's name and its serial number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuerAndSerialNumber {
    /// Name of the certificate issuer.
    pub issuer: RdnSequence,

    /// Certificate serial number.
    pub serial_number: BigUint,
}

impl TryFrom<&Asn1Node> for IssuerAndSerialNumber {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        Ok(Self {
            issuer: RdnSequence::try_from(&fields.required("issuer")?)?,
            serial_number: fields.required("serialNumber")?.as_integer()?,
        })
    }
}

/// Per-signer information inside a `SignedData`.
///
/// Only signers identified by `IssuerAndSerialNumber` are supported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerInfo {
    /// Syntax version.
    pub version: u32,

    /// The signer's certificate.
    pub issuer_and_serial_number: IssuerAndSerialNumber,

    /// Digest applied to the content and to the authenticated attributes.
    pub digest_algorithm: AlgorithmIdentifier,

    /// The `[0]` authenticated (signed) attributes.
    pub authenticated_attributes: Option<Attributes>,

    /// Signature algorithm.
    pub digest_encryption_algorithm: AlgorithmIdentifier,

    /// Signature value.
    pub encrypted_digest: Vec<u8>,

    /// The `[1]` unauthenticated (unsigned) attributes.
    pub unauthenticated_attributes: Option<Attributes>,
}

impl TryFrom<&Asn1Node> for SignerInfo {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let version = fields.required("version")?.as_u32()?;
        let issuer_and_serial_number =
            IssuerAndSerialNumber::try_from(&fields.required("issuerAndSerialNumber")?)?;
        let digest_algorithm = AlgorithmIdentifier::try_from(&fields.required("digestAlgorithm")?)?;

        let authenticated_attributes = fields
            .context_tagged(0)
            .map(|node| Attributes::try_from(&node))
            .transpose()?;

        let digest_encryption_algorithm =
            AlgorithmIdentifier::try_from(&fields.required("digestEncryptionAlgorithm")?)?;
        let encrypted_digest = fields
            .required("encryptedDigest")?
            .as_octet_string()?
            .to_vec();

        let unauthenticated_attributes = match fields.optional() {
            Some(node) if node.is_context_tag_number(1) => Some(Attributes::try_from(&node)?),
            Some(node) => {
                return Err(DecodeError::UnexpectedTag {
                    expected: 0xa1,
                    found: node.identifier(),
                })
            }
            None => None,
        };

        Ok(Self {
            version,
            issuer_and_serial_number,
            digest_algorithm,
            authenticated_attributes,
            digest_encryption_algorithm,
            encrypted_digest,
            unauthenticated_attributes,
        })
    }
}
