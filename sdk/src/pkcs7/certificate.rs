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
use chrono::{DateTime, Utc};
use x509_parser::{num_bigint::BigUint, pem::Pem};

use crate::{
    asn1::{tag, Asn1Node, DecodeError},
    hash::DigestAlgorithm,
    pkcs7::{AlgorithmIdentifier, Fields, RdnSequence},
    raw_signature::SignatureVerifier,
    Error, Result,
};

/// An X.509 certificate.
///
/// The `TBSCertificate` encoding and the signature bits are kept exactly as
/// they appear in the input so that the certificate's own signature can be
/// checked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate {
    der: Bytes,
    tbs_certificate: TbsCertificate,
    tbs_certificate_bytes: Bytes,
    signature_algorithm: AlgorithmIdentifier,
    signature: Vec<u8>,
}

impl Certificate {
    /// Decode a DER-encoded certificate.
    pub fn from_der(der: impl Into<Bytes>) -> Result<Self> {
        Ok(Self::try_from(&Asn1Node::from_bytes(der)?)?)
    }

    /// Decode the first certificate in a PEM buffer.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        Self::from_pem_bundle(pem)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidPem("no CERTIFICATE block found".to_owned()))
    }

    /// Decode every `CERTIFICATE` block in a PEM buffer.
    ///
    /// Blocks with other labels are skipped.
    pub fn from_pem_bundle(pems: &[u8]) -> Result<Vec<Self>> {
        let mut certificates = vec![];

        for maybe_pem in Pem::iter_from_buffer(pems) {
            // NOTE: `Pem::contents` holds the already base64-decoded DER.
            let pem = maybe_pem.map_err(|e| Error::InvalidPem(e.to_string()))?;
            if pem.label == "CERTIFICATE" {
                certificates.push(Self::from_der(pem.contents)?);
            } else {
                log::debug!("skipping PEM block labeled {}", pem.label);
            }
        }

        Ok(certificates)
    }

    /// Complete DER encoding of the certificate.
    pub fn der(&self) -> &Bytes {
        &self.der
    }

    /// The decoded `TBSCertificate`.
    pub fn tbs_certificate(&self) -> &TbsCertificate {
        &self.tbs_certificate
    }

    /// Encoding of the `TBSCertificate`: the bytes covered by the issuer's
    /// signature.
    pub fn tbs_certificate_bytes(&self) -> &[u8] {
        &self.tbs_certificate_bytes
    }

    /// The issuer's signature algorithm object identifier.
    pub fn signature_algorithm(&self) -> &str {
        &self.signature_algorithm.algorithm
    }

    /// The issuer's signature value.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Certificate serial number.
    pub fn serial_number(&self) -> &BigUint {
        &self.tbs_certificate.serial_number
    }

    /// Name of the certificate issuer.
    pub fn issuer(&self) -> &RdnSequence {
        &self.tbs_certificate.issuer
    }

    /// Name of the certificate subject.
    pub fn subject(&self) -> &RdnSequence {
        &self.tbs_certificate.subject
    }

    /// The subject's public key.
    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.tbs_certificate.subject_public_key_info
    }

    /// Return `true` if `time` lies within the validity period, bounds
    /// included.
    pub fn is_valid_at(&self, time: DateTime<Utc>) -> bool {
        self.tbs_certificate.validity.contains(time)
    }

    /// Same as [`is_valid_at`](Self::is_valid_at) for a time given in
    /// seconds since the Unix epoch.
    pub fn is_valid_during(&self, unix_seconds: i64) -> bool {
        DateTime::<Utc>::from_timestamp(unix_seconds, 0)
            .is_some_and(|time| self.is_valid_at(time))
    }

    /// Verify `signature` over `data` with this certificate's public key.
    ///
    /// The digest is the one implied by the certificate's own signature
    /// algorithm.
    pub fn verify_data(
        &self,
        data: &[u8],
        signature: &[u8],
        verifier: &dyn SignatureVerifier,
    ) -> Result<bool> {
        let alg = DigestAlgorithm::from_signature_algorithm_oid(self.signature_algorithm())?;

        Ok(verifier.verify_signature(alg, self.subject_public_key_info(), data, signature)?)
    }
}

impl TryFrom<&Asn1Node> for Certificate {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> std::result::Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let tbs = fields.required("tbsCertificate")?;
        let signature_algorithm =
            AlgorithmIdentifier::try_from(&fields.required("signatureAlgorithm")?)?;
        let signature = fields.required("signatureValue")?.as_bit_string()?;

        Ok(Self {
            der: node.bytes().clone(),
            tbs_certificate: TbsCertificate::try_from(&tbs)?,
            tbs_certificate_bytes: tbs.bytes().clone(),
            signature_algorithm,
            signature,
        })
    }
}

/// The signed portion of a certificate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TbsCertificate {
    /// Raw version number (0 for v1, 2 for v3).
    pub version: u32,

    /// Serial number.
    pub serial_number: BigUint,

    /// Signature algorithm, repeated inside the signed portion.
    pub signature: AlgorithmIdentifier,

    /// Issuer name.
    pub issuer: RdnSequence,

    /// Validity period.
    pub validity: Validity,

    /// Subject name.
    pub subject: RdnSequence,

    /// Subject public key.
    pub subject_public_key_info: SubjectPublicKeyInfo,

    /// The `[3]` extensions field, left undecoded.
    pub extensions: Option<Asn1Node>,
}

impl TryFrom<&Asn1Node> for TbsCertificate {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> std::result::Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let version = match fields.context_tagged(0) {
            Some(explicit) => explicit
                .children()?
                .first()
                .ok_or(DecodeError::MissingField("version"))?
                .as_u32()?,
            None => 0,
        };

        let serial_number = fields.required("serialNumber")?.as_integer()?;
        let signature = AlgorithmIdentifier::try_from(&fields.required("signature")?)?;
        let issuer = RdnSequence::try_from(&fields.required("issuer")?)?;
        let validity = Validity::try_from(&fields.required("validity")?)?;
        let subject = RdnSequence::try_from(&fields.required("subject")?)?;
        let subject_public_key_info =
            SubjectPublicKeyInfo::try_from(&fields.required("subjectPublicKeyInfo")?)?;

        // issuerUniqueID [1] and subjectUniqueID [2] are implicit primitives
        // and are skipped here.
        let extensions = fields.rest().find(|field| field.is_context_tag_number(3));

        Ok(Self {
            version,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            extensions,
        })
    }
}

/// A certificate's validity period.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Validity {
    /// Start of the validity period.
    pub not_before: DateTime<Utc>,

    /// End of the validity period.
    pub not_after: DateTime<Utc>,
}

impl Validity {
    /// Return `true` if `time` is within the period, bounds included.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.not_before <= time && time <= self.not_after
    }
}

impl TryFrom<&Asn1Node> for Validity {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> std::result::Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        Ok(Self {
            not_before: fields.required("notBefore")?.as_time()?,
            not_after: fields.required("notAfter")?.as_time()?,
        })
    }
}

/// A `SubjectPublicKeyInfo`.
///
/// The complete encoding is kept because signature back ends take the key
/// in this form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubjectPublicKeyInfo {
    der: Bytes,
    algorithm: AlgorithmIdentifier,
    subject_public_key: Vec<u8>,
}

impl SubjectPublicKeyInfo {
    /// Complete DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Key algorithm.
    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    /// Object identifier of the key algorithm.
    pub fn algorithm_oid(&self) -> &str {
        &self.algorithm.algorithm
    }

    /// The key bits.
    pub fn subject_public_key(&self) -> &[u8] {
        &self.subject_public_key
    }
}

impl TryFrom<&Asn1Node> for SubjectPublicKeyInfo {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> std::result::Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let algorithm = AlgorithmIdentifier::try_from(&fields.required("algorithm")?)?;
        let subject_public_key = fields.required("subjectPublicKey")?.as_bit_string()?;

        Ok(Self {
            der: node.bytes().clone(),
            algorithm,
            subject_public_key,
        })
    }
}
