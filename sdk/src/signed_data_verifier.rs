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

use std::sync::Arc;

use chrono::{DateTime, Utc};
use cms_verify_policy::{FnRule, Policy, Rule, RuleNode};

use crate::{
    chain::CertificateChainVerifier,
    envelope_verifier::Pkcs7EnvelopeContentVerifier,
    hash::{DataHasher, DigestAlgorithm, NativeHasher},
    internal::time::utc_now,
    oids,
    pkcs7::{Attributes, Certificate, Pkcs7Content, SignedData, SignerInfo, SubjectSelector},
    raw_signature::{default_signature_verifier, SignatureVerifier},
    settings::VerifierSettings,
    Error, Result, VerificationResult,
};

/// Names of the checks reported in a `SignedData` verification result.
pub mod rule_names {
    /// The aggregate result for a whole `SignedData`.
    pub const SIGNED_DATA_VERIFICATION: &str = "SignedDataVerification";

    /// The aggregate result for one signer.
    pub const SIGNER_VERIFICATION: &str = "SignerVerification";

    /// Reported when a `SignedData` has no signers at all.
    pub const SIGNER_INFO_EXISTENCE: &str = "SignerInfoExistence";

    /// The signer has authenticated attributes.
    pub const AUTHENTICATED_ATTRIBUTES_EXISTENCE: &str = "AuthenticatedAttributesExistence";

    /// The authenticated attributes include a content type.
    pub const CONTENT_TYPE_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE: &str =
        "ContentTypeInAuthenticatedAttributesExistence";

    /// The authenticated attributes include a message digest.
    pub const MESSAGE_DIGEST_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE: &str =
        "MessageDigestInAuthenticatedAttributesExistence";

    /// The message digest matches the signed content.
    pub const MESSAGE_DIGEST_VERIFICATION: &str = "MessageDigestVerification";

    /// The envelope carries a certificate with the signer's serial number.
    pub const SIGNER_INFO_CERTIFICATE_EXISTENCE: &str = "SignerInfoCertificateExistence";

    /// That certificate has the signer's issuer.
    pub const SIGNER_INFO_ISSUER_MATCHES_CERTIFICATE_ISSUER: &str =
        "SignerInfoIssuerMatchesCertificateIssuer";

    /// The certificate subject matches the configured selectors.
    pub const CERTIFICATE_SUBJECT_CONTAINS_SELECTOR: &str = "CertificateSubjectContainsSelector";

    /// The certificate is valid at the signing time.
    pub const CERTIFICATE_IS_VALID_AT_GIVEN_TIME: &str = "CertificateIsValidAtGivenTime";

    /// The certificate chains to a trust anchor.
    pub const CERTIFICATE_CHAIN_VERIFICATION: &str = "CertificateChainVerification";

    /// The signature over the authenticated attributes verifies.
    pub const SIGNER_INFO_SIGNATURE_VERIFICATION: &str = "SignerInfoSignatureVerification";
}

use rule_names::*;

/// Verifies every signer of a PKCS #7 `SignedData`.
///
/// Each signer is checked by a fixed sequence of rules (see
/// [`rule_names`]). The first rule that does not pass ends the sequence for
/// that signer, and the first signer that does not pass ends the
/// verification.
#[derive(Clone)]
pub struct SignedDataVerifier {
    chain_verifier: CertificateChainVerifier,
    selectors: Vec<SubjectSelector>,
    hasher: Arc<dyn DataHasher>,
    signature_verifier: Arc<dyn SignatureVerifier>,
}

impl SignedDataVerifier {
    /// Create a verifier that trusts `trust_anchors` and requires signing
    /// certificates to match `subject_selector` (for example
    /// `"CN=signer.example.com"`; empty for no constraint).
    pub fn new(
        trust_anchors: Vec<Certificate>,
        subject_selector: &str,
        hasher: Arc<dyn DataHasher>,
        signature_verifier: Arc<dyn SignatureVerifier>,
    ) -> Result<Self> {
        Ok(Self {
            chain_verifier: CertificateChainVerifier::new(
                trust_anchors,
                signature_verifier.clone(),
            ),
            selectors: SubjectSelector::parse_list(subject_selector)?,
            hasher,
            signature_verifier,
        })
    }

    /// Create a verifier from settings, using the native hasher and the
    /// default signature verifier.
    pub fn from_settings(settings: &VerifierSettings) -> Result<Self> {
        Self::new(
            settings.trust_anchor_certificates()?,
            &settings.subject_selector,
            Arc::new(NativeHasher),
            default_signature_verifier(),
        )
    }

    /// Configured subject selectors.
    pub fn selectors(&self) -> &[SubjectSelector] {
        &self.selectors
    }

    /// Verify `signed_data`.
    ///
    /// `signed_bytes` is the detached content. When it is `None` the content
    /// encapsulated in `signed_data` is used.
    pub fn verify_signed_data(
        &self,
        signed_data: &SignedData,
        signed_bytes: Option<&[u8]>,
    ) -> Result<VerificationResult<String>> {
        if signed_data.signer_infos.is_empty() {
            return Ok(VerificationResult::from_results(
                SIGNED_DATA_VERIFICATION,
                vec![VerificationResult::fail(
                    SIGNER_INFO_EXISTENCE,
                    "Signed data does not have any signer info".to_owned(),
                )],
            ));
        }

        let signed_bytes = signed_bytes.or_else(|| signed_data.content_info.content_bytes());
        let policy = signer_policy();
        let mut results = vec![];

        for signer_info in &signed_data.signer_infos {
            let context = SignerContext {
                verifier: self,
                signed_data,
                signer_info,
                signed_bytes,
            };

            let result = policy.verify(&context)?;
            log::info!(
                "signer {} #{}: {}",
                signer_info.issuer_and_serial_number.issuer,
                signer_info.issuer_and_serial_number.serial_number,
                result.result_code()
            );

            let passed = result.is_ok();
            results.push(result);
            if !passed {
                break;
            }
        }

        Ok(VerificationResult::from_results(
            SIGNED_DATA_VERIFICATION,
            results,
        ))
    }
}

impl Pkcs7EnvelopeContentVerifier for SignedDataVerifier {
    fn verify(
        &self,
        content: &Pkcs7Content,
        signed_bytes: Option<&[u8]>,
    ) -> Result<VerificationResult<String>> {
        match content {
            Pkcs7Content::SignedData(signed_data) => {
                self.verify_signed_data(signed_data, signed_bytes)
            }
            Pkcs7Content::Other { content_type, .. } => {
                Err(Error::UnsupportedContentType(content_type.clone()))
            }
        }
    }
}

/// Everything a rule may look at while checking one signer.
struct SignerContext<'a> {
    verifier: &'a SignedDataVerifier,
    signed_data: &'a SignedData,
    signer_info: &'a SignerInfo,
    signed_bytes: Option<&'a [u8]>,
}

impl<'a> SignerContext<'a> {
    fn authenticated_attributes(&self) -> Option<&'a Attributes> {
        self.signer_info.authenticated_attributes.as_ref()
    }

    // Envelope certificates carrying the signer's serial number.
    fn signer_certificates(&self) -> Vec<&'a Certificate> {
        self.signed_data
            .certificates_with_serial(&self.signer_info.issuer_and_serial_number.serial_number)
            .collect()
    }

    fn digest_algorithm(&self) -> Result<DigestAlgorithm> {
        DigestAlgorithm::try_from_oid(&self.signer_info.digest_algorithm.algorithm)
    }
}

type SignerRuleNode<'a> = RuleNode<SignerContext<'a>, String, Error>;
type SignerCheck = for<'c> fn(&SignerContext<'c>) -> Result<VerificationResult<String>>;

fn node<'a>(name: &'static str, check: SignerCheck) -> SignerRuleNode<'a> {
    SignerRuleNode::new(FnRule::new(name, check))
}

fn signer_policy<'a>() -> Policy<SignerContext<'a>, String, Error> {
    let signature = node(
        SIGNER_INFO_SIGNATURE_VERIFICATION,
        signer_info_signature_verification,
    );
    let chain = node(CERTIFICATE_CHAIN_VERIFICATION, certificate_chain_verification)
        .on_success(signature);
    let validity = Arc::new(
        node(
            CERTIFICATE_IS_VALID_AT_GIVEN_TIME,
            certificate_is_valid_at_given_time,
        )
        .on_success(chain),
    );

    // NA means no selector is configured.
    let selector = node(
        CERTIFICATE_SUBJECT_CONTAINS_SELECTOR,
        certificate_subject_contains_selector,
    )
    .on_success(validity.clone())
    .on_na(validity);

    let issuer = node(
        SIGNER_INFO_ISSUER_MATCHES_CERTIFICATE_ISSUER,
        signer_info_issuer_matches_certificate_issuer,
    )
    .on_success(selector);
    let certificate = node(
        SIGNER_INFO_CERTIFICATE_EXISTENCE,
        signer_info_certificate_existence,
    )
    .on_success(issuer);
    let digest = node(MESSAGE_DIGEST_VERIFICATION, message_digest_verification)
        .on_success(certificate);
    let digest_attr = node(
        MESSAGE_DIGEST_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE,
        message_digest_in_authenticated_attributes_existence,
    )
    .on_success(digest);
    let content_type_attr = node(
        CONTENT_TYPE_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE,
        content_type_in_authenticated_attributes_existence,
    )
    .on_success(digest_attr);
    let attributes = node(
        AUTHENTICATED_ATTRIBUTES_EXISTENCE,
        authenticated_attributes_existence,
    )
    .on_success(content_type_attr);

    Policy::with_name(SIGNER_VERIFICATION, attributes)
}

fn authenticated_attributes_existence(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    Ok(match context.authenticated_attributes() {
        Some(_) => VerificationResult::ok(AUTHENTICATED_ATTRIBUTES_EXISTENCE),
        None => VerificationResult::fail(
            AUTHENTICATED_ATTRIBUTES_EXISTENCE,
            "Authenticated attributes are missing".to_owned(),
        ),
    })
}

fn content_type_in_authenticated_attributes_existence(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    let present = context
        .authenticated_attributes()
        .is_some_and(|attributes| attributes.contains(oids::CONTENT_TYPE));

    Ok(if present {
        VerificationResult::ok(CONTENT_TYPE_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE)
    } else {
        VerificationResult::fail(
            CONTENT_TYPE_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE,
            "Content type is missing from authenticated attributes".to_owned(),
        )
    })
}

fn message_digest_in_authenticated_attributes_existence(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    let present = context
        .authenticated_attributes()
        .is_some_and(|attributes| attributes.contains(oids::MESSAGE_DIGEST));

    Ok(if present {
        VerificationResult::ok(MESSAGE_DIGEST_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE)
    } else {
        VerificationResult::fail(
            MESSAGE_DIGEST_IN_AUTHENTICATED_ATTRIBUTES_EXISTENCE,
            "Message digest is missing from authenticated attributes".to_owned(),
        )
    })
}

fn message_digest_verification(context: &SignerContext<'_>) -> Result<VerificationResult<String>> {
    let Some(signed_bytes) = context.signed_bytes else {
        return Ok(VerificationResult::fail(
            MESSAGE_DIGEST_VERIFICATION,
            "Signed content is missing".to_owned(),
        ));
    };

    let digest = context
        .verifier
        .hasher
        .digest(context.digest_algorithm()?, signed_bytes);

    let mut values = context
        .authenticated_attributes()
        .into_iter()
        .flat_map(|attributes| attributes.get(oids::MESSAGE_DIGEST))
        .flat_map(|attribute| attribute.values.iter())
        .peekable();

    let mut matches = values.peek().is_some();
    for value in values {
        if value.as_octet_string()? != digest.as_slice() {
            matches = false;
        }
    }

    Ok(if matches {
        VerificationResult::ok(MESSAGE_DIGEST_VERIFICATION)
    } else {
        VerificationResult::fail(
            MESSAGE_DIGEST_VERIFICATION,
            "Message digest attribute does not match signed data digest".to_owned(),
        )
    })
}

fn signer_info_certificate_existence(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    Ok(if context.signer_certificates().is_empty() {
        VerificationResult::fail(
            SIGNER_INFO_CERTIFICATE_EXISTENCE,
            "Signer Info does not have any certificate".to_owned(),
        )
    } else {
        VerificationResult::ok(SIGNER_INFO_CERTIFICATE_EXISTENCE)
    })
}

fn signer_info_issuer_matches_certificate_issuer(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    let issuer = &context.signer_info.issuer_and_serial_number.issuer;
    let matches = context
        .signer_certificates()
        .iter()
        .all(|cert| cert.issuer() == issuer);

    Ok(if matches {
        VerificationResult::ok(SIGNER_INFO_ISSUER_MATCHES_CERTIFICATE_ISSUER)
    } else {
        VerificationResult::fail(
            SIGNER_INFO_ISSUER_MATCHES_CERTIFICATE_ISSUER,
            "Signer Info issuer did not match certificate issuer".to_owned(),
        )
    })
}

fn certificate_subject_contains_selector(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    let selectors = &context.verifier.selectors;
    if selectors.is_empty() {
        return Ok(VerificationResult::na(CERTIFICATE_SUBJECT_CONTAINS_SELECTOR));
    }

    for cert in context.signer_certificates() {
        for selector in selectors {
            if !cert.subject().contains_selector(selector)? {
                log::debug!("{} does not contain {selector}", cert.subject());

                return Ok(VerificationResult::fail(
                    CERTIFICATE_SUBJECT_CONTAINS_SELECTOR,
                    "Certificate subject did not contain selector information".to_owned(),
                ));
            }
        }
    }

    Ok(VerificationResult::ok(CERTIFICATE_SUBJECT_CONTAINS_SELECTOR))
}

fn certificate_is_valid_at_given_time(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    let signing_times = signing_times(context)?;
    let times = if signing_times.is_empty() {
        vec![utc_now()]
    } else {
        signing_times
    };

    let valid = context
        .signer_certificates()
        .iter()
        .all(|cert| times.iter().all(|time| cert.is_valid_at(*time)));

    Ok(if valid {
        VerificationResult::ok(CERTIFICATE_IS_VALID_AT_GIVEN_TIME)
    } else {
        VerificationResult::fail(
            CERTIFICATE_IS_VALID_AT_GIVEN_TIME,
            "Certificate is not valid in given signing time".to_owned(),
        )
    })
}

fn signing_times(context: &SignerContext<'_>) -> Result<Vec<DateTime<Utc>>> {
    let mut times = vec![];

    for attribute in context
        .authenticated_attributes()
        .into_iter()
        .flat_map(|attributes| attributes.get(oids::SIGNING_TIME))
    {
        for value in &attribute.values {
            times.push(value.as_time()?);
        }
    }

    Ok(times)
}

fn certificate_chain_verification(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    let chain_verifier = &context.verifier.chain_verifier;

    for cert in context.signer_certificates() {
        let result = chain_verifier.verify(cert, &context.signed_data.certificates)?;
        if !result.is_ok() {
            return Ok(result);
        }
    }

    Ok(VerificationResult::ok(CERTIFICATE_CHAIN_VERIFICATION))
}

fn signer_info_signature_verification(
    context: &SignerContext<'_>,
) -> Result<VerificationResult<String>> {
    let Some(attributes) = context.authenticated_attributes() else {
        return Ok(VerificationResult::fail(
            SIGNER_INFO_SIGNATURE_VERIFICATION,
            "Authenticated attributes are missing".to_owned(),
        ));
    };

    let alg = context.digest_algorithm()?;
    let signed_attributes = attributes.signed_bytes();
    let signature = &context.signer_info.encrypted_digest;

    for cert in context.signer_certificates() {
        let verified = context.verifier.signature_verifier.verify_signature(
            alg,
            cert.subject_public_key_info(),
            &signed_attributes,
            signature,
        )?;

        if !verified {
            return Ok(VerificationResult::fail(
                SIGNER_INFO_SIGNATURE_VERIFICATION,
                "Signer info signature verification failed".to_owned(),
            ));
        }
    }

    Ok(VerificationResult::ok(SIGNER_INFO_SIGNATURE_VERIFICATION))
}
