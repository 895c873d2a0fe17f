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

//! Building and verifying certificate chains up to a trust anchor.
//!
//! Chains are built as a tree: each [`ChainLink`] lists every candidate
//! issuer found in the certificate pool, and links whose issuer is not in
//! the pool end at the configured trust anchors.
//!
//! Verification walks the tree depth first and commits to the first
//! candidate issuer whose signature over the certificate checks out.
//! Other candidates are not tried if that branch later fails.

use std::sync::Arc;

use crate::{
    hash::DigestAlgorithm,
    pkcs7::Certificate,
    raw_signature::SignatureVerifier,
    rule_names::CERTIFICATE_CHAIN_VERIFICATION,
    Result, VerificationResult,
};

/// Message carried by a failed chain verification.
pub const CHAIN_VERIFICATION_FAILED: &str = "Certificate chain verification failed";

/// One certificate in a chain together with its candidate issuers.
///
/// A link with no parents is a trust anchor.
#[derive(Clone, Debug)]
pub struct ChainLink<'a> {
    certificate: &'a Certificate,
    parents: Vec<ChainLink<'a>>,
}

impl<'a> ChainLink<'a> {
    /// The certificate at this position of the chain.
    pub fn certificate(&self) -> &'a Certificate {
        self.certificate
    }

    /// Candidate issuers of this certificate.
    pub fn parents(&self) -> &[ChainLink<'a>] {
        &self.parents
    }

    /// Return `true` if this link terminates the chain.
    pub fn is_trust_anchor(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Verifies that a certificate chains to one of a set of trust anchors.
#[derive(Clone)]
pub struct CertificateChainVerifier {
    trust_anchors: Vec<Certificate>,
    signature_verifier: Arc<dyn SignatureVerifier>,
}

impl CertificateChainVerifier {
    /// Create a chain verifier for `trust_anchors`.
    pub fn new(
        trust_anchors: Vec<Certificate>,
        signature_verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        Self {
            trust_anchors,
            signature_verifier,
        }
    }

    /// The configured trust anchors.
    pub fn trust_anchors(&self) -> &[Certificate] {
        &self.trust_anchors
    }

    /// Build the tree of candidate chains from `certificate` upward.
    ///
    /// Parents are the certificates of `pool` whose subject equals
    /// `certificate`'s issuer. When there are none, the parents are the
    /// trust anchors. Each level removes the current certificate from the
    /// pool, so the tree is finite even if the pool contains cycles.
    pub fn build_chain<'a>(
        &'a self,
        certificate: &'a Certificate,
        pool: &[&'a Certificate],
    ) -> ChainLink<'a> {
        let remaining: Vec<&'a Certificate> = pool
            .iter()
            .copied()
            .filter(|candidate| candidate.der() != certificate.der())
            .collect();

        let issuers: Vec<&'a Certificate> = remaining
            .iter()
            .copied()
            .filter(|candidate| candidate.subject() == certificate.issuer())
            .collect();

        let parents = if issuers.is_empty() {
            log::debug!(
                "no issuer for {} in pool; linking to {} trust anchor(s)",
                certificate.subject(),
                self.trust_anchors.len()
            );

            self.trust_anchors
                .iter()
                .map(|anchor| ChainLink {
                    certificate: anchor,
                    parents: vec![],
                })
                .collect()
        } else {
            issuers
                .into_iter()
                .map(|issuer| self.build_chain(issuer, &remaining))
                .collect()
        };

        ChainLink {
            certificate,
            parents,
        }
    }

    /// Verify a chain built by [`build_chain`](Self::build_chain).
    ///
    /// The result is named `CertificateChainVerification`. A signature
    /// algorithm with no known digest, or a key the signature capability
    /// cannot use, is returned as an `Err`.
    pub fn verify_chain(&self, link: &ChainLink<'_>) -> Result<VerificationResult<String>> {
        // TO DO: Check revocation (CRL or OCSP) of each link.
        if self.chain_verifies(link)? {
            Ok(VerificationResult::ok(CERTIFICATE_CHAIN_VERIFICATION))
        } else {
            Ok(VerificationResult::fail(
                CERTIFICATE_CHAIN_VERIFICATION,
                CHAIN_VERIFICATION_FAILED.to_owned(),
            ))
        }
    }

    /// Build and verify the chain for `certificate` in one step.
    pub fn verify(
        &self,
        certificate: &Certificate,
        pool: &[Certificate],
    ) -> Result<VerificationResult<String>> {
        let pool: Vec<&Certificate> = pool.iter().collect();
        let chain = self.build_chain(certificate, &pool);
        self.verify_chain(&chain)
    }

    fn chain_verifies(&self, link: &ChainLink<'_>) -> Result<bool> {
        let certificate = link.certificate;
        if link.parents.is_empty() {
            return Ok(false);
        }

        let alg = DigestAlgorithm::from_signature_algorithm_oid(certificate.signature_algorithm())?;

        for parent in &link.parents {
            let signed_by_parent = self.signature_verifier.verify_signature(
                alg,
                parent.certificate.subject_public_key_info(),
                certificate.tbs_certificate_bytes(),
                certificate.signature(),
            )?;

            if signed_by_parent {
                log::debug!(
                    "{} is signed by {}",
                    certificate.subject(),
                    parent.certificate.subject()
                );

                return if parent.is_trust_anchor() {
                    Ok(true)
                } else {
                    self.chain_verifies(parent)
                };
            }
        }

        log::debug!("no candidate issuer signed {}", certificate.subject());
        Ok(false)
    }
}
