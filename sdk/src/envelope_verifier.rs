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

use std::{collections::HashMap, sync::Arc};

use bytes::Bytes;

use crate::{
    pkcs7::{Pkcs7Content, Pkcs7Envelope},
    Error, Result, VerificationResult,
};

/// A `Pkcs7EnvelopeContentVerifier` verifies the content of an envelope
/// of one particular content type.
pub trait Pkcs7EnvelopeContentVerifier: Send + Sync {
    /// Verify `content`. `signed_bytes` is the detached payload, if any.
    ///
    /// A check that does not hold is reported in the returned result; an
    /// `Err` means verification could not be attempted.
    fn verify(
        &self,
        content: &Pkcs7Content,
        signed_bytes: Option<&[u8]>,
    ) -> Result<VerificationResult<String>>;
}

/// Dispatches envelopes to a content verifier by content type.
///
/// ```
/// use cms_verify::{oids, Pkcs7EnvelopeVerifier};
///
/// let verifier = Pkcs7EnvelopeVerifier::new();
/// assert!(!verifier.supports(oids::SIGNED_DATA));
/// ```
#[derive(Clone, Default)]
pub struct Pkcs7EnvelopeVerifier {
    verifiers: HashMap<String, Arc<dyn Pkcs7EnvelopeContentVerifier>>,
}

impl Pkcs7EnvelopeVerifier {
    /// Create a dispatcher with no content verifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a dispatcher that also sends content of type `content_type`
    /// to `verifier`.
    pub fn with_verifier(
        mut self,
        content_type: impl Into<String>,
        verifier: impl Pkcs7EnvelopeContentVerifier + 'static,
    ) -> Self {
        self.verifiers.insert(content_type.into(), Arc::new(verifier));
        self
    }

    /// Return `true` if a verifier is registered for `content_type`.
    pub fn supports(&self, content_type: &str) -> bool {
        self.verifiers.contains_key(content_type)
    }

    /// Verify a decoded envelope.
    pub fn verify(
        &self,
        envelope: &Pkcs7Envelope,
        signed_bytes: Option<&[u8]>,
    ) -> Result<VerificationResult<String>> {
        let content_type = envelope.content_type();
        let verifier = self
            .verifiers
            .get(content_type)
            .ok_or_else(|| Error::UnsupportedContentType(content_type.to_owned()))?;

        log::debug!("verifying envelope content of type {content_type}");
        verifier.verify(envelope.content(), signed_bytes)
    }

    /// Decode a DER envelope and verify it.
    pub fn verify_der(
        &self,
        der: &[u8],
        signed_bytes: Option<&[u8]>,
    ) -> Result<VerificationResult<String>> {
        let envelope = Pkcs7Envelope::from_der(Bytes::copy_from_slice(der))?;
        self.verify(&envelope, signed_bytes)
    }

    /// Decode a PEM envelope (`PKCS7` or `CMS` label) and verify it.
    pub fn verify_pem(
        &self,
        pem: &[u8],
        signed_bytes: Option<&[u8]>,
    ) -> Result<VerificationResult<String>> {
        let envelope = Pkcs7Envelope::from_pem(pem)?;
        self.verify(&envelope, signed_bytes)
    }
}
