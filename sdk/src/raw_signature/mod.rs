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

//! Verification of raw signatures against a certificate's public key.
//!
//! Two back ends are available: a pure Rust one built on the RustCrypto
//! crates, and an OpenSSL one enabled with the `openssl` crate feature.

use std::sync::Arc;

use thiserror::Error;

use crate::{hash::DigestAlgorithm, pkcs7::SubjectPublicKeyInfo};

#[cfg(feature = "openssl")]
pub mod openssl;

pub mod rust_native;

/// A `SignatureVerifier` checks a signature over some data using the public
/// key found in a certificate.
pub trait SignatureVerifier: Send + Sync {
    /// Return `Ok(true)` if `signature` is a valid signature over `data`
    /// made with the private key matching `public_key`, hashing `data` with
    /// `alg` first.
    ///
    /// A signature that does not match, or that is not well-formed for the
    /// key type, yields `Ok(false)`. An `Err` means the key itself could not
    /// be used.
    fn verify_signature(
        &self,
        alg: DigestAlgorithm,
        public_key: &SubjectPublicKeyInfo,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, RawSignatureValidationError>;
}

/// Return the signature verifier selected by the crate features.
pub fn default_signature_verifier() -> Arc<dyn SignatureVerifier> {
    #[cfg(feature = "openssl")]
    {
        Arc::new(openssl::OpenSslSignatureVerifier)
    }

    #[cfg(not(feature = "openssl"))]
    {
        Arc::new(rust_native::RustNativeSignatureVerifier)
    }
}

/// Describes errors that can be identified when validating a raw signature.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum RawSignatureValidationError {
    /// An error was reported by the underlying cryptography implementation.
    #[error("an error was reported by the cryptography library: {0}")]
    CryptoLibraryError(String),

    /// An invalid public key was provided.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// The public key uses an unsupported key or curve type.
    #[error("public key uses an unsupported algorithm ({0})")]
    UnsupportedKeyAlgorithm(String),

    /// The digest algorithm can not be used with this back end.
    #[error("unsupported digest algorithm {0}")]
    UnsupportedDigestAlgorithm(DigestAlgorithm),
}

#[cfg(feature = "openssl")]
impl From<::openssl::error::ErrorStack> for RawSignatureValidationError {
    fn from(err: ::openssl::error::ErrorStack) -> Self {
        Self::CryptoLibraryError(err.to_string())
    }
}
