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

use thiserror::Error;

use crate::{asn1::DecodeError, raw_signature::RawSignatureValidationError};

/// `Error` enumerates the conditions under which a signature could not be
/// evaluated at all.
///
/// A signature that was evaluated and found wanting is **not** an `Error`;
/// it is reported as a [`VerificationResult`] with [`ResultCode::Fail`].
///
/// [`VerificationResult`]: crate::VerificationResult
/// [`ResultCode::Fail`]: crate::ResultCode::Fail
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input is not well-formed DER, or does not have the expected
    /// PKCS #7 / X.509 shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// No content verifier is registered for the envelope's content type.
    #[error("Could not find verifier for given envelope content {0}")]
    UnsupportedContentType(String),

    /// A digest or signature algorithm is not supported.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A subject selector could not be parsed.
    #[error("invalid subject selector: {0}")]
    InvalidSelector(String),

    /// The signature capability could not evaluate a signature.
    #[error(transparent)]
    SignatureValidation(#[from] RawSignatureValidationError),

    /// PEM input could not be read.
    #[error("invalid PEM: {0}")]
    InvalidPem(String),

    /// The verifier settings are incomplete or malformed.
    #[error("invalid settings: {0}")]
    Settings(String),

    /// Base64 input could not be decoded.
    #[error(transparent)]
    Base64(#[from] ::base64::DecodeError),
}

/// A specialized `Result` type for verification operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Settings(err.to_string())
    }
}
