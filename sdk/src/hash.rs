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

//! Digest algorithms and the hashing capability used during verification.

use std::fmt;

use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::{oids, Error, Result};

/// Digest algorithms that may be named by a `SignerInfo` or implied by a
/// certificate's signature algorithm.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(non_camel_case_types)]
pub enum DigestAlgorithm {
    /// SHA-1
    Sha1,

    /// SHA-224
    Sha224,

    /// SHA-256
    Sha256,

    /// SHA-384
    Sha384,

    /// SHA-512
    Sha512,

    /// SHA-512/224
    Sha512_224,

    /// SHA-512/256
    Sha512_256,
}

impl DigestAlgorithm {
    /// Look up a digest algorithm by its object identifier.
    pub fn from_oid(oid: &str) -> Option<Self> {
        match oid {
            oids::SHA1 => Some(Self::Sha1),
            oids::SHA224 => Some(Self::Sha224),
            oids::SHA256 => Some(Self::Sha256),
            oids::SHA384 => Some(Self::Sha384),
            oids::SHA512 => Some(Self::Sha512),
            oids::SHA512_224 => Some(Self::Sha512_224),
            oids::SHA512_256 => Some(Self::Sha512_256),
            _ => None,
        }
    }

    /// Like [`from_oid`](Self::from_oid), but an unknown identifier is an
    /// [`Error::UnsupportedAlgorithm`].
    pub fn try_from_oid(oid: &str) -> Result<Self> {
        Self::from_oid(oid).ok_or_else(|| Error::UnsupportedAlgorithm(oid.to_owned()))
    }

    /// Return the digest used by a certificate signature algorithm such as
    /// `sha256WithRSAEncryption` or `ecdsa-with-SHA384`.
    ///
    /// Ed25519 signs the message itself; SHA-512 is returned because it is
    /// the hash the scheme uses internally.
    pub fn from_signature_algorithm_oid(oid: &str) -> Result<Self> {
        match oid {
            oids::SHA1_WITH_RSA_ENCRYPTION | oids::ECDSA_WITH_SHA1 => Ok(Self::Sha1),
            oids::SHA224_WITH_RSA_ENCRYPTION | oids::ECDSA_WITH_SHA224 => Ok(Self::Sha224),
            oids::SHA256_WITH_RSA_ENCRYPTION | oids::ECDSA_WITH_SHA256 => Ok(Self::Sha256),
            oids::SHA384_WITH_RSA_ENCRYPTION | oids::ECDSA_WITH_SHA384 => Ok(Self::Sha384),
            oids::SHA512_WITH_RSA_ENCRYPTION | oids::ECDSA_WITH_SHA512 | oids::ED25519 => {
                Ok(Self::Sha512)
            }
            _ => Err(Error::UnsupportedAlgorithm(oid.to_owned())),
        }
    }

    /// Object identifier of this algorithm.
    pub fn oid(&self) -> &'static str {
        match self {
            Self::Sha1 => oids::SHA1,
            Self::Sha224 => oids::SHA224,
            Self::Sha256 => oids::SHA256,
            Self::Sha384 => oids::SHA384,
            Self::Sha512 => oids::SHA512,
            Self::Sha512_224 => oids::SHA512_224,
            Self::Sha512_256 => oids::SHA512_256,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha512_224 => "SHA-512/224",
            Self::Sha512_256 => "SHA-512/256",
        })
    }
}

/// A `DataHasher` computes message digests for the verifier.
///
/// The default implementation is [`NativeHasher`]. Another implementation
/// can be supplied to route hashing through a platform library.
pub trait DataHasher: Send + Sync {
    /// Return the digest of `data` using `alg`.
    fn digest(&self, alg: DigestAlgorithm, data: &[u8]) -> Vec<u8>;
}

/// [`DataHasher`] implemented with the pure Rust `sha1` and `sha2` crates.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeHasher;

impl DataHasher for NativeHasher {
    fn digest(&self, alg: DigestAlgorithm, data: &[u8]) -> Vec<u8> {
        match alg {
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            DigestAlgorithm::Sha512_224 => Sha512_224::digest(data).to_vec(),
            DigestAlgorithm::Sha512_256 => Sha512_256::digest(data).to_vec(),
        }
    }
}
