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

//! Signature verification with OpenSSL.

use openssl::{hash::MessageDigest, pkey::PKey, sign::Verifier};

use crate::{
    hash::DigestAlgorithm,
    oids,
    pkcs7::SubjectPublicKeyInfo,
    raw_signature::{RawSignatureValidationError, SignatureVerifier},
};

/// [`SignatureVerifier`] backed by OpenSSL.
///
/// SHA-512/224 and SHA-512/256 are not available through this back end.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenSslSignatureVerifier;

impl SignatureVerifier for OpenSslSignatureVerifier {
    fn verify_signature(
        &self,
        alg: DigestAlgorithm,
        public_key: &SubjectPublicKeyInfo,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, RawSignatureValidationError> {
        let key_alg = public_key.algorithm_oid();
        if ![oids::RSA_ENCRYPTION, oids::EC_PUBLIC_KEY, oids::ED25519].contains(&key_alg) {
            return Err(RawSignatureValidationError::UnsupportedKeyAlgorithm(
                key_alg.to_owned(),
            ));
        }

        let pkey = PKey::public_key_from_der(public_key.der())
            .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

        let mut verifier = if key_alg == oids::ED25519 {
            Verifier::new_without_digest(&pkey)?
        } else {
            Verifier::new(message_digest(alg)?, &pkey)?
        };

        // OpenSSL reports a malformed signature as an error; it still just
        // means the signature does not verify.
        Ok(verifier.verify_oneshot(signature, data).unwrap_or(false))
    }
}

fn message_digest(alg: DigestAlgorithm) -> Result<MessageDigest, RawSignatureValidationError> {
    match alg {
        DigestAlgorithm::Sha1 => Ok(MessageDigest::sha1()),
        DigestAlgorithm::Sha224 => Ok(MessageDigest::sha224()),
        DigestAlgorithm::Sha256 => Ok(MessageDigest::sha256()),
        DigestAlgorithm::Sha384 => Ok(MessageDigest::sha384()),
        DigestAlgorithm::Sha512 => Ok(MessageDigest::sha512()),
        DigestAlgorithm::Sha512_224 | DigestAlgorithm::Sha512_256 => {
            Err(RawSignatureValidationError::UnsupportedDigestAlgorithm(alg))
        }
    }
}
