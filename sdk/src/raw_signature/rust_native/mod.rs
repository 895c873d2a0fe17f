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

//! Signature verification with the pure Rust RustCrypto crates.

use ecdsa::signature::{hazmat::PrehashVerifier, Verifier};
use rsa::{pkcs8::DecodePublicKey, Pkcs1v15Sign, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::{
    hash::{DataHasher, DigestAlgorithm, NativeHasher},
    oids,
    pkcs7::SubjectPublicKeyInfo,
    raw_signature::{RawSignatureValidationError, SignatureVerifier},
};

/// [`SignatureVerifier`] for RSA (PKCS #1 v1.5), ECDSA on P-256 and P-384,
/// and Ed25519 keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustNativeSignatureVerifier;

impl SignatureVerifier for RustNativeSignatureVerifier {
    fn verify_signature(
        &self,
        alg: DigestAlgorithm,
        public_key: &SubjectPublicKeyInfo,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, RawSignatureValidationError> {
        match public_key.algorithm_oid() {
            oids::RSA_ENCRYPTION => verify_rsa(alg, public_key, data, signature),
            oids::EC_PUBLIC_KEY => verify_ecdsa(alg, public_key, data, signature),
            oids::ED25519 => verify_ed25519(public_key, data, signature),
            other => Err(RawSignatureValidationError::UnsupportedKeyAlgorithm(
                other.to_owned(),
            )),
        }
    }
}

fn verify_rsa(
    alg: DigestAlgorithm,
    public_key: &SubjectPublicKeyInfo,
    data: &[u8],
    signature: &[u8],
) -> Result<bool, RawSignatureValidationError> {
    let key = RsaPublicKey::from_public_key_der(public_key.der())
        .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

    let scheme = match alg {
        DigestAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        DigestAlgorithm::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        DigestAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        DigestAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        DigestAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        DigestAlgorithm::Sha512_224 => Pkcs1v15Sign::new::<Sha512_224>(),
        DigestAlgorithm::Sha512_256 => Pkcs1v15Sign::new::<Sha512_256>(),
    };

    let hashed = NativeHasher.digest(alg, data);

    Ok(key.verify(scheme, &hashed, signature).is_ok())
}

fn verify_ecdsa(
    alg: DigestAlgorithm,
    public_key: &SubjectPublicKeyInfo,
    data: &[u8],
    signature: &[u8],
) -> Result<bool, RawSignatureValidationError> {
    // The curve is named by the algorithm parameters.
    let curve = public_key
        .algorithm()
        .parameters
        .as_ref()
        .and_then(|params| params.as_object_identifier().ok())
        .ok_or(RawSignatureValidationError::InvalidPublicKey)?;

    // ECDSA signatures inside CMS are DER-encoded `Ecdsa-Sig-Value`s.
    let digest = NativeHasher.digest(alg, data);

    match curve.as_str() {
        oids::PRIME256V1 => {
            let vk = p256::ecdsa::VerifyingKey::from_public_key_der(public_key.der())
                .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

            let Ok(signature) = p256::ecdsa::Signature::from_der(signature) else {
                return Ok(false);
            };

            Ok(vk.verify_prehash(&digest, &signature).is_ok())
        }

        oids::SECP384R1 => {
            let vk = p384::ecdsa::VerifyingKey::from_public_key_der(public_key.der())
                .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

            let Ok(signature) = p384::ecdsa::Signature::from_der(signature) else {
                return Ok(false);
            };

            Ok(vk.verify_prehash(&digest, &signature).is_ok())
        }

        _ => Err(RawSignatureValidationError::UnsupportedKeyAlgorithm(curve)),
    }
}

// Ed25519 hashes internally, so `alg` does not apply.
fn verify_ed25519(
    public_key: &SubjectPublicKeyInfo,
    data: &[u8],
    signature: &[u8],
) -> Result<bool, RawSignatureValidationError> {
    let vk = ed25519_dalek::VerifyingKey::from_public_key_der(public_key.der())
        .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

    let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
        return Ok(false);
    };

    Ok(vk.verify(data, &signature).is_ok())
}
