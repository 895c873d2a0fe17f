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

use crate::{
    asn1::Asn1Node,
    hash::DigestAlgorithm,
    pkcs7::{Pkcs7Content, Pkcs7Envelope, SignerInfo, SubjectPublicKeyInfo},
    raw_signature::{
        default_signature_verifier, rust_native::RustNativeSignatureVerifier,
        RawSignatureValidationError, SignatureVerifier,
    },
    tests::fixture_certificate,
};

fn first_signer(der: &'static [u8]) -> SignerInfo {
    let envelope = Pkcs7Envelope::from_der(der).unwrap();
    let Pkcs7Content::SignedData(signed_data) = envelope.content() else {
        panic!("not signed data");
    };
    signed_data.signer_infos[0].clone()
}

fn spki(der: &[u8]) -> SubjectPublicKeyInfo {
    SubjectPublicKeyInfo::try_from(&Asn1Node::from_bytes(der.to_vec()).unwrap()).unwrap()
}

#[test]
fn rsa() {
    let signer = fixture_certificate(include_bytes!("../../tests/fixtures/signer.der"));
    let signer_info = first_signer(include_bytes!("../../tests/fixtures/detached.p7s"));
    let data = signer_info.authenticated_attributes.unwrap().signed_bytes();

    let verifier = RustNativeSignatureVerifier;
    let key = signer.subject_public_key_info();

    assert!(verifier
        .verify_signature(DigestAlgorithm::Sha256, key, &data, &signer_info.encrypted_digest)
        .unwrap());

    assert!(!verifier
        .verify_signature(DigestAlgorithm::Sha384, key, &data, &signer_info.encrypted_digest)
        .unwrap());

    let mut signature = signer_info.encrypted_digest.clone();
    signature[10] ^= 0x01;
    assert!(!verifier
        .verify_signature(DigestAlgorithm::Sha256, key, &data, &signature)
        .unwrap());

    assert!(!verifier
        .verify_signature(DigestAlgorithm::Sha256, key, &data, &[])
        .unwrap());
}

#[test]
fn ecdsa_p256() {
    let signer = fixture_certificate(include_bytes!("../../tests/fixtures/ec.der"));
    let signer_info = first_signer(include_bytes!("../../tests/fixtures/ec_detached.p7s"));
    let data = signer_info.authenticated_attributes.unwrap().signed_bytes();

    let verifier = RustNativeSignatureVerifier;
    let key = signer.subject_public_key_info();

    assert!(verifier
        .verify_signature(DigestAlgorithm::Sha384, key, &data, &signer_info.encrypted_digest)
        .unwrap());

    assert!(!verifier
        .verify_signature(
            DigestAlgorithm::Sha384,
            key,
            b"other data",
            &signer_info.encrypted_digest
        )
        .unwrap());

    // Not a DER `Ecdsa-Sig-Value`.
    assert!(!verifier
        .verify_signature(DigestAlgorithm::Sha384, key, &data, &[0x01, 0x02])
        .unwrap());
}

#[test]
fn default_verifier() {
    let signer = fixture_certificate(include_bytes!("../../tests/fixtures/signer.der"));
    let signer_info = first_signer(include_bytes!("../../tests/fixtures/detached.p7s"));
    let data = signer_info.authenticated_attributes.unwrap().signed_bytes();

    assert!(default_signature_verifier()
        .verify_signature(
            DigestAlgorithm::Sha256,
            signer.subject_public_key_info(),
            &data,
            &signer_info.encrypted_digest
        )
        .unwrap());
}

#[test]
fn unsupported_key_algorithm() {
    // SubjectPublicKeyInfo { { 1.2.3 }, '00'H }
    let key = spki(&[
        0x30, 0x0a, 0x30, 0x04, 0x06, 0x02, 0x2a, 0x03, 0x03, 0x02, 0x00, 0x00,
    ]);

    assert_eq!(
        RustNativeSignatureVerifier
            .verify_signature(DigestAlgorithm::Sha256, &key, b"data", b"sig")
            .unwrap_err(),
        RawSignatureValidationError::UnsupportedKeyAlgorithm("1.2.3".to_owned())
    );
}

#[test]
fn malformed_rsa_key() {
    // SubjectPublicKeyInfo { { rsaEncryption, NULL }, '00'H }
    let key = spki(&[
        0x30, 0x13, 0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01,
        0x05, 0x00, 0x03, 0x02, 0x00, 0x00,
    ]);

    assert_eq!(
        RustNativeSignatureVerifier
            .verify_signature(DigestAlgorithm::Sha256, &key, b"data", b"sig")
            .unwrap_err(),
        RawSignatureValidationError::InvalidPublicKey
    );
}
