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
    oids,
    pkcs7::{Pkcs7Content, Pkcs7Envelope, SignedData},
    Error,
};

fn signed_data(envelope: &Pkcs7Envelope) -> &SignedData {
    match envelope.content() {
        Pkcs7Content::SignedData(signed_data) => signed_data,
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn detached() {
    let envelope =
        Pkcs7Envelope::from_der(&include_bytes!("../../../tests/fixtures/detached.p7s")[..])
            .unwrap();
    assert_eq!(envelope.content_type(), oids::SIGNED_DATA);

    let signed_data = signed_data(&envelope);
    assert_eq!(signed_data.version, 1);
    assert_eq!(signed_data.digest_algorithms.len(), 1);
    assert_eq!(signed_data.digest_algorithms[0].algorithm, oids::SHA256);
    assert_eq!(signed_data.content_info.content_type, oids::DATA);
    assert!(signed_data.content_info.content.is_none());
    assert!(signed_data.content_info.content_bytes().is_none());
    assert_eq!(signed_data.certificates.len(), 2);
    assert!(signed_data.crls.is_none());
    assert_eq!(signed_data.signer_infos.len(), 1);

    let signer_info = &signed_data.signer_infos[0];
    assert_eq!(signer_info.version, 1);
    assert_eq!(signer_info.digest_algorithm.algorithm, oids::SHA256);
    assert_eq!(
        signer_info.digest_encryption_algorithm.algorithm,
        oids::RSA_ENCRYPTION
    );
    assert_eq!(signer_info.encrypted_digest.len(), 256);
    assert!(signer_info.unauthenticated_attributes.is_none());

    let attributes = signer_info.authenticated_attributes.as_ref().unwrap();
    assert!(attributes.contains(oids::CONTENT_TYPE));
    assert!(attributes.contains(oids::SIGNING_TIME));
    assert!(attributes.contains(oids::MESSAGE_DIGEST));
    assert_eq!(attributes.get(oids::MESSAGE_DIGEST).count(), 1);

    // Signed as a universal SET rather than the implicit [0].
    assert_eq!(attributes.bytes()[0], 0xa0);
    let signed = attributes.signed_bytes();
    assert_eq!(signed[0], 0x31);
    assert_eq!(&signed[1..], &attributes.bytes()[1..]);

    let signers: Vec<_> = signed_data
        .certificates_with_serial(&signer_info.issuer_and_serial_number.serial_number)
        .collect();
    assert_eq!(signers.len(), 1);
    assert_eq!(
        signers[0].issuer(),
        &signer_info.issuer_and_serial_number.issuer
    );
}

#[test]
fn attached() {
    let envelope =
        Pkcs7Envelope::from_der(&include_bytes!("../../../tests/fixtures/attached.p7s")[..])
            .unwrap();

    assert_eq!(
        signed_data(&envelope).content_info.content_bytes(),
        Some(&include_bytes!("../../../tests/fixtures/content.txt")[..])
    );
}

#[test]
fn without_authenticated_attributes() {
    let envelope =
        Pkcs7Envelope::from_der(&include_bytes!("../../../tests/fixtures/noattr.p7s")[..])
            .unwrap();

    let signer_info = &signed_data(&envelope).signer_infos[0];
    assert!(signer_info.authenticated_attributes.is_none());
    assert_eq!(
        signer_info.digest_encryption_algorithm.algorithm,
        oids::RSA_ENCRYPTION
    );
}

#[test]
fn pem() {
    let from_pem =
        Pkcs7Envelope::from_pem(include_bytes!("../../../tests/fixtures/detached.pem")).unwrap();
    let from_der =
        Pkcs7Envelope::from_der(&include_bytes!("../../../tests/fixtures/detached.p7s")[..])
            .unwrap();

    assert_eq!(from_pem, from_der);

    assert!(matches!(
        Pkcs7Envelope::from_pem(include_bytes!("../../../tests/fixtures/root.pem")),
        Err(Error::InvalidPem(_))
    ));
}

#[test]
fn other_content_type() {
    // ContentInfo { id-data, [0] OCTET STRING "hi" }
    let der = [
        0x30, 0x11, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x01, 0xa0, 0x04,
        0x04, 0x02, 0x68, 0x69,
    ];
    let envelope = Pkcs7Envelope::from_der(der.to_vec()).unwrap();

    assert_eq!(envelope.content_type(), oids::DATA);
    match envelope.content() {
        Pkcs7Content::Other {
            content_type,
            content,
        } => {
            assert_eq!(content_type, oids::DATA);
            assert_eq!(
                content.as_ref().unwrap().as_octet_string().unwrap(),
                b"hi"
            );
        }
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn truncated() {
    let der = include_bytes!("../../../tests/fixtures/detached.p7s");

    assert!(matches!(
        Pkcs7Envelope::from_der(der[..der.len() - 1].to_vec()),
        Err(Error::Decode(_))
    ));
}
