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

use chrono::{TimeZone, Utc};
use x509_parser::{num_bigint::BigUint, prelude::FromDer};

use crate::{
    base64, oids,
    pkcs7::Certificate,
    raw_signature::rust_native::RustNativeSignatureVerifier,
    tests::fixture_certificate,
    Error,
};

// A v1 certificate: no `[0]` version field, no extensions.
const V1_CERT: &str = "MIICtjCCAZ4CAQEwDQYJKoZIhvcNAQELBQAwITELMAkGA1UEAxMCSDMxEjAQBgNVBAoTCUd1YXJkdGltZTAeFw0xMjExMjYxMzAwMTZaFw0xNDEyMjYxMzAwMTZaMCExCzAJBgNVBAMTAkgzMRIwEAYDVQQKEwlHdWFyZHRpbWUwggEiMA0GCSqGSIb3DQEBAQUAA4IBDwAwggEKAoIBAQDVkmSzH2Au23FOAGkCMTdCZUoHCcOHV7EPqVxFmwea01gS0nDfAjzFUcudvgYRtaw6r6r4ZPLC+pqBI0W7FjeVpRQAuKypYGhie2IEd2FAQLDB4gnJl68Z7K9B+Njc8rvwKbrqix+N3ReqFz9IENbwtGrXj90SMFBoCofkmUCe+fy5H/YYjhud7wnZUhYPw7DsYU+5eqAh9dNXNSD4gxOLDoZgID49G953fS2pkgdZKIWpZl+/hftiTDLD92NB0HYwoqEJZZGSM+RUKMxPeRiHz6goGcqoXp/WjeXyd5uiP4TQX8KsvAQQDTBrBs8DFbFlL7MOEzM+vvV2PdFdU0bRAgMBDskwDQYJKoZIhvcNAQELBQADggEBAL/Invma9hUUj7tcZAKKNlZm2bktd6jguW+eFUbf7m1zfSLw3sq85mwFkl8hSDlV/d4pasJJCd8KmGLki5T9BM/TAjvzf1g2orBGMArhZkYNnYkuJTHcxetLFqtyBxdMKGiObmhfTI1YNAckomnvsausJ8ejsKKFxFTcWQ1TOeL3v3N/sZ/c/pwVd80ZbTIo/k/dFwbRVkhuj3Q+DDi/8tlcGXSAppBVX+uFqDGudu3TZ8XQY7VX7ZSH/2rIO5SZm0CbgAOFYQitDLKLIXEBS6R4W4n559L+dXIaStAR3U8Jmx8WXWMSsa1FJVynyiVLUMMw07mVgQGUs2IK81ghXsY=";

const SIGNED_DATA_HEX: &str =
    "30290204538D1000042101BFA2FFF68565AEDBB3F8FF7438443E0B260ED04E6CB27C36294CFC4C7A0267C3";

const SIGNATURE_HEX: &str = "ABA3BADCE5F7672E7ECB4AE02923D22F33C4F0603AB0B0ABD5B156C4442D02C88EDA8466785E031922E49BE62B6524DFC917BC689A8D71420B2F99ECE8FA135716715C81E956A4878C2D75224184C53443D5708A8F9486107E53F7FF9ACF6869773F08459A835F65379782B6EC55050A1A49FF62131C9D5A0E1AFB0BD9B02BBABB67689CBDAED4602C12B55139B657C2C4B96515A87878F2EC73A5D82A5810BBDB142C3A391B80D901792B57E54FA08F0973D6F408677FA35DBEEDDA3E1901570335B332726FD5B2FDAF580AB14B492808CFA6EF1F43CCB57B58D27A09CC6E59950E9ADDB4BFC4DC48BDA29A2029AD841C6FB4E4889369D651686656FC341C28";

fn v1_cert() -> Certificate {
    Certificate::from_der(base64::decode(V1_CERT).unwrap()).unwrap()
}

#[test]
fn v1_certificate_fields() {
    let cert = v1_cert();
    let tbs = cert.tbs_certificate();

    assert_eq!(tbs.version, 0);
    assert_eq!(cert.serial_number(), &BigUint::from(1u32));
    assert_eq!(cert.signature_algorithm(), oids::SHA256_WITH_RSA_ENCRYPTION);
    assert_eq!(tbs.signature.algorithm, oids::SHA256_WITH_RSA_ENCRYPTION);
    assert_eq!(cert.subject_public_key_info().algorithm_oid(), oids::RSA_ENCRYPTION);
    assert!(tbs.extensions.is_none());

    assert_eq!(cert.issuer().to_string(), "CN=H3, O=Guardtime");
    assert_eq!(cert.subject(), cert.issuer());
    assert_eq!(cert.signature().len(), 256);
}

#[test]
fn validity_window() {
    let cert = v1_cert();

    assert!(!cert.is_valid_during(0));
    assert!(!cert.is_valid_during(13_854_708_160));
    assert!(cert.is_valid_during(1_385_470_816));

    let validity = cert.tbs_certificate().validity;
    assert_eq!(
        validity.not_before,
        Utc.with_ymd_and_hms(2012, 11, 26, 13, 0, 16).unwrap()
    );
    assert_eq!(
        validity.not_after,
        Utc.with_ymd_and_hms(2014, 12, 26, 13, 0, 16).unwrap()
    );

    // Both bounds are inclusive.
    assert!(cert.is_valid_at(validity.not_before));
    assert!(cert.is_valid_at(validity.not_after));
    assert!(!cert.is_valid_at(validity.not_after + chrono::Duration::seconds(1)));
}

#[test]
fn verify_data() {
    let cert = v1_cert();
    let data = hex::decode(SIGNED_DATA_HEX).unwrap();
    let signature = hex::decode(SIGNATURE_HEX).unwrap();

    assert!(cert
        .verify_data(&data, &signature, &RustNativeSignatureVerifier)
        .unwrap());

    assert!(!cert
        .verify_data(&[0x30], &signature, &RustNativeSignatureVerifier)
        .unwrap());
}

#[test]
fn agrees_with_x509_parser() {
    let der = include_bytes!("../../../tests/fixtures/signer.der");
    let cert = fixture_certificate(der);
    let (_, parsed) = x509_parser::certificate::X509Certificate::from_der(der).unwrap();

    assert_eq!(cert.tbs_certificate().version, 2);
    assert_eq!(cert.serial_number(), &parsed.tbs_certificate.serial);
    assert_eq!(cert.tbs_certificate_bytes(), parsed.tbs_certificate.as_ref());
    assert_eq!(cert.signature(), parsed.signature_value.data.as_ref());
    assert_eq!(
        cert.subject_public_key_info().der(),
        parsed.tbs_certificate.subject_pki.raw
    );
    assert_eq!(
        cert.tbs_certificate().validity.not_before.timestamp(),
        parsed.validity().not_before.timestamp()
    );
    assert!(cert.tbs_certificate().extensions.is_some());
}

#[test]
fn subject_and_issuer() {
    let signer = fixture_certificate(include_bytes!("../../../tests/fixtures/signer.der"));
    let inter = fixture_certificate(include_bytes!("../../../tests/fixtures/inter.der"));

    assert_eq!(
        signer.subject().to_string(),
        "C=EE, L=Tallinn, O=Example Signing, OU=Releases, CN=signer.example.com"
    );
    assert_eq!(signer.issuer(), inter.subject());
    assert_ne!(signer.issuer(), signer.subject());
}

#[test]
fn pem() {
    let pem = include_bytes!("../../../tests/fixtures/root.pem");
    let der = include_bytes!("../../../tests/fixtures/root.der");

    let cert = Certificate::from_pem(pem).unwrap();
    assert_eq!(cert.der().as_ref(), der.as_slice());

    assert_eq!(Certificate::from_pem_bundle(pem).unwrap().len(), 1);

    assert!(matches!(
        Certificate::from_pem(b"not a pem"),
        Err(Error::InvalidPem(_))
    ));
}

#[test]
fn trailing_bytes() {
    let mut der = include_bytes!("../../../tests/fixtures/root.der").to_vec();
    der.push(0);

    assert!(matches!(
        Certificate::from_der(der),
        Err(Error::Decode(crate::asn1::DecodeError::TooManyBytes))
    ));
}
