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

use config::FileFormat;

use crate::{base64, settings::VerifierSettings, Error};

const ROOT_PEM: &str = include_str!("../../tests/fixtures/root.pem");
const ROOT_DER: &[u8] = include_bytes!("../../tests/fixtures/root.der");

#[test]
fn from_toml() {
    let settings = VerifierSettings::from_toml(&format!(
        "trust_anchors = ['''\n{ROOT_PEM}''']\nsubject_selector = \"CN=signer.example.com\"\n"
    ))
    .unwrap();

    assert_eq!(settings.subject_selector, "CN=signer.example.com");

    let anchors = settings.trust_anchor_certificates().unwrap();
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].der().as_ref(), ROOT_DER);
}

#[test]
fn from_json_with_base64_der() {
    let settings = VerifierSettings::from_json(&format!(
        r#"{{ "trust_anchors": ["{}"] }}"#,
        base64::encode(ROOT_DER)
    ))
    .unwrap();

    assert!(settings.subject_selector.is_empty());
    assert_eq!(
        settings.trust_anchor_certificates().unwrap()[0].der().as_ref(),
        ROOT_DER
    );
}

#[test]
fn from_string() {
    let json = format!(
        r#"{{ "trust_anchors": ["{}"], "subject_selector": "O=Example Signing" }}"#,
        base64::encode(ROOT_DER)
    );

    let settings = VerifierSettings::from_string(&json, FileFormat::Json).unwrap();
    assert_eq!(settings.subject_selector, "O=Example Signing");
}

#[test]
fn no_trust_anchor() {
    let settings = VerifierSettings::default();

    assert!(matches!(
        settings.trust_anchor_certificates(),
        Err(Error::Settings(_))
    ));
    assert!(settings.validate().is_err());
}

#[test]
fn invalid_settings() {
    // Not base64.
    assert!(VerifierSettings::from_json(r#"{ "trust_anchors": ["%%%"] }"#).is_err());

    // Base64, but not a certificate.
    assert!(matches!(
        VerifierSettings::from_json(r#"{ "trust_anchors": ["AAAA"] }"#),
        Err(Error::Decode(_))
    ));

    // Unknown selector name.
    let json = format!(
        r#"{{ "trust_anchors": ["{}"], "subject_selector": "XX=1" }}"#,
        base64::encode(ROOT_DER)
    );
    assert!(matches!(
        VerifierSettings::from_json(&json),
        Err(Error::InvalidSelector(_))
    ));

    // Missing field.
    assert!(matches!(
        VerifierSettings::from_toml("subject_selector = \"CN=x\""),
        Err(Error::Settings(_))
    ));
}
