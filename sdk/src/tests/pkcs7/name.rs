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
    pkcs7::SubjectSelector,
    tests::fixture_certificate,
    Error,
};

#[test]
fn parse_list() {
    let selectors = SubjectSelector::parse_list("CN=signer.example.com, O = Example Signing").unwrap();

    assert_eq!(selectors.len(), 2);
    assert_eq!(selectors[0].attr_type(), oids::COMMON_NAME);
    assert_eq!(selectors[0].value(), "signer.example.com");
    assert_eq!(selectors[1].attr_type(), oids::ORGANIZATION_NAME);
    assert_eq!(selectors[1].value(), "Example Signing");
    assert_eq!(selectors[1].to_string(), "O=Example Signing");
}

#[test]
fn names_are_case_insensitive() {
    let selectors =
        SubjectSelector::parse_list("cn=a,commonName=b,e=x@example.com,organizationalUnitName=c")
            .unwrap();

    let types: Vec<&str> = selectors.iter().map(|s| s.attr_type()).collect();
    assert_eq!(
        types,
        [
            oids::COMMON_NAME,
            oids::COMMON_NAME,
            oids::EMAIL_ADDRESS,
            oids::ORGANIZATIONAL_UNIT_NAME
        ]
    );
}

#[test]
fn blank_list() {
    assert!(SubjectSelector::parse_list("").unwrap().is_empty());
    assert!(SubjectSelector::parse_list("   ").unwrap().is_empty());
}

#[test]
fn invalid_selectors() {
    assert!(matches!(
        SubjectSelector::parse_list("CN"),
        Err(Error::InvalidSelector(_))
    ));
    assert!(matches!(
        SubjectSelector::parse_list("CN=a,XYZ=b"),
        Err(Error::InvalidSelector(_))
    ));
}

#[test]
fn contains_selector() {
    let signer = fixture_certificate(include_bytes!("../../../tests/fixtures/signer.der"));
    let subject = signer.subject();

    let matching = SubjectSelector::parse_list(
        "CN=signer.example.com,C=EE,L=Tallinn,O=Example Signing,OU=Releases",
    )
    .unwrap();
    for selector in &matching {
        assert!(subject.contains_selector(selector).unwrap(), "{selector}");
    }

    // Values are compared exactly.
    for selector in ["CN=SIGNER.example.com", "CN=signer", "O=Example Trust", "E=a@b.c"] {
        let selector = &SubjectSelector::parse_list(selector).unwrap()[0];
        assert!(!subject.contains_selector(selector).unwrap(), "{selector}");
    }
}
