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

use std::sync::Arc;

use cms_verify::{
    hash::NativeHasher,
    oids,
    pkcs7::Certificate,
    raw_signature::default_signature_verifier,
    Pkcs7EnvelopeVerifier, SignedDataVerifier, VerificationResult,
};

#[allow(unused_macros)]
macro_rules! assert_err {
    ($expression:expr, $($pattern:tt)+) => {
        match $expression {
            $($pattern)+ => (),
            ref e => panic!("expected `{}` but got `{:?}`", stringify!($($pattern)+), e),
        }
    }
}
#[allow(unused_imports)]
pub(super) use assert_err;

pub const ROOT: &[u8] = include_bytes!("../fixtures/root.der");
pub const ROGUE: &[u8] = include_bytes!("../fixtures/rogue.der");
pub const CONTENT: &[u8] = include_bytes!("../fixtures/content.txt");
pub const DETACHED: &[u8] = include_bytes!("../fixtures/detached.p7s");
pub const DETACHED_PEM: &[u8] = include_bytes!("../fixtures/detached.pem");
pub const ATTACHED: &[u8] = include_bytes!("../fixtures/attached.p7s");
pub const NO_ATTRIBUTES: &[u8] = include_bytes!("../fixtures/noattr.p7s");
pub const EC_DETACHED: &[u8] = include_bytes!("../fixtures/ec_detached.p7s");
pub const UNTRUSTED: &[u8] = include_bytes!("../fixtures/untrusted.p7s");

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn signed_data_verifier(trust_anchor: &'static [u8], selector: &str) -> SignedDataVerifier {
    SignedDataVerifier::new(
        vec![Certificate::from_der(trust_anchor).unwrap()],
        selector,
        Arc::new(NativeHasher),
        default_signature_verifier(),
    )
    .unwrap()
}

pub fn envelope_verifier(selector: &str) -> Pkcs7EnvelopeVerifier {
    init_logging();

    Pkcs7EnvelopeVerifier::new()
        .with_verifier(oids::SIGNED_DATA, signed_data_verifier(ROOT, selector))
}

/// Names of the rules run for the first signer, in order.
pub fn executed_rules(result: &VerificationResult<String>) -> Vec<&str> {
    result.child_results()[0]
        .child_results()
        .iter()
        .map(|r| r.rule_name())
        .collect()
}

/// The last rule run for the first signer.
pub fn last_rule(result: &VerificationResult<String>) -> &VerificationResult<String> {
    result.child_results()[0].child_results().last().unwrap()
}
