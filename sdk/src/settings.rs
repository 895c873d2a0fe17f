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

//! Settings for building a [`SignedDataVerifier`](crate::SignedDataVerifier).

use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};

use crate::{
    base64,
    pkcs7::{Certificate, SubjectSelector},
    Error, Result,
};

/// Verifier settings.
///
/// ```
/// use cms_verify::settings::VerifierSettings;
///
/// let settings = VerifierSettings::from_json(
///     r#"{ "trust_anchors": [], "subject_selector": "CN=signer.example.com" }"#,
/// );
///
/// // At least one trust anchor is required.
/// assert!(settings.is_err());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct VerifierSettings {
    /// Trusted root certificates. Each entry is either one or more PEM
    /// `CERTIFICATE` blocks or a base64-encoded DER certificate.
    pub trust_anchors: Vec<String>,

    /// Comma separated `name=value` constraints on the signing certificate's
    /// subject, for example `CN=signer.example.com,O=Example`.
    #[serde(default)]
    pub subject_selector: String,
}

impl VerifierSettings {
    /// Load settings from a TOML string.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::from_string(toml, FileFormat::Toml)
    }

    /// Load settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_string(json, FileFormat::Json)
    }

    /// Load settings from a string in the given format and validate them.
    pub fn from_string(settings_str: &str, format: FileFormat) -> Result<Self> {
        let settings = Config::builder()
            .add_source(config::File::from_str(settings_str, format))
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check that the trust anchors and the subject selector can be parsed.
    pub fn validate(&self) -> Result<()> {
        self.trust_anchor_certificates()?;
        SubjectSelector::parse_list(&self.subject_selector)?;
        Ok(())
    }

    /// Decode the configured trust anchors.
    pub fn trust_anchor_certificates(&self) -> Result<Vec<Certificate>> {
        let mut certificates = vec![];

        for anchor in &self.trust_anchors {
            if anchor.contains("-----BEGIN") {
                certificates.extend(Certificate::from_pem_bundle(anchor.as_bytes())?);
            } else {
                certificates.push(Certificate::from_der(base64::decode(anchor)?)?);
            }
        }

        if certificates.is_empty() {
            return Err(Error::Settings("no trust anchor configured".to_owned()));
        }

        Ok(certificates)
    }
}
