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

//! Object identifiers used when decoding PKCS #7 and X.509 structures.

// PKCS #7 content types.

/// `id-data`
pub const DATA: &str = "1.2.840.113549.1.7.1";

/// `id-signedData`
pub const SIGNED_DATA: &str = "1.2.840.113549.1.7.2";

// PKCS #9 attributes.

/// `emailAddress`
pub const EMAIL_ADDRESS: &str = "1.2.840.113549.1.9.1";

/// `contentType` authenticated attribute.
pub const CONTENT_TYPE: &str = "1.2.840.113549.1.9.3";

/// `messageDigest` authenticated attribute.
pub const MESSAGE_DIGEST: &str = "1.2.840.113549.1.9.4";

/// `signingTime` authenticated attribute.
pub const SIGNING_TIME: &str = "1.2.840.113549.1.9.5";

// X.520 name attributes.

/// `commonName`
pub const COMMON_NAME: &str = "2.5.4.3";

/// `countryName`
pub const COUNTRY_NAME: &str = "2.5.4.6";

/// `localityName`
pub const LOCALITY_NAME: &str = "2.5.4.7";

/// `stateOrProvinceName`
pub const STATE_OR_PROVINCE_NAME: &str = "2.5.4.8";

/// `organizationName`
pub const ORGANIZATION_NAME: &str = "2.5.4.10";

/// `organizationalUnitName`
pub const ORGANIZATIONAL_UNIT_NAME: &str = "2.5.4.11";

// Digest algorithms.

/// SHA-1
pub const SHA1: &str = "1.3.14.3.2.26";

/// SHA-256
pub const SHA256: &str = "2.16.840.1.101.3.4.2.1";

/// SHA-384
pub const SHA384: &str = "2.16.840.1.101.3.4.2.2";

/// SHA-512
pub const SHA512: &str = "2.16.840.1.101.3.4.2.3";

/// SHA-224
pub const SHA224: &str = "2.16.840.1.101.3.4.2.4";

/// SHA-512/224
pub const SHA512_224: &str = "2.16.840.1.101.3.4.2.5";

/// SHA-512/256
pub const SHA512_256: &str = "2.16.840.1.101.3.4.2.6";

// Public key and signature algorithms.

/// `rsaEncryption`
pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";

/// `sha1WithRSAEncryption`
pub const SHA1_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.5";

/// `sha256WithRSAEncryption`
pub const SHA256_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.11";

/// `sha384WithRSAEncryption`
pub const SHA384_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.12";

/// `sha512WithRSAEncryption`
pub const SHA512_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.13";

/// `sha224WithRSAEncryption`
pub const SHA224_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.14";

/// `id-ecPublicKey`
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

/// `ecdsa-with-SHA1`
pub const ECDSA_WITH_SHA1: &str = "1.2.840.10045.4.1";

/// `ecdsa-with-SHA224`
pub const ECDSA_WITH_SHA224: &str = "1.2.840.10045.4.3.1";

/// `ecdsa-with-SHA256`
pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";

/// `ecdsa-with-SHA384`
pub const ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";

/// `ecdsa-with-SHA512`
pub const ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";

/// `id-Ed25519`
pub const ED25519: &str = "1.3.101.112";

// Named curves.

/// `prime256v1` / `secp256r1`
pub const PRIME256V1: &str = "1.2.840.10045.3.1.7";

/// `secp384r1`
pub const SECP384R1: &str = "1.3.132.0.34";
