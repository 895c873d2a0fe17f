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

//! Typed PKCS #7 (RFC 2315 / RFC 5652) and X.509 (RFC 5280) structures.
//!
//! Each structure is built from an [`Asn1Node`] by walking its children in
//! the order given by the ASN.1 grammar. Optional fields are recognized by
//! their context-specific tag before the position is consumed.
//!
//! [`Asn1Node`]: crate::asn1::Asn1Node

mod algorithm_identifier;
pub use algorithm_identifier::AlgorithmIdentifier;

mod attribute;
pub use attribute::{Attribute, Attributes};

mod certificate;
pub use certificate::{Certificate, SubjectPublicKeyInfo, TbsCertificate, Validity};

mod envelope;
pub use envelope::{Pkcs7Content, Pkcs7Envelope};

mod fields;
pub(crate) use fields::Fields;

mod name;
pub use name::{RdnSequence, SubjectSelector};

mod signed_data;
pub use signed_data::{ContentInfo, SignedData};

mod signer_info;
pub use signer_info::{IssuerAndSerialNumber, SignerInfo};
