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

//! A minimal decoder for the Distinguished Encoding Rules (DER).
//!
//! [`DerReader`] splits a buffer into tag-length-value units without any
//! knowledge of what they mean. [`Asn1Node`] wraps one such unit and
//! interprets its value on request (integer, object identifier, time,
//! string, bit string, or nested children).
//!
//! Only what is needed to read PKCS #7 and X.509 structures is supported.
//! There is no encoder.

mod error;
pub use error::DecodeError;

mod node;
pub use node::Asn1Node;

mod reader;
pub use reader::DerReader;

/// Identifier octets of the universal types this decoder interprets.
pub mod tag {
    /// `BOOLEAN`
    pub const BOOLEAN: u8 = 0x01;

    /// `INTEGER`
    pub const INTEGER: u8 = 0x02;

    /// `BIT STRING`
    pub const BIT_STRING: u8 = 0x03;

    /// `OCTET STRING`
    pub const OCTET_STRING: u8 = 0x04;

    /// `NULL`
    pub const NULL: u8 = 0x05;

    /// `OBJECT IDENTIFIER`
    pub const OBJECT_IDENTIFIER: u8 = 0x06;

    /// `UTF8String`
    pub const UTF8_STRING: u8 = 0x0c;

    /// `PrintableString`
    pub const PRINTABLE_STRING: u8 = 0x13;

    /// `TeletexString` (`T61String`)
    pub const TELETEX_STRING: u8 = 0x14;

    /// `IA5String`
    pub const IA5_STRING: u8 = 0x16;

    /// `UTCTime`
    pub const UTC_TIME: u8 = 0x17;

    /// `GeneralizedTime`
    pub const GENERALIZED_TIME: u8 = 0x18;

    /// `VisibleString`
    pub const VISIBLE_STRING: u8 = 0x1a;

    /// `BMPString`
    pub const BMP_STRING: u8 = 0x1e;

    /// `SEQUENCE` / `SEQUENCE OF`
    pub const SEQUENCE: u8 = 0x30;

    /// `SET` / `SET OF`
    pub const SET: u8 = 0x31;
}
