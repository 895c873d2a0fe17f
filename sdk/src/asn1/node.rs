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

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use x509_parser::num_bigint::BigUint;

use crate::asn1::{tag, DecodeError, DerReader};

/// One decoded tag-length-value unit.
///
/// The node keeps the complete encoding (identifier, length and value) so
/// that signed structures can be verified over their exact original bytes.
/// Interpretation of the value happens only when one of the `as_*`
/// accessors is called; each accessor checks that the node has the shape
/// it expects and fails with [`DecodeError`] otherwise.
#[derive(Clone, Eq, PartialEq)]
pub struct Asn1Node {
    identifier: u8,
    bytes: Bytes,
    header_len: usize,
}

impl Asn1Node {
    pub(crate) fn new(identifier: u8, bytes: Bytes, header_len: usize) -> Self {
        Self {
            identifier,
            bytes,
            header_len,
        }
    }

    /// Decode `data` as exactly one TLV unit.
    ///
    /// Fails with [`DecodeError::TooManyBytes`] if anything follows that
    /// unit.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self, DecodeError> {
        let mut reader = DerReader::new(data);
        let node = reader.read_node()?;

        if !reader.is_exhausted() {
            return Err(DecodeError::TooManyBytes);
        }

        Ok(node)
    }

    /// The identifier octet.
    pub fn identifier(&self) -> u8 {
        self.identifier
    }

    /// Return `true` for a context-specific, constructed identifier
    /// (`[n]` with the constructed bit set).
    pub fn is_context_tag(&self) -> bool {
        self.identifier & 0xe0 == 0xa0
    }

    /// Return `true` if this is the constructed context tag `[number]`.
    pub fn is_context_tag_number(&self, number: u8) -> bool {
        self.is_context_tag() && self.tag_number() == number
    }

    /// Return `true` if the constructed bit is set.
    pub fn is_constructed(&self) -> bool {
        self.identifier & 0x20 != 0
    }

    /// Tag number (low five bits of the identifier).
    pub fn tag_number(&self) -> u8 {
        self.identifier & 0x1f
    }

    /// Complete encoding of this node, header included.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Content octets.
    pub fn value(&self) -> &[u8] {
        &self.bytes[self.header_len..]
    }

    /// Decode the content octets as a sequence of nodes.
    pub fn children(&self) -> Result<Vec<Asn1Node>, DecodeError> {
        if !self.is_constructed() {
            return Err(DecodeError::NotConstructed(self.identifier));
        }

        DerReader::new(self.bytes.slice(self.header_len..)).read_all_nodes()
    }

    /// Interpret an `INTEGER` as an unsigned big-endian number.
    pub fn as_integer(&self) -> Result<BigUint, DecodeError> {
        self.expect_tag(tag::INTEGER)?;

        let value = self.value();
        if value.is_empty() {
            return Err(DecodeError::InvalidInteger);
        }

        Ok(BigUint::from_bytes_be(value))
    }

    /// Interpret a small `INTEGER` such as a version number.
    pub fn as_u32(&self) -> Result<u32, DecodeError> {
        u32::try_from(&self.as_integer()?).map_err(|_| DecodeError::InvalidInteger)
    }

    /// Interpret an `OBJECT IDENTIFIER` in dotted decimal form.
    pub fn as_object_identifier(&self) -> Result<String, DecodeError> {
        self.expect_tag(tag::OBJECT_IDENTIFIER)?;

        let mut arcs: Vec<u64> = vec![];
        let mut current: u64 = 0;
        let mut pending = false;

        for byte in self.value() {
            current = current
                .checked_mul(128)
                .map(|c| c | u64::from(byte & 0x7f))
                .ok_or(DecodeError::InvalidObjectIdentifier)?;

            if byte & 0x80 == 0 {
                arcs.push(current);
                current = 0;
                pending = false;
            } else {
                pending = true;
            }
        }

        if pending {
            return Err(DecodeError::InvalidObjectIdentifier);
        }

        let Some((&first, rest)) = arcs.split_first() else {
            return Err(DecodeError::InvalidObjectIdentifier);
        };

        // The first subidentifier packs the first two arcs as 40 * x + y.
        let (x, y) = if first < 80 {
            (first / 40, first % 40)
        } else {
            (2, first - 80)
        };

        let mut oid = format!("{x}.{y}");
        for arc in rest {
            oid.push('.');
            oid.push_str(&arc.to_string());
        }

        Ok(oid)
    }

    /// Interpret a `UTCTime` or `GeneralizedTime`.
    ///
    /// Only the DER forms `YYMMDDHHmmssZ` and `YYYYMMDDHHmmssZ` are accepted.
    /// Two-digit years of 50 and above are in the 1900s.
    pub fn as_time(&self) -> Result<DateTime<Utc>, DecodeError> {
        let value = self.value();
        let invalid = || DecodeError::InvalidTime(String::from_utf8_lossy(value).into_owned());

        let (year, rest) = match self.identifier {
            tag::UTC_TIME if value.len() == 13 => {
                let yy = digits(&value[..2]).ok_or_else(invalid)?;
                let year = if yy >= 50 { 1900 + yy } else { 2000 + yy };
                (year, &value[2..])
            }
            tag::GENERALIZED_TIME if value.len() == 15 => {
                (digits(&value[..4]).ok_or_else(invalid)?, &value[4..])
            }
            tag::UTC_TIME | tag::GENERALIZED_TIME => return Err(invalid()),
            found => {
                return Err(DecodeError::UnexpectedTag {
                    expected: tag::UTC_TIME,
                    found,
                })
            }
        };

        if rest.last() != Some(&b'Z') {
            return Err(invalid());
        }

        let field = |i: usize| digits(&rest[i..i + 2]).ok_or_else(invalid);

        let year = i32::try_from(year).map_err(|_| invalid())?;
        Utc.with_ymd_and_hms(year, field(0)?, field(2)?, field(4)?, field(6)?, field(8)?)
            .single()
            .ok_or_else(invalid)
    }

    /// Interpret one of the character string types used in names.
    pub fn as_string(&self) -> Result<String, DecodeError> {
        let value = self.value();

        match self.identifier {
            tag::UTF8_STRING => std::str::from_utf8(value)
                .map(str::to_owned)
                .map_err(|_| DecodeError::InvalidString),

            tag::PRINTABLE_STRING | tag::IA5_STRING | tag::VISIBLE_STRING => {
                if value.is_ascii() {
                    Ok(value.iter().map(|&b| char::from(b)).collect())
                } else {
                    Err(DecodeError::InvalidString)
                }
            }

            // T.61 is treated as Latin-1, which covers what is found in practice.
            tag::TELETEX_STRING => Ok(value.iter().map(|&b| char::from(b)).collect()),

            tag::BMP_STRING => {
                if value.len() % 2 != 0 {
                    return Err(DecodeError::InvalidString);
                }

                let units = value
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

                char::decode_utf16(units)
                    .collect::<Result<String, _>>()
                    .map_err(|_| DecodeError::InvalidString)
            }

            found => Err(DecodeError::UnexpectedTag {
                expected: tag::UTF8_STRING,
                found,
            }),
        }
    }

    /// Interpret a `BIT STRING`.
    ///
    /// The first content octet gives the number of unused bits in the last
    /// octet; those bits are cleared in the returned bytes.
    pub fn as_bit_string(&self) -> Result<Vec<u8>, DecodeError> {
        self.expect_tag(tag::BIT_STRING)?;

        let Some((&padding, bits)) = self.value().split_first() else {
            return Err(DecodeError::InvalidBitString);
        };

        if padding > 7 || (bits.is_empty() && padding != 0) {
            return Err(DecodeError::InvalidBitString);
        }

        let mut bits = bits.to_vec();
        if let Some(last) = bits.last_mut() {
            *last &= 0xffu8 << padding;
        }

        Ok(bits)
    }

    /// Interpret an `OCTET STRING`.
    pub fn as_octet_string(&self) -> Result<&[u8], DecodeError> {
        self.expect_tag(tag::OCTET_STRING)?;
        Ok(self.value())
    }

    /// Fail unless this node's identifier is `expected`.
    pub fn expect_tag(&self, expected: u8) -> Result<(), DecodeError> {
        if self.identifier == expected {
            Ok(())
        } else {
            Err(DecodeError::UnexpectedTag {
                expected,
                found: self.identifier,
            })
        }
    }
}

impl fmt::Debug for Asn1Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asn1Node")
            .field("identifier", &format_args!("0x{:02x}", self.identifier))
            .field("value", &hex::encode(self.value()))
            .finish()
    }
}

fn digits(text: &[u8]) -> Option<u32> {
    text.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}
