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

use thiserror::Error;

/// Describes why a DER buffer or node could not be decoded.
///
/// These are hard parse failures: the input is malformed or does not have
/// the shape the caller asked for.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer ended before the current unit was complete.
    #[error("premature end of data")]
    PrematureEnd,

    /// Bytes remained after the single top-level unit.
    #[error("too many bytes")]
    TooManyBytes,

    /// The encoded length does not fit in memory.
    #[error("length does not fit in usize")]
    LengthOverflow,

    /// Indefinite lengths are not allowed in DER.
    #[error("indefinite length is not supported")]
    IndefiniteLength,

    /// Multi-byte tag numbers are not used by the structures read here.
    #[error("high tag number form is not supported")]
    HighTagNumber,

    /// The node's identifier is not the one required.
    #[error("unexpected tag 0x{found:02x} (expected 0x{expected:02x})")]
    UnexpectedTag {
        /// Identifier that was required.
        expected: u8,

        /// Identifier that was found.
        found: u8,
    },

    /// Children were requested from a primitive node.
    #[error("node with tag 0x{0:02x} is not constructed")]
    NotConstructed(u8),

    /// Object identifier content is empty or truncated.
    #[error("invalid object identifier")]
    InvalidObjectIdentifier,

    /// Time value does not match `UTCTime` or `GeneralizedTime`.
    #[error("invalid time value: {0}")]
    InvalidTime(String),

    /// Bit string content is empty or declares more than 7 unused bits.
    #[error("invalid bit string")]
    InvalidBitString,

    /// Character string content is not valid for its type.
    #[error("invalid character string")]
    InvalidString,

    /// Integer content is empty or out of range.
    #[error("invalid integer")]
    InvalidInteger,

    /// A required positional field is missing.
    #[error("missing field: {0}")]
    MissingField(&'static str),
}
