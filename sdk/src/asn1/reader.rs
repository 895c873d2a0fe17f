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

use bytes::Bytes;

use crate::asn1::{Asn1Node, DecodeError};

/// Reads consecutive tag-length-value units from an immutable buffer.
///
/// Nodes produced by the reader share the underlying buffer, so reading a
/// large structure does not copy its contents.
#[derive(Clone, Debug)]
pub struct DerReader {
    data: Bytes,
    position: usize,
}

impl DerReader {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Return `true` once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Read exactly one TLV unit starting at the current position.
    pub fn read_node(&mut self) -> Result<Asn1Node, DecodeError> {
        let start = self.position;

        let identifier = self.read_byte()?;
        if identifier & 0x1f == 0x1f {
            return Err(DecodeError::HighTagNumber);
        }

        let length = self.read_length()?;
        let header_len = self.position - start;

        if length > self.remaining() {
            return Err(DecodeError::PrematureEnd);
        }
        self.position += length;

        Ok(Asn1Node::new(
            identifier,
            self.data.slice(start..self.position),
            header_len,
        ))
    }

    /// Read sibling units until the buffer is exhausted.
    pub fn read_all_nodes(&mut self) -> Result<Vec<Asn1Node>, DecodeError> {
        let mut nodes = vec![];
        while !self.is_exhausted() {
            nodes.push(self.read_node()?);
        }
        Ok(nodes)
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(DecodeError::PrematureEnd)?;

        self.position += 1;
        Ok(byte)
    }

    fn read_length(&mut self) -> Result<usize, DecodeError> {
        let first = self.read_byte()?;
        if first & 0x80 == 0 {
            return Ok(usize::from(first));
        }

        // Long form: the low bits give the number of big-endian length bytes.
        let count = first & 0x7f;
        if count == 0 {
            return Err(DecodeError::IndefiniteLength);
        }

        let mut length: usize = 0;
        for _ in 0..count {
            let byte = self.read_byte()?;
            length = length
                .checked_mul(256)
                .and_then(|l| l.checked_add(usize::from(byte)))
                .ok_or(DecodeError::LengthOverflow)?;
        }

        Ok(length)
    }
}
