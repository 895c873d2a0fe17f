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

use std::iter::Peekable;

use crate::asn1::{Asn1Node, DecodeError};

/// Walks the children of a constructed node in grammar order.
pub(crate) struct Fields {
    children: Peekable<std::vec::IntoIter<Asn1Node>>,
}

impl Fields {
    /// Start walking the children of `node`, which must have identifier
    /// `tag`.
    pub(crate) fn of(node: &Asn1Node, tag: u8) -> Result<Self, DecodeError> {
        node.expect_tag(tag)?;

        Ok(Self {
            children: node.children()?.into_iter().peekable(),
        })
    }

    /// Consume the next position, which must be present.
    pub(crate) fn required(&mut self, name: &'static str) -> Result<Asn1Node, DecodeError> {
        self.children.next().ok_or(DecodeError::MissingField(name))
    }

    /// Consume the next position only if it is present.
    pub(crate) fn optional(&mut self) -> Option<Asn1Node> {
        self.children.next()
    }

    /// Consume the next position only if it carries the constructed context
    /// tag `[number]`.
    pub(crate) fn context_tagged(&mut self, number: u8) -> Option<Asn1Node> {
        self.children
            .next_if(|node| node.is_context_tag_number(number))
    }

    /// Consume every remaining position.
    pub(crate) fn rest(self) -> impl Iterator<Item = Asn1Node> {
        self.children
    }
}
