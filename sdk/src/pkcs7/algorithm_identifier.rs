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
    asn1::{tag, Asn1Node, DecodeError},
    pkcs7::Fields,
};

/// An `AlgorithmIdentifier`: an object identifier plus optional parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlgorithmIdentifier {
    /// Algorithm object identifier in dotted decimal form.
    pub algorithm: String,

    /// Parameters, left undecoded.
    pub parameters: Option<Asn1Node>,
}

impl TryFrom<&Asn1Node> for AlgorithmIdentifier {
    type Error = DecodeError;

    fn try_from(node: &Asn1Node) -> Result<Self, DecodeError> {
        let mut fields = Fields::of(node, tag::SEQUENCE)?;

        let algorithm = fields.required("algorithm")?.as_object_identifier()?;
        let parameters = fields.optional();

        Ok(Self {
            algorithm,
            parameters,
        })
    }
}
