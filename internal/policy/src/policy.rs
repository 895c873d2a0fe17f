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

use std::{borrow::Cow, fmt, sync::Arc};

use crate::{Rule, RuleNode, VerificationResult};

/// Entry point of a rule graph.
///
/// [`Policy::verify`] starts at the first rule and keeps following the edge
/// selected by each rule's [`ResultCode`] until no edge is registered. The
/// returned result carries every executed rule's result, in order, and takes
/// its own code and error from the last one (see
/// [`VerificationResult::from_results`]).
///
/// A `Policy` is itself a [`Rule`], so policies can be nested inside larger
/// graphs.
///
/// ## Example
///
/// ```
/// # use cms_verify_policy::{FnRule, Policy, Rule, RuleNode, ResultCode, VerificationResult};
/// let positive = RuleNode::new(FnRule::new("Positive", |n: &i32| -> Result<_, ()> {
///     Ok(if *n > 0 {
///         VerificationResult::<String>::ok("Positive")
///     } else {
///         VerificationResult::fail("Positive", "not positive".to_string())
///     })
/// }));
///
/// let policy = Policy::new(positive);
/// let result = policy.verify(&-1).unwrap();
///
/// assert_eq!(result.rule_name(), "VerificationPolicy");
/// assert_eq!(result.result_code(), ResultCode::Fail);
/// ```
///
/// [`ResultCode`]: crate::ResultCode
pub struct Policy<C: ?Sized, E, F> {
    name: Cow<'static, str>,
    first_rule: Arc<RuleNode<C, E, F>>,
}

impl<C: ?Sized, E, F> Policy<C, E, F> {
    /// Name used when none is given.
    pub const DEFAULT_NAME: &'static str = "VerificationPolicy";

    /// Create a policy that starts at `first_rule`.
    pub fn new(first_rule: impl Into<Arc<RuleNode<C, E, F>>>) -> Self {
        Self::with_name(Self::DEFAULT_NAME, first_rule)
    }

    /// Create a named policy that starts at `first_rule`.
    pub fn with_name(
        name: impl Into<Cow<'static, str>>,
        first_rule: impl Into<Arc<RuleNode<C, E, F>>>,
    ) -> Self {
        Self {
            name: name.into(),
            first_rule: first_rule.into(),
        }
    }
}

impl<C: ?Sized, E: Clone, F> Rule<C, E, F> for Policy<C, E, F> {
    fn rule_name(&self) -> &str {
        &self.name
    }

    fn verify(&self, context: &C) -> Result<VerificationResult<E>, F> {
        let mut results = vec![];
        let mut current = Some(&self.first_rule);

        while let Some(node) = current {
            let result = node.verify(context)?;
            current = node.next_rule(result.result_code());
            results.push(result);
        }

        Ok(VerificationResult::from_results(self.name.clone(), results))
    }
}

impl<C: ?Sized, E, F> fmt::Debug for Policy<C, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("name", &self.name)
            .field("first_rule", &self.first_rule)
            .finish()
    }
}
