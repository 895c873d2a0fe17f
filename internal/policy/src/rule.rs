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

use crate::{ResultCode, VerificationResult};

/// A `Rule` is one named verification step.
///
/// * `C` is the context the rule inspects.
/// * `E` describes why a step did not succeed (carried inside
///   [`VerificationResult`]).
/// * `F` is a fatal error: the input could not be evaluated at all. A fatal
///   error aborts the whole [`Policy`] and is returned to the caller
///   unchanged.
///
/// Rules must be stateless with respect to `verify` so that a rule graph can
/// be built once and reused for many inputs.
///
/// [`Policy`]: crate::Policy
pub trait Rule<C: ?Sized, E, F> {
    /// Name reported in the [`VerificationResult`] produced by this rule.
    fn rule_name(&self) -> &str;

    /// Evaluate the rule against `context`.
    fn verify(&self, context: &C) -> Result<VerificationResult<E>, F>;
}

/// A [`Rule`] backed by a closure.
///
/// ## Example
///
/// ```
/// # use cms_verify_policy::{FnRule, Rule, ResultCode, VerificationResult};
/// let rule = FnRule::new("IsEven", |n: &u32| -> Result<_, ()> {
///     Ok(if n % 2 == 0 {
///         VerificationResult::<String>::ok("IsEven")
///     } else {
///         VerificationResult::fail("IsEven", format!("{n} is odd"))
///     })
/// });
///
/// assert_eq!(rule.verify(&4).unwrap().result_code(), ResultCode::Ok);
/// assert_eq!(rule.verify(&3).unwrap().result_code(), ResultCode::Fail);
/// ```
pub struct FnRule<Func> {
    name: Cow<'static, str>,
    func: Func,
}

impl<Func> FnRule<Func> {
    /// Wrap `func` as a rule named `name`.
    pub fn new(name: impl Into<Cow<'static, str>>, func: Func) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<C, E, F, Func> Rule<C, E, F> for FnRule<Func>
where
    C: ?Sized,
    Func: Fn(&C) -> Result<VerificationResult<E>, F>,
{
    fn rule_name(&self) -> &str {
        &self.name
    }

    fn verify(&self, context: &C) -> Result<VerificationResult<E>, F> {
        (self.func)(context)
    }
}

/// A node in a rule graph: a [`Rule`] plus the rule to run next for each
/// possible [`ResultCode`].
///
/// Edges default to none, which ends the walk. Nodes are wired with the
/// builder methods and shared through [`Arc`], so the same node can be the
/// target of several edges. Because each builder call consumes the node,
/// a graph assembled this way cannot contain a cycle.
pub struct RuleNode<C: ?Sized, E, F> {
    rule: Box<dyn Rule<C, E, F> + Send + Sync>,
    on_success: Option<Arc<RuleNode<C, E, F>>>,
    on_failure: Option<Arc<RuleNode<C, E, F>>>,
    on_na: Option<Arc<RuleNode<C, E, F>>>,
}

impl<C: ?Sized, E, F> RuleNode<C, E, F> {
    /// Create a terminal node for `rule`.
    pub fn new(rule: impl Rule<C, E, F> + Send + Sync + 'static) -> Self {
        Self {
            rule: Box::new(rule),
            on_success: None,
            on_failure: None,
            on_na: None,
        }
    }

    /// Run `next` after this rule returns [`ResultCode::Ok`].
    pub fn on_success(self, next: impl Into<Arc<RuleNode<C, E, F>>>) -> Self {
        Self {
            on_success: Some(next.into()),
            ..self
        }
    }

    /// Run `next` after this rule returns [`ResultCode::Fail`].
    pub fn on_failure(self, next: impl Into<Arc<RuleNode<C, E, F>>>) -> Self {
        Self {
            on_failure: Some(next.into()),
            ..self
        }
    }

    /// Run `next` after this rule returns [`ResultCode::Na`].
    pub fn on_na(self, next: impl Into<Arc<RuleNode<C, E, F>>>) -> Self {
        Self {
            on_na: Some(next.into()),
            ..self
        }
    }

    /// Run `next` whatever this rule returns.
    pub fn on_any(self, next: impl Into<Arc<RuleNode<C, E, F>>>) -> Self {
        let next = next.into();
        self.on_success(next.clone())
            .on_failure(next.clone())
            .on_na(next)
    }

    /// Return the node to run after this one produced `result_code`.
    pub fn next_rule(&self, result_code: ResultCode) -> Option<&Arc<RuleNode<C, E, F>>> {
        match result_code {
            ResultCode::Ok => self.on_success.as_ref(),
            ResultCode::Fail => self.on_failure.as_ref(),
            ResultCode::Na => self.on_na.as_ref(),
        }
    }
}

impl<C: ?Sized, E, F> Rule<C, E, F> for RuleNode<C, E, F> {
    fn rule_name(&self) -> &str {
        self.rule.rule_name()
    }

    fn verify(&self, context: &C) -> Result<VerificationResult<E>, F> {
        self.rule.verify(context)
    }
}

impl<C: ?Sized, E, F> fmt::Debug for RuleNode<C, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleNode")
            .field("rule", &self.rule.rule_name())
            .field("on_success", &self.on_success)
            .field("on_failure", &self.on_failure)
            .field("on_na", &self.on_na)
            .finish()
    }
}
