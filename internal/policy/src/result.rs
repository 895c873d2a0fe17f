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

use std::{borrow::Cow, fmt};

/// Outcome of a single verification step.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResultCode {
    /// The step was evaluated and its requirement holds.
    Ok,

    /// The step was evaluated and its requirement does not hold.
    Fail,

    /// The step does not apply to the input.
    Na,
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Fail => "FAIL",
            Self::Na => "NA",
        })
    }
}

/// The result of running one [`Rule`], optionally with the results of the
/// rules it ran on its own behalf.
///
/// `E` is the type used to describe why a step did not succeed. A result is
/// never an error in the Rust sense: a [`ResultCode::Fail`] means that the
/// input was understood and did not satisfy the rule.
///
/// [`Rule`]: crate::Rule
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationResult<E> {
    rule_name: Cow<'static, str>,
    result_code: ResultCode,
    error: Option<E>,
    child_results: Vec<VerificationResult<E>>,
}

impl<E> VerificationResult<E> {
    /// Create a leaf result with no error description.
    pub fn new(rule_name: impl Into<Cow<'static, str>>, result_code: ResultCode) -> Self {
        Self {
            rule_name: rule_name.into(),
            result_code,
            error: None,
            child_results: vec![],
        }
    }

    /// Shorthand for a successful leaf result.
    pub fn ok(rule_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(rule_name, ResultCode::Ok)
    }

    /// Shorthand for a failed leaf result carrying a reason.
    pub fn fail(rule_name: impl Into<Cow<'static, str>>, error: E) -> Self {
        Self::new(rule_name, ResultCode::Fail).with_error(error)
    }

    /// Shorthand for a not-applicable leaf result.
    pub fn na(rule_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(rule_name, ResultCode::Na)
    }

    /// Attach a description of the outcome.
    pub fn with_error(self, error: E) -> Self {
        Self {
            error: Some(error),
            ..self
        }
    }

    /// Replace the child results of this result.
    ///
    /// The order of `child_results` is preserved.
    pub fn with_children(self, child_results: Vec<VerificationResult<E>>) -> Self {
        Self {
            child_results,
            ..self
        }
    }

    /// Name of the rule that produced this result.
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Outcome of the rule.
    pub fn result_code(&self) -> ResultCode {
        self.result_code
    }

    /// Return `true` if the outcome is [`ResultCode::Ok`].
    pub fn is_ok(&self) -> bool {
        self.result_code == ResultCode::Ok
    }

    /// Description attached to the outcome, if any.
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// Results of the steps run on behalf of this rule, in execution order.
    pub fn child_results(&self) -> &[VerificationResult<E>] {
        &self.child_results
    }
}

impl<E: Clone> VerificationResult<E> {
    /// Fold a list of results into a single named result.
    ///
    /// The aggregate adopts the code and error of the **last** result in
    /// `child_results`; it is not the conjunction of all of them. An empty
    /// list produces an `OK` result.
    ///
    /// ## Example
    ///
    /// ```
    /// # use cms_verify_policy::{ResultCode, VerificationResult};
    /// let result = VerificationResult::from_results(
    ///     "Aggregate",
    ///     vec![
    ///         VerificationResult::fail("First", "no good".to_string()),
    ///         VerificationResult::ok("Second"),
    ///     ],
    /// );
    ///
    /// assert_eq!(result.result_code(), ResultCode::Ok);
    /// assert_eq!(result.child_results().len(), 2);
    /// ```
    pub fn from_results(
        rule_name: impl Into<Cow<'static, str>>,
        child_results: Vec<VerificationResult<E>>,
    ) -> Self {
        let (result_code, error) = match child_results.last() {
            Some(last) => (last.result_code, last.error.clone()),
            None => (ResultCode::Ok, None),
        };

        Self {
            rule_name: rule_name.into(),
            result_code,
            error,
            child_results,
        }
    }
}

impl<E: fmt::Display> fmt::Display for VerificationResult<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VerificationResult {} [{}]",
            self.rule_name, self.result_code
        )?;

        if !self.child_results.is_empty() {
            f.write_str(":")?;

            for child in &self.child_results {
                for line in child.to_string().split('\n') {
                    write!(f, "\n    {line}")?;
                }
            }
        } else if let Some(error) = &self.error {
            write!(f, ": {error}")?;
        }

        Ok(())
    }
}
