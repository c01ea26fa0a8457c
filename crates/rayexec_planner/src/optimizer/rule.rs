use std::sync::Arc;

use rayexec_error::{RayexecError, Result};
use tracing::trace;

use super::matcher::{match_operand, MatchBinding};
use super::operand::Operand;
use crate::logical::operator::LogicalOperator;

/// Function called with the operators bound by a successful match.
///
/// Returns `Ok(None)` if the rule declines to rewrite the matched operators.
/// Errors are reserved for inputs that break plan invariants.
pub type FireFn = fn(&MatchBinding) -> Result<Option<Arc<LogicalOperator>>>;

/// A named rewrite of some plan shape into an equivalent plan.
///
/// Rules hold no state. The same rule can be fired any number of times, from
/// any number of threads.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    /// Shape of the plan this rule applies to.
    pub operand: Operand,
    pub fire: FireFn,
}

impl RewriteRule {
    /// Match `root` against this rule's operand, firing the rule if it
    /// matches.
    ///
    /// Returns the replacement for `root` if there is one.
    pub fn apply(&self, root: &Arc<LogicalOperator>) -> Result<Option<Arc<LogicalOperator>>> {
        let binding = match match_operand(root, &self.operand) {
            Some(binding) => binding,
            None => return Ok(None),
        };

        let replacement = (self.fire)(&binding)?;
        if replacement.is_none() {
            trace!(rule = self.name, "rule declined");
        }

        Ok(replacement)
    }
}

/// Rules known to the optimizer.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub(super) rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, erroring if a rule with the same name already exists.
    pub fn with_rule(mut self, rule: RewriteRule) -> Result<Self> {
        if self.get(rule.name).is_some() {
            return Err(RayexecError::new(format!(
                "Duplicate rule name '{}'",
                rule.name
            )));
        }
        self.rules.push(rule);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
