use std::sync::Arc;

use parking_lot::Mutex;
use rayexec_error::Result;

use crate::logical::operator::LogicalOperator;

/// Receives replacements produced by rules.
///
/// Called exactly once for every replacement a rule produces. Deciding
/// whether to keep the replacement is up to the implementation.
pub trait AlternativeSink {
    fn propose_alternative(
        &mut self,
        rule: &'static str,
        original: &Arc<LogicalOperator>,
        replacement: Arc<LogicalOperator>,
    ) -> Result<()>;
}

/// A replacement for some operator produced by a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    /// Name of the rule that produced this alternative.
    pub rule: &'static str,
    pub original: Arc<LogicalOperator>,
    pub replacement: Arc<LogicalOperator>,
}

/// Records every proposed alternative in the order they were proposed.
#[derive(Debug, Clone, Default)]
pub struct AlternativeSet {
    alternatives: Vec<Alternative>,
}

impl AlternativeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all alternatives proposed for `original`.
    ///
    /// Alternatives are looked up by node identity, not structure.
    pub fn alternatives_for<'a>(
        &'a self,
        original: &'a Arc<LogicalOperator>,
    ) -> impl Iterator<Item = &'a Alternative> + 'a {
        self.alternatives
            .iter()
            .filter(move |alt| Arc::ptr_eq(&alt.original, original))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alternative> {
        self.alternatives.iter()
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn into_inner(self) -> Vec<Alternative> {
        self.alternatives
    }
}

impl AlternativeSink for AlternativeSet {
    fn propose_alternative(
        &mut self,
        rule: &'static str,
        original: &Arc<LogicalOperator>,
        replacement: Arc<LogicalOperator>,
    ) -> Result<()> {
        self.alternatives.push(Alternative {
            rule,
            original: original.clone(),
            replacement,
        });
        Ok(())
    }
}

/// Alternative set that can be written to from multiple threads.
#[derive(Debug, Default)]
pub struct SharedAlternatives {
    inner: Mutex<AlternativeSet>,
}

impl SharedAlternatives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> AlternativeSet {
        self.inner.into_inner()
    }
}

impl AlternativeSink for &SharedAlternatives {
    fn propose_alternative(
        &mut self,
        rule: &'static str,
        original: &Arc<LogicalOperator>,
        replacement: Arc<LogicalOperator>,
    ) -> Result<()> {
        self.inner
            .lock()
            .propose_alternative(rule, original, replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_identity() {
        let a = LogicalOperator::empty();
        let b = LogicalOperator::empty();
        assert_eq!(a, b);

        let mut alts = AlternativeSet::new();
        alts.propose_alternative("test", &a, LogicalOperator::limit(1, None, a.clone()))
            .unwrap();

        assert_eq!(1, alts.alternatives_for(&a).count());
        assert_eq!(0, alts.alternatives_for(&b).count());
    }

    #[test]
    fn shared_from_threads() {
        let shared = SharedAlternatives::new();
        let root = LogicalOperator::empty();

        std::thread::scope(|s| {
            for _ in 0..4 {
                let shared = &shared;
                let root = &root;
                s.spawn(move || {
                    let mut sink = shared;
                    sink.propose_alternative("test", root, LogicalOperator::empty())
                        .unwrap();
                });
            }
        });

        let alts = shared.into_inner();
        assert_eq!(4, alts.len());
        assert!(alts.iter().all(|alt| Arc::ptr_eq(&alt.original, &root)));
    }
}
