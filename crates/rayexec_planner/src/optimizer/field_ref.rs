use crate::expr::Expression;

/// What a single output expression references in its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldReference {
    /// Bare reference to the input column at this index.
    Simple(usize),
    /// Anything else.
    Complex,
}

impl FieldReference {
    pub const fn simple_index(&self) -> Option<usize> {
        match self {
            Self::Simple(idx) => Some(*idx),
            Self::Complex => None,
        }
    }
}

/// Classify each expression as a bare column reference or something more
/// complex.
///
/// This only looks at the shape of the expression. `#0 + 0` is complex even
/// though it always evaluates to `#0`.
pub fn analyze_field_references<'a>(
    exprs: impl IntoIterator<Item = &'a Expression>,
) -> Vec<FieldReference> {
    exprs
        .into_iter()
        .map(|expr| match expr.as_column_ref() {
            Some(column) => FieldReference::Simple(column),
            None => FieldReference::Complex,
        })
        .collect()
}

/// Get the referenced column indices, in order, if every reference is simple.
pub fn simple_field_indices(refs: &[FieldReference]) -> Option<Vec<usize>> {
    refs.iter().map(|r| r.simple_index()).collect()
}
