//! Logical plans and rule based rewrites over them.
//!
//! Plans are trees of reference counted, immutable operators. Rules match a
//! shape in the plan and produce replacement subtrees without touching the
//! original, so the same plan can be explored from many threads at once.

pub mod datatype;
pub mod expr;
pub mod logical;
pub mod optimizer;
pub mod table;
