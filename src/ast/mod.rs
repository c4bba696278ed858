//! Statement and expression tree.
//!
//! Nodes are plain data with `#[derive(Clone, PartialEq)]`: a clone is an
//! independent copy safe to embed in another statement, and equality is
//! structural. Rendering lives in [`crate::transpiler`].

pub mod conditions;
pub mod expr;
pub mod operators;
pub mod statement;
pub mod values;

pub use conditions::*;
pub use expr::*;
pub use operators::*;
pub use statement::*;
pub use values::*;
