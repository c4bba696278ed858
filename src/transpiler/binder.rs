//! Ordered parameter collection and placeholder numbering.

use crate::ast::Value;
use crate::transpiler::traits::SqlGenerator;

/// Ordered collector of bound values for one compilation.
///
/// Placeholder numbers come from the binder length, so a numbered scheme
/// stays sequential across embedded sub-queries.
#[derive(Debug, Default)]
pub struct Binder {
    params: Vec<Value>,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value and return the placeholder for it.
    pub fn add_param(&mut self, value: Value, generator: &dyn SqlGenerator) -> String {
        self.params.push(value);
        generator.placeholder(self.params.len())
    }

    /// Index (1-based) of the most recently bound value.
    pub fn last_index(&self) -> usize {
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}
