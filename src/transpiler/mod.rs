//! SQL compiler for the statement tree.
//!
//! Turns a [`Statement`](crate::ast::Statement) into dialect SQL plus its
//! bound parameters.

pub mod binder;
pub mod compiler;
pub mod conditions;
pub mod dialect;
pub mod dml;
pub mod expr;
pub mod sql;
pub mod template;
pub mod traits;

#[cfg(test)]
mod tests;

pub use binder::Binder;
pub use compiler::{Compile, CompiledQuery, Compiler};
pub use dialect::Dialect;
pub use traits::{Pagination, ReturningStyle, SqlGenerator};

use crate::config::CompilerOptions;
use crate::error::CompileResult;

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Compile with the default (standard) dialect.
    fn to_sql(&self) -> CompileResult<CompiledQuery> {
        self.to_sql_with_dialect(Dialect::default())
    }

    /// Compile with a specific dialect and its default options.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> CompileResult<CompiledQuery> {
        self.to_sql_with_options(dialect, &CompilerOptions::default())
    }

    fn to_sql_with_options(
        &self,
        dialect: Dialect,
        options: &CompilerOptions,
    ) -> CompileResult<CompiledQuery>;
}

impl<T: Compile> ToSql for T {
    fn to_sql_with_options(
        &self,
        dialect: Dialect,
        options: &CompilerOptions,
    ) -> CompileResult<CompiledQuery> {
        let generator = dialect.generator();
        Compiler::with_options(generator.as_ref(), options).compile(self)
    }
}
