//! # sqlweave
//!
//! Build SQL statements as a tree, then compile them for a specific
//! database. Compilation yields the SQL text plus the values bound to its
//! placeholders, ready for any driver.
//!
//! ## Quick Example
//!
//! ```rust
//! use sqlweave::prelude::*;
//!
//! let query = Select::new()
//!     .from("users")
//!     .filter(Predicate::eq("status", "active"))
//!     .limit(10);
//!
//! let compiled = query.to_sql_with_dialect(Dialect::Postgres).unwrap();
//! assert_eq!(
//!     compiled.sql,
//!     "select * from \"users\" where \"status\" = $1 limit $2"
//! );
//! ```
//!
//! ## Dialects
//!
//! | Key        | Placeholder | Quoting   |
//! |------------|-------------|-----------|
//! | `standard` | `?`         | none      |
//! | `postgre`  | `$1`        | `"name"`  |
//! | `mysql`    | `?`         | `` `name` `` |
//! | `sqlite`   | `?`         | `"name"`  |
//! | `mssql`    | `?`         | `[name]`  |
//! | `oracle`   | `?`         | `"name"`  |

pub mod ast;
pub mod config;
pub mod error;
pub mod functions;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::{CompilerOptions, Config};
    pub use crate::error::*;
    pub use crate::functions as fx;
    pub use crate::transpiler::{CompiledQuery, Dialect, ToSql};
}

pub use config::{CompilerOptions, Config};
pub use error::{CompileError, CompileResult};
pub use transpiler::{CompiledQuery, Compiler, Dialect, ToSql};

/// Compile a statement for the dialect named by `dialect_key`
/// (`"postgre"`, `"mssql"`, ..).
///
/// # Example
///
/// ```rust
/// use sqlweave::ast::{Insert, Statement};
///
/// let stmt: Statement = Insert::into("users")
///     .columns(["name"])
///     .values(["alice"])
///     .into();
/// let compiled = sqlweave::compile(&stmt, "mysql").unwrap();
/// assert_eq!(compiled.sql, "insert into `users` (`name`) values (?)");
/// ```
pub fn compile(stmt: &ast::Statement, dialect_key: &str) -> CompileResult<CompiledQuery> {
    let dialect: Dialect = dialect_key.parse()?;
    stmt.to_sql_with_dialect(dialect)
}
