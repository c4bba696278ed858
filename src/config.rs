//! Compiler configuration, loadable from TOML.
//!
//! ```toml
//! dialect = "mssql"
//!
//! [options]
//! auto_quote_identifiers = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ast::Statement;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::{CompiledQuery, Compiler, Dialect};

/// Per-compile options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Quote every identifier segment. Unset means the dialect's default:
    /// off for `standard`, on for the concrete databases.
    #[serde(default)]
    pub auto_quote_identifiers: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub options: CompilerOptions,
}

impl Config {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            options: CompilerOptions::default(),
        }
    }

    pub fn auto_quote(mut self, enabled: bool) -> Self {
        self.options.auto_quote_identifiers = Some(enabled);
        self
    }

    pub fn from_toml_str(content: &str) -> CompileResult<Self> {
        toml::from_str(content).map_err(|e| CompileError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> CompileResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn compile(&self, stmt: &Statement) -> CompileResult<CompiledQuery> {
        let generator = self.dialect.generator();
        Compiler::with_options(generator.as_ref(), &self.options).compile(stmt)
    }
}
