//! Compile context: one dialect, one binder, one statement.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{Expr, Statement, Value};
use crate::config::CompilerOptions;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::binder::Binder;
use crate::transpiler::dml;
use crate::transpiler::traits::SqlGenerator;

/// SQL text plus the values bound to its placeholders, in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl CompiledQuery {
    pub fn to_json(&self) -> CompileResult<String> {
        serde_json::to_string(self)
            .map_err(|e| CompileError::parameter(format!("cannot serialize params: {}", e)))
    }
}

impl std::fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// A node that renders itself through a [`Compiler`].
pub trait Compile {
    fn compile_with(&self, c: &mut Compiler<'_>) -> CompileResult<String>;

    /// Short name for logs.
    fn node_kind(&self) -> &'static str;
}

impl Compile for Statement {
    fn compile_with(&self, c: &mut Compiler<'_>) -> CompileResult<String> {
        c.compile_statement(self)
    }

    fn node_kind(&self) -> &'static str {
        self.kind()
    }
}

impl Compile for Expr {
    fn compile_with(&self, c: &mut Compiler<'_>) -> CompileResult<String> {
        c.compile_expr(self)
    }

    fn node_kind(&self) -> &'static str {
        self.kind()
    }
}

macro_rules! compile_statement_kind {
    ($($ty:ident : $kind:literal => $build:path),* $(,)?) => {
        $(
            impl Compile for crate::ast::$ty {
                fn compile_with(&self, c: &mut Compiler<'_>) -> CompileResult<String> {
                    $build(c, self)
                }

                fn node_kind(&self) -> &'static str {
                    $kind
                }
            }
        )*
    };
}

compile_statement_kind!(
    Select: "select" => dml::select::build_select,
    Insert: "insert" => dml::insert::build_insert,
    Update: "update" => dml::update::build_update,
    Delete: "delete" => dml::delete::build_delete,
    Compound: "compound" => dml::compound::build_compound,
    Values: "values" => dml::values::build_values,
);

/// Renders one statement for one dialect.
///
/// The compiler owns the binder for exactly one [`Compiler::compile`] call,
/// which consumes it.
pub struct Compiler<'d> {
    dialect: &'d dyn SqlGenerator,
    auto_quote: bool,
    binder: Binder,
}

impl<'d> Compiler<'d> {
    pub fn new(dialect: &'d dyn SqlGenerator) -> Self {
        Self {
            dialect,
            auto_quote: dialect.auto_quote_identifiers(),
            binder: Binder::new(),
        }
    }

    pub fn with_options(dialect: &'d dyn SqlGenerator, options: &CompilerOptions) -> Self {
        let mut compiler = Self::new(dialect);
        if let Some(auto_quote) = options.auto_quote_identifiers {
            compiler.auto_quote = auto_quote;
        }
        compiler
    }

    pub fn dialect(&self) -> &'d dyn SqlGenerator {
        self.dialect
    }

    pub fn auto_quote(&self) -> bool {
        self.auto_quote
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    /// Bind a value and return its placeholder.
    pub fn bind(&mut self, value: Value) -> String {
        let dialect = self.dialect;
        self.binder.add_param(value, dialect)
    }

    /// Compile a root node into SQL and params.
    pub fn compile<N: Compile + ?Sized>(mut self, node: &N) -> CompileResult<CompiledQuery> {
        debug!(
            dialect = self.dialect.name(),
            node = node.node_kind(),
            "compiling"
        );
        let sql = node.compile_with(&mut self)?;
        let params = self.binder.into_params();
        debug!(
            dialect = self.dialect.name(),
            sql_len = sql.len(),
            params = params.len(),
            "compiled"
        );
        Ok(CompiledQuery { sql, params })
    }

    /// Render a statement bare (no surrounding parentheses).
    pub fn compile_statement(&mut self, stmt: &Statement) -> CompileResult<String> {
        match stmt {
            Statement::Select(select) => dml::select::build_select(self, select),
            Statement::Insert(insert) => dml::insert::build_insert(self, insert),
            Statement::Update(update) => dml::update::build_update(self, update),
            Statement::Delete(delete) => dml::delete::build_delete(self, delete),
            Statement::Compound(compound) => dml::compound::build_compound(self, compound),
            Statement::Values(values) => dml::values::build_values(self, values),
        }
    }
}

/// Join the non-empty clause fragments with single spaces.
pub(crate) fn join_clauses(parts: impl IntoIterator<Item = Option<String>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_clauses_skips_empty() {
        let sql = join_clauses([
            Some("select *".to_string()),
            None,
            Some(String::new()),
            Some("from t".to_string()),
        ]);
        assert_eq!(sql, "select * from t");
    }

    #[test]
    fn test_compiled_query_json() {
        let query = CompiledQuery {
            sql: "select ?".into(),
            params: vec![Value::Int(1)],
        };
        let json = query.to_json().unwrap();
        assert!(json.contains("\"sql\":\"select ?\""));
    }
}
