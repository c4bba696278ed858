//! Compiler test modules.
//!
//! Tests are organized by category:
//! - `select`: SELECT, joins, conditions, grouping, pagination, unions
//! - `dml`: INSERT, UPDATE, DELETE and CTEs
//! - `functions`: builtin function translation per dialect
//! - `dialects`: quoting, placeholders and other adapter details

mod dml;
mod functions;

use pretty_assertions::assert_eq;

use crate::ast::Value;
use crate::transpiler::{CompiledQuery, Dialect, ToSql};

fn compile<N: ToSql>(node: &N, dialect: Dialect) -> CompiledQuery {
    node.to_sql_with_dialect(dialect)
        .unwrap_or_else(|e| panic!("{:?} failed: {}", dialect, e))
}

/// Compile `node` once per dialect and compare the SQL text.
fn assert_sql<N: ToSql>(node: &N, cases: &[(Dialect, &str)]) {
    for (dialect, expected) in cases {
        assert_eq!(compile(node, *dialect).sql, *expected, "dialect {:?}", dialect);
    }
}

/// Like [`assert_sql`], and every dialect binds the same values.
fn assert_sql_params<N: ToSql>(node: &N, cases: &[(Dialect, &str)], params: &[Value]) {
    for (dialect, expected) in cases {
        let query = compile(node, *dialect);
        assert_eq!(query.sql, *expected, "dialect {:?}", dialect);
        assert_eq!(query.params, params, "params for {:?}", dialect);
    }
}

fn s(value: &str) -> Value {
    Value::String(value.to_string())
}
