//! INSERT SQL generation.

use crate::ast::{Insert, InsertSource, Values};
use crate::error::{CompileError, CompileResult};
use crate::transpiler::compiler::join_clauses;
use crate::transpiler::dml::cte::with_clause;
use crate::transpiler::dml::values::build_values;
use crate::transpiler::dml::{column_list, output_clause, returning_clause, target};
use crate::transpiler::Compiler;

/// `with .. insert into t (cols) [output ..] values ..|select ..|default values [returning ..]`
pub fn build_insert(c: &mut Compiler<'_>, insert: &Insert) -> CompileResult<String> {
    let with = with_clause(c, &insert.ctes)?;

    let mut head = format!("insert into {}", target(c, &insert.table)?);
    if !insert.columns.is_empty() {
        head.push_str(&format!(" ({})", column_list(c, &insert.columns)));
    }

    let output = output_clause(c, &insert.returning, "inserted");

    let source = match &insert.source {
        InsertSource::DefaultValues => {
            if !insert.columns.is_empty() {
                return Err(CompileError::expression(
                    "a default values insert cannot name columns",
                ));
            }
            c.dialect().empty_insert().to_string()
        }
        InsertSource::Values(values) => {
            check_arity(values, insert.columns.len())?;
            build_values(c, values)?
        }
        InsertSource::Select(query) => c.compile_statement(query)?,
    };

    let returning = returning_clause(c, &insert.returning)?;

    Ok(join_clauses([with, Some(head), output, Some(source), returning]))
}

/// Every row must have the same arity, equal to the column count when
/// columns are named.
fn check_arity(values: &Values, columns: usize) -> CompileResult<()> {
    let Some(first) = values.rows.first() else {
        return Err(CompileError::parameter("insert without rows"));
    };
    let expected = if columns > 0 { columns } else { first.len() };
    for (i, row) in values.rows.iter().enumerate() {
        if row.len() != expected {
            return Err(CompileError::expression(format!(
                "row {} has {} values, expected {}",
                i + 1,
                row.len(),
                expected
            )));
        }
    }
    Ok(())
}
