//! UPDATE SQL generation.

use crate::ast::Update;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::compiler::join_clauses;
use crate::transpiler::dml::cte::with_clause;
use crate::transpiler::dml::{output_clause, returning_clause, target, where_clause};
use crate::transpiler::Compiler;

pub fn build_update(c: &mut Compiler<'_>, update: &Update) -> CompileResult<String> {
    let with = with_clause(c, &update.ctes)?;
    let head = format!("update {}", target(c, &update.table)?);

    let values = update.flattened_values();
    if values.is_empty() {
        return Err(CompileError::parameter("update without values"));
    }
    let assignments = values
        .into_iter()
        .map(|(column, value)| {
            let column = c.identifier(column);
            Ok(format!("{} = {}", column, c.parameter(value, true)?))
        })
        .collect::<CompileResult<Vec<_>>>()?;
    let set = format!("set {}", assignments.join(", "));

    let output = output_clause(c, &update.returning, "inserted");
    let filter = where_clause(c, &update.conditions)?;
    let returning = returning_clause(c, &update.returning)?;

    Ok(join_clauses([with, Some(head), Some(set), output, filter, returning]))
}
