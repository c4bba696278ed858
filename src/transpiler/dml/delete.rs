//! DELETE SQL generation.

use crate::ast::Delete;
use crate::error::CompileResult;
use crate::transpiler::compiler::join_clauses;
use crate::transpiler::dml::cte::with_clause;
use crate::transpiler::dml::{output_clause, returning_clause, target, where_clause};
use crate::transpiler::Compiler;

pub fn build_delete(c: &mut Compiler<'_>, delete: &Delete) -> CompileResult<String> {
    let with = with_clause(c, &delete.ctes)?;
    let head = format!("delete from {}", target(c, &delete.table)?);
    let output = output_clause(c, &delete.returning, "deleted");
    let filter = where_clause(c, &delete.conditions)?;
    let returning = returning_clause(c, &delete.returning)?;

    Ok(join_clauses([with, Some(head), output, filter, returning]))
}
