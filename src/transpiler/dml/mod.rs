//! DML (Data Manipulation Language) SQL generation.
//!
//! Each builder assembles its statement from clause fragments in a fixed
//! order; a clause with nothing to say contributes no text.

pub mod compound;
pub mod cte;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;
pub mod values;

use crate::error::{CompileError, CompileResult};
use crate::transpiler::traits::ReturningStyle;
use crate::transpiler::Compiler;

fn column_list(c: &Compiler<'_>, columns: &[String]) -> String {
    columns
        .iter()
        .map(|col| c.identifier(col))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Trailing `returning <cols>`.
pub(crate) fn returning_clause(
    c: &Compiler<'_>,
    columns: &[String],
) -> CompileResult<Option<String>> {
    if columns.is_empty() {
        return Ok(None);
    }
    match c.dialect().returning_style() {
        ReturningStyle::Trailing => Ok(Some(format!("returning {}", column_list(c, columns)))),
        ReturningStyle::Output => Ok(None),
        ReturningStyle::Unsupported => {
            Err(CompileError::unsupported(c.dialect().name(), "returning"))
        }
    }
}

/// `output inserted.<col>` (or `deleted.`) for dialects without `returning`.
pub(crate) fn output_clause(c: &Compiler<'_>, columns: &[String], pseudo: &str) -> Option<String> {
    if columns.is_empty() || c.dialect().returning_style() != ReturningStyle::Output {
        return None;
    }
    let columns = columns
        .iter()
        .map(|col| format!("{}.{}", pseudo, c.identifier(col)))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("output {}", columns))
}

/// `where <conditions>` when the tree is not empty.
pub(crate) fn where_clause(
    c: &mut Compiler<'_>,
    tree: &crate::ast::ConditionTree,
) -> CompileResult<Option<String>> {
    if tree.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!("where {}", c.compile_conditions(tree)?)))
}

/// DML target: anything table-like.
pub(crate) fn target(c: &mut Compiler<'_>, table: &crate::ast::Expr) -> CompileResult<String> {
    if !table.is_table_like() {
        return Err(CompileError::expression(format!(
            "{} cannot be a statement target",
            table.kind()
        )));
    }
    c.compile_expr(table)
}
