//! CTE (Common Table Expression) SQL generation.

use crate::ast::CommonTable;
use crate::error::CompileResult;
use crate::transpiler::Compiler;

/// `with a as (..), b (x, y) as (..)`
pub fn with_clause(c: &mut Compiler<'_>, ctes: &[CommonTable]) -> CompileResult<Option<String>> {
    if ctes.is_empty() {
        return Ok(None);
    }
    let parts = ctes
        .iter()
        .map(|cte| build_single_cte(c, cte))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(Some(format!("with {}", parts.join(", "))))
}

/// Build a single CTE definition (without the `with` keyword).
pub fn build_single_cte(c: &mut Compiler<'_>, cte: &CommonTable) -> CompileResult<String> {
    let mut sql = c.identifier(&cte.name);
    if !cte.columns.is_empty() {
        let cols: Vec<String> = cte.columns.iter().map(|col| c.identifier(col)).collect();
        sql.push_str(&format!(" ({})", cols.join(", ")));
    }
    sql.push_str(&format!(" as ({})", c.compile_statement(&cte.query)?));
    Ok(sql)
}
