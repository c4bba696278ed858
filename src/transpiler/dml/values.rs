//! VALUES lists.

use crate::ast::Values;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::Compiler;

/// `values (..), (..)`. Undefined cells render the default token.
pub fn build_values(c: &mut Compiler<'_>, values: &Values) -> CompileResult<String> {
    if values.rows.is_empty() {
        return Err(CompileError::parameter("values without rows"));
    }
    let rows = values
        .rows
        .iter()
        .map(|row| Ok(format!("({})", c.parameterize(row, true)?)))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(format!("values {}", rows.join(", ")))
}
