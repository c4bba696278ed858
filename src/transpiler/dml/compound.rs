//! UNION chains.

use crate::ast::Compound;
use crate::error::CompileResult;
use crate::transpiler::compiler::join_clauses;
use crate::transpiler::dml::select::{limit_offset_clause, order_clause};
use crate::transpiler::traits::Pagination;
use crate::transpiler::Compiler;

/// `<source> union [all] <query> .. [order by ..] [limit/offset]`
pub fn build_compound(c: &mut Compiler<'_>, compound: &Compound) -> CompileResult<String> {
    let source = c.compile_statement(&compound.source)?;

    let unions = compound
        .unions
        .iter()
        .map(|u| c.union(u))
        .collect::<CompileResult<Vec<_>>>()?;

    let order = order_clause(c, &compound.orders)?;
    let page = Pagination {
        limit: compound.limit.as_ref(),
        offset: compound.offset.as_ref(),
        ordered: !compound.orders.is_empty(),
        allow_top: false,
    };
    let limit = limit_offset_clause(c, &page)?;

    let mut parts = vec![Some(source)];
    parts.extend(unions.into_iter().map(Some));
    parts.push(order);
    parts.push(limit);
    Ok(join_clauses(parts))
}
