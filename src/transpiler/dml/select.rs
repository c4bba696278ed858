//! SELECT SQL generation.

use crate::ast::{Expr, Select};
use crate::error::{CompileError, CompileResult};
use crate::transpiler::compiler::join_clauses;
use crate::transpiler::dml::cte::with_clause;
use crate::transpiler::dml::where_clause;
use crate::transpiler::traits::Pagination;
use crate::transpiler::Compiler;

pub fn build_select(c: &mut Compiler<'_>, select: &Select) -> CompileResult<String> {
    if select.is_empty() {
        return Ok(String::new());
    }

    let page = Pagination {
        limit: select.limit.as_ref(),
        offset: select.offset.as_ref(),
        ordered: !select.orders.is_empty(),
        allow_top: true,
    };

    let with = with_clause(c, &select.ctes)?;
    let head = select_clause(c, select, &page)?;
    let from = from_clause(c, select)?;
    let filter = where_clause(c, &select.conditions)?;
    let group = group_clause(c, select)?;
    let order = order_clause(c, &select.orders)?;
    let limit = limit_offset_clause(c, &page)?;

    Ok(join_clauses([with, Some(head), from, filter, group, order, limit]))
}

fn select_clause(
    c: &mut Compiler<'_>,
    select: &Select,
    page: &Pagination<'_>,
) -> CompileResult<String> {
    let mut sql = String::from("select");
    if select.distinct {
        sql.push_str(" distinct");
    }
    if !page.is_empty() {
        let d = c.dialect();
        if let Some(top) = d.select_top(c, page)? {
            sql.push(' ');
            sql.push_str(&top);
        }
    }
    sql.push(' ');
    sql.push_str(&expr_list(c, &select.columns, "*")?);
    Ok(sql)
}

fn from_clause(c: &mut Compiler<'_>, select: &Select) -> CompileResult<Option<String>> {
    let Some(table) = &select.table else {
        if !select.joins.is_empty() {
            return Err(CompileError::join("joins require a table source"));
        }
        return Ok(c.dialect().dual_table().map(|dual| format!("from {}", dual)));
    };

    if !table.is_table_like() {
        return Err(CompileError::expression(format!(
            "{} cannot be used as a table source",
            table.kind()
        )));
    }

    let mut sql = format!("from {}", c.compile_expr(table)?);
    if !select.joins.is_empty() {
        sql.push(' ');
        sql.push_str(&c.join_list(&select.joins)?);
    }
    Ok(Some(sql))
}

/// `group by ..` followed by `having ..`. A having tree without groups still
/// renders.
fn group_clause(c: &mut Compiler<'_>, select: &Select) -> CompileResult<Option<String>> {
    let mut parts = Vec::new();
    if !select.groups.is_empty() {
        parts.push(format!("group by {}", expr_list(c, &select.groups, "")?));
    }
    if !select.havings.is_empty() {
        parts.push(format!("having {}", c.compile_conditions(&select.havings)?));
    }
    Ok((!parts.is_empty()).then(|| parts.join(" ")))
}

pub(crate) fn order_clause(c: &mut Compiler<'_>, orders: &[Expr]) -> CompileResult<Option<String>> {
    if orders.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!("order by {}", expr_list(c, orders, "")?)))
}

pub(crate) fn limit_offset_clause(
    c: &mut Compiler<'_>,
    page: &Pagination<'_>,
) -> CompileResult<Option<String>> {
    if page.is_empty() {
        return Ok(None);
    }
    let d = c.dialect();
    d.limit_offset(c, page)
}

fn expr_list(c: &mut Compiler<'_>, exprs: &[Expr], empty: &str) -> CompileResult<String> {
    if exprs.is_empty() {
        return Ok(empty.to_string());
    }
    let parts = exprs
        .iter()
        .map(|e| c.compile_expr(e))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(parts.join(", "))
}
