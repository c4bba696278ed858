//! Dialect adapter contract and shared helpers.

use crate::ast::Operand;
use crate::error::CompileResult;
use crate::transpiler::Compiler;

/// Wrap a single identifier segment in `open`/`close`, doubling any `close`
/// inside it.
pub fn quote_with(name: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(open);
    for ch in name.chars() {
        if ch == close {
            out.push(close);
        }
        out.push(ch);
    }
    out.push(close);
    out
}

/// How a dialect hands back affected rows from a DML statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturningStyle {
    /// Trailing `returning <cols>`
    Trailing,
    /// `output inserted.<col>` / `output deleted.<col>` after the target
    Output,
    Unsupported,
}

/// Limit and offset of one select or compound statement, as handed to the
/// dialect.
#[derive(Debug, Clone, Copy)]
pub struct Pagination<'a> {
    pub limit: Option<&'a Operand>,
    pub offset: Option<&'a Operand>,
    /// The statement already has an `order by` clause.
    pub ordered: bool,
    /// A limit may be moved into the select clause (false for compounds).
    pub allow_top: bool,
}

impl Pagination<'_> {
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

/// `limit ?` / `offset ?` as two independent fragments.
pub fn standard_limit_offset(
    c: &mut Compiler<'_>,
    page: &Pagination<'_>,
) -> CompileResult<Option<String>> {
    let mut parts = Vec::new();
    if let Some(limit) = page.limit {
        parts.push(format!("limit {}", c.parameter(limit, false)?));
    }
    if let Some(offset) = page.offset {
        parts.push(format!("offset {}", c.parameter(offset, false)?));
    }
    Ok((!parts.is_empty()).then(|| parts.join(" ")))
}

/// Trait for dialect-specific SQL generation.
///
/// Hooks that emit text with bindings receive the compiler so the adapter
/// binds in the same order it writes placeholders.
pub trait SqlGenerator: Send + Sync {
    /// Dialect key (`postgre`, `mssql`, ..).
    fn name(&self) -> &'static str;

    /// Quote one identifier segment (no dots).
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '"', '"')
    }

    /// Placeholder for the value at `index` (1-based).
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    /// Boolean literal (true/false vs 1/0).
    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    /// Token rendered for an undefined insert or update cell.
    fn default_token(&self) -> &'static str {
        "default"
    }

    /// Default for the `auto_quote_identifiers` option.
    fn auto_quote_identifiers(&self) -> bool {
        true
    }

    /// Native `nulls first|last` in `order by`.
    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    /// Table named by selects that have columns but no source.
    fn dual_table(&self) -> Option<&'static str> {
        None
    }

    /// Tail of an insert without columns or rows.
    fn empty_insert(&self) -> &'static str {
        "default values"
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Trailing
    }

    /// Render a function call. Dialects override this to rename or rebuild
    /// calls that have no native equivalent.
    fn function(&self, c: &mut Compiler<'_>, name: &str, args: &[Operand]) -> CompileResult<String> {
        c.call(name, args)
    }

    /// Fragment placed right after `select [distinct]`.
    fn select_top(
        &self,
        _c: &mut Compiler<'_>,
        _page: &Pagination<'_>,
    ) -> CompileResult<Option<String>> {
        Ok(None)
    }

    /// Trailing limit/offset fragment.
    fn limit_offset(
        &self,
        c: &mut Compiler<'_>,
        page: &Pagination<'_>,
    ) -> CompileResult<Option<String>> {
        standard_limit_offset(c, page)
    }
}
