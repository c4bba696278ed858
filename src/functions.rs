//! Shorthand constructors for common expressions and SQL functions.
//!
//! Plain values passed as arguments are bound; pass an [`Expr`] (e.g.
//! [`id`] or [`esc`]) to inline it instead. The dialect decides how each
//! function is spelled.

use crate::ast::{Expr, Operand, Value, Values};

pub fn id(name: impl Into<String>) -> Expr {
    Expr::id(name)
}

pub fn esc(value: impl Into<Value>) -> Expr {
    Expr::esc(value)
}

pub fn raw(template: impl Into<String>) -> Expr {
    Expr::raw(template)
}

pub fn raw_with<I, A>(template: impl Into<String>, args: I) -> Expr
where
    I: IntoIterator<Item = A>,
    A: Into<Operand>,
{
    Expr::raw_with(template, args)
}

fn call(name: &str, args: Vec<Operand>) -> Expr {
    Expr::func(name, args)
}

macro_rules! unary_functions {
    ($($(#[$doc:meta])* $fn_name:ident => $sql:literal),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(value: impl Into<Operand>) -> Expr {
                call($sql, vec![value.into()])
            }
        )*
    };
}

macro_rules! nullary_functions {
    ($($(#[$doc:meta])* $fn_name:ident => $sql:literal),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name() -> Expr {
                call($sql, Vec::new())
            }
        )*
    };
}

unary_functions!(
    upper => "upper",
    lower => "lower",
    length => "length",
    trim => "trim",
    ltrim => "ltrim",
    rtrim => "rtrim",
    /// String of `n` spaces.
    space => "space",
    abs => "abs",
    /// Date part of a timestamp.
    date => "date",
    /// Time part of a timestamp, to the second.
    time => "time",
    day => "day",
    month => "month",
    year => "year",
    hour => "hour",
    minute => "minute",
    second => "second",
);

nullary_functions!(
    /// Random number in `[0, 1)`.
    rand => "rand",
    /// Local timestamp, to the second.
    now => "now",
    /// UTC timestamp, to the second.
    utc => "utc",
    today => "current_date",
    current_time => "current_time",
);

pub fn concat<I, A>(parts: I) -> Expr
where
    I: IntoIterator<Item = A>,
    A: Into<Operand>,
{
    Expr::func("concat", parts)
}

pub fn replace(
    text: impl Into<Operand>,
    pattern: impl Into<Operand>,
    replacement: impl Into<Operand>,
) -> Expr {
    call("replace", vec![text.into(), pattern.into(), replacement.into()])
}

/// `substr(text, start[, length])`, 1-based.
pub fn substr(text: impl Into<Operand>, start: impl Into<Operand>, length: Option<Operand>) -> Expr {
    let mut args = vec![text.into(), start.into()];
    args.extend(length);
    call("substr", args)
}

pub fn left(text: impl Into<Operand>, length: impl Into<Operand>) -> Expr {
    call("left", vec![text.into(), length.into()])
}

pub fn right(text: impl Into<Operand>, length: impl Into<Operand>) -> Expr {
    call("right", vec![text.into(), length.into()])
}

/// Position (1-based) of `needle` in `text`, 0 when absent.
pub fn strpos(text: impl Into<Operand>, needle: impl Into<Operand>) -> Expr {
    call("strpos", vec![text.into(), needle.into()])
}

pub fn repeat(text: impl Into<Operand>, count: impl Into<Operand>) -> Expr {
    call("repeat", vec![text.into(), count.into()])
}

pub fn round(value: impl Into<Operand>, digits: impl Into<Operand>) -> Expr {
    call("round", vec![value.into(), digits.into()])
}

/// `count(*)` when `None`.
pub fn count(value: Option<Operand>) -> Expr {
    match value {
        Some(v) => call("count", vec![v]),
        None => Expr::raw("count(*)"),
    }
}

/// Standalone `values (..), (..)` list.
pub fn values<R, I, V>(rows: R) -> Values
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = V>,
    V: Into<Operand>,
{
    rows.into_iter().fold(Values::new(), |values, row| values.row(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Function;

    #[test]
    fn test_substr_optional_length() {
        let Expr::Function(Function { args, .. }) = substr(id("name"), 2, None) else {
            panic!("expected function");
        };
        assert_eq!(args.len(), 2);

        let Expr::Function(Function { args, .. }) = substr(id("name"), 2, Some(3.into())) else {
            panic!("expected function");
        };
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_values_rows() {
        let list = values([vec![Operand::from(1), "foo".into()], vec![2.into(), "bar".into()]]);
        assert_eq!(list.rows.len(), 2);
    }
}
