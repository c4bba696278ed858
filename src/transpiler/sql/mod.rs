//! Per-database adapters.

pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;
pub mod sqlserver;
pub mod standard;

use tracing::trace;

use crate::ast::Operand;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::Compiler;

/// Date/time component extracted by `day()` .. `second()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Day,
    Month,
    Year,
    Hour,
    Minute,
    Second,
}

impl DatePart {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePart::Day => "day",
            DatePart::Month => "month",
            DatePart::Year => "year",
            DatePart::Hour => "hour",
            DatePart::Minute => "minute",
            DatePart::Second => "second",
        }
    }

    /// `strftime` directive.
    pub fn strftime(&self) -> &'static str {
        match self {
            DatePart::Day => "%d",
            DatePart::Month => "%m",
            DatePart::Year => "%Y",
            DatePart::Hour => "%H",
            DatePart::Minute => "%M",
            DatePart::Second => "%S",
        }
    }
}

/// Functions whose spelling differs between databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Concat,
    Length,
    Substr,
    Left,
    Right,
    Trim,
    Strpos,
    Repeat,
    Space,
    Rand,
    Now,
    Utc,
    Today,
    CurrentTime,
    Date,
    Time,
    Part(DatePart),
}

impl Builtin {
    /// Case-insensitive lookup. Zero-argument aliases (`datetime`, `clock`,
    /// ..) only match when called without arguments, so the native
    /// one-argument functions of the same name pass through.
    pub fn lookup(name: &str, argc: usize) -> Option<Self> {
        let builtin = match name.to_ascii_lowercase().as_str() {
            "concat" => Builtin::Concat,
            "length" | "len" => Builtin::Length,
            "substr" | "substring" => Builtin::Substr,
            "left" => Builtin::Left,
            "right" => Builtin::Right,
            "trim" => Builtin::Trim,
            "strpos" | "position" => Builtin::Strpos,
            "repeat" => Builtin::Repeat,
            "space" => Builtin::Space,
            "rand" | "random" if argc == 0 => Builtin::Rand,
            "now" => Builtin::Now,
            "datetime" if argc == 0 => Builtin::Now,
            "utc" | "utc_datetime" => Builtin::Utc,
            "today" | "current_date" => Builtin::Today,
            "current_time" | "curtime" => Builtin::CurrentTime,
            "clock" if argc == 0 => Builtin::CurrentTime,
            "date" => Builtin::Date,
            "time" => Builtin::Time,
            "day" => Builtin::Part(DatePart::Day),
            "month" => Builtin::Part(DatePart::Month),
            "year" => Builtin::Part(DatePart::Year),
            "hour" => Builtin::Part(DatePart::Hour),
            "minute" => Builtin::Part(DatePart::Minute),
            "second" => Builtin::Part(DatePart::Second),
            _ => return None,
        };
        Some(builtin)
    }

    /// Accepted argument counts, inclusive.
    fn arity(&self) -> (usize, usize) {
        match self {
            Builtin::Concat => (1, usize::MAX),
            Builtin::Substr => (2, 3),
            Builtin::Left | Builtin::Right | Builtin::Strpos | Builtin::Repeat => (2, 2),
            Builtin::Length
            | Builtin::Trim
            | Builtin::Space
            | Builtin::Date
            | Builtin::Time
            | Builtin::Part(_) => (1, 1),
            Builtin::Rand
            | Builtin::Now
            | Builtin::Utc
            | Builtin::Today
            | Builtin::CurrentTime => (0, 0),
        }
    }
}

/// Resolve a call to a builtin and check its argument count. `None` means
/// the call is rendered as written.
pub fn resolve(dialect: &str, name: &str, args: &[Operand]) -> CompileResult<Option<Builtin>> {
    let Some(builtin) = Builtin::lookup(name, args.len()) else {
        return Ok(None);
    };
    let (min, max) = builtin.arity();
    if args.len() < min || args.len() > max {
        return Err(CompileError::expression(format!(
            "{}() takes {} arguments, got {}",
            name,
            if min == max {
                min.to_string()
            } else if max == usize::MAX {
                format!("at least {}", min)
            } else {
                format!("{} to {}", min, max)
            },
            args.len()
        )));
    }
    trace!(dialect, function = name, ?builtin, "translating function");
    Ok(Some(builtin))
}

/// Compile each argument, in order.
pub(crate) fn compile_args(c: &mut Compiler<'_>, args: &[Operand]) -> CompileResult<Vec<String>> {
    args.iter().map(|a| c.parameter(a, false)).collect()
}

/// `a || b || c`
pub(crate) fn pipe_concat(c: &mut Compiler<'_>, args: &[Operand]) -> CompileResult<String> {
    Ok(compile_args(c, args)?.join(" || "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Builtin::lookup("SUBSTRING", 3), Some(Builtin::Substr));
        assert_eq!(Builtin::lookup("Now", 0), Some(Builtin::Now));
    }

    #[test]
    fn test_zero_arg_aliases_need_no_args() {
        assert_eq!(Builtin::lookup("datetime", 0), Some(Builtin::Now));
        assert_eq!(Builtin::lookup("datetime", 1), None);
        assert_eq!(Builtin::lookup("random", 0), Some(Builtin::Rand));
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(Builtin::lookup("upper", 1), None);
    }

    #[test]
    fn test_arity_error() {
        let err = resolve("postgre", "left", &[Operand::from(1)]).unwrap_err();
        assert!(matches!(err, CompileError::InvalidExpression(_)));
    }
}
