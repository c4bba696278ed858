use crate::ast::{Expr, Statement};
use crate::error::CompileError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scalar value that can be handed to a database driver as a bound
/// parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "'{}'", s),
            Value::Bytes(bytes) => {
                write!(f, "x'")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, "'")
            }
            Value::Uuid(u) => write!(f, "'{}'", u),
            Value::Date(d) => write!(f, "'{}'", d),
            Value::Time(t) => write!(f, "'{}'", t),
            Value::DateTime(ts) => write!(f, "'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(ts: NaiveDateTime) -> Self {
        Value::DateTime(ts)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// JSON scalars map onto values; arrays and objects are not bind targets.
impl TryFrom<serde_json::Value> for Value {
    type Error = CompileError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| CompileError::parameter(format!("number {} out of range", n))),
            },
            serde_json::Value::String(s) => Ok(Value::String(s)),
            other => Err(CompileError::parameter(format!(
                "non-scalar value {} cannot be bound",
                other
            ))),
        }
    }
}

/// Anything that can sit where a bind target is expected: a function
/// argument, a literal argument, an insert or update cell, a comparison
/// operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// No value at all. Renders the dialect's default token where a default
    /// is allowed and is a binding error everywhere else.
    Undefined,
    /// Bound as one placeholder.
    Value(Value),
    /// Bound as comma-separated placeholders, one per element.
    List(Vec<Operand>),
    /// Compiled inline, never bound.
    Expr(Box<Expr>),
}

impl Operand {
    pub fn is_statement(&self) -> bool {
        matches!(self, Operand::Expr(e) if matches!(**e, Expr::Statement(_)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Value(Value::Null))
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

impl From<Expr> for Operand {
    fn from(e: Expr) -> Self {
        Operand::Expr(Box::new(e))
    }
}

impl From<Statement> for Operand {
    fn from(stmt: Statement) -> Self {
        Operand::Expr(Box::new(Expr::Statement(Box::new(stmt))))
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(items: Vec<T>) -> Self {
        Operand::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(opt: Option<T>) -> Self {
        Operand::Value(opt.into())
    }
}

macro_rules! operand_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Value(v.into())
                }
            }
        )*
    };
}

operand_from_value!(
    bool,
    i32,
    u32,
    i64,
    f64,
    &str,
    String,
    Uuid,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_scalars_convert() {
        assert_eq!(Value::try_from(serde_json::json!(12)).unwrap(), Value::Int(12));
        assert_eq!(
            Value::try_from(serde_json::json!("foo")).unwrap(),
            Value::String("foo".into())
        );
        assert_eq!(Value::try_from(serde_json::json!(null)).unwrap(), Value::Null);
    }

    #[test]
    fn test_json_object_is_rejected() {
        let err = Value::try_from(serde_json::json!({ "a": 1 })).unwrap_err();
        assert!(matches!(err, CompileError::InvalidParameter(_)));
    }

    #[test]
    fn test_vec_becomes_list() {
        let op: Operand = vec![1, 2].into();
        assert_eq!(
            op,
            Operand::List(vec![Operand::Value(Value::Int(1)), Operand::Value(Value::Int(2))])
        );
    }

    #[test]
    fn test_none_is_null() {
        let op: Operand = Option::<i64>::None.into();
        assert!(op.is_null());
    }
}
