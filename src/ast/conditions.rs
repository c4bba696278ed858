use crate::ast::{Expr, Literal, LogicalOp, Operand, Operator, Statement};
use serde::{Deserialize, Serialize};

/// An ordered, possibly nested list of boolean predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConditionTree {
    pub criteria: Vec<Criteria>,
}

/// One entry of a condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub predicate: Predicate,
    /// Joins this entry to the previous one. Ignored for the first entry.
    pub prefix: LogicalOp,
    /// Wraps the predicate in `not (...)`.
    pub negate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `left <op> right`, `left in (<list>)`, `left in (<subquery>)`
    Compare {
        left: Expr,
        op: Operator,
        right: Operand,
    },
    /// `expr [not ]between low and high`
    Between {
        expr: Expr,
        low: Operand,
        high: Operand,
        negated: bool,
    },
    /// `expr is [not ]null`
    Null { expr: Expr, negated: bool },
    /// Column-to-column comparison, both sides compiled inline.
    Columns {
        left: Expr,
        op: Operator,
        right: Expr,
    },
    /// Verbatim fragment with bindings.
    Raw(Literal),
    /// `[not ]exists (<subquery>)`
    Exists {
        query: Box<Statement>,
        negated: bool,
    },
    /// A whole sub-tree, rendered parenthesized.
    Group(ConditionTree),
    /// Any expression used as a boolean.
    Expr(Expr),
}

impl Predicate {
    /// Comparison. A list or sub-query under `=` (`<>`) becomes `in`
    /// (`not in`); a null under `=` (`<>`) becomes `is [not] null`.
    pub fn compare(left: impl Into<Expr>, op: Operator, right: impl Into<Operand>) -> Self {
        let left = left.into();
        let right = right.into();

        if right.is_null() && matches!(op, Operator::Eq | Operator::Ne) {
            return Predicate::Null {
                expr: left,
                negated: op == Operator::Ne,
            };
        }

        let op = match &right {
            Operand::List(_) => op.promoted(),
            r if r.is_statement() => op.promoted(),
            _ => op,
        };

        Predicate::Compare { left, op, right }
    }

    pub fn eq(left: impl Into<Expr>, right: impl Into<Operand>) -> Self {
        Self::compare(left, Operator::Eq, right)
    }

    pub fn ne(left: impl Into<Expr>, right: impl Into<Operand>) -> Self {
        Self::compare(left, Operator::Ne, right)
    }

    pub fn is_in(left: impl Into<Expr>, values: impl Into<Operand>) -> Self {
        Predicate::Compare {
            left: left.into(),
            op: Operator::In,
            right: values.into(),
        }
    }

    pub fn not_in(left: impl Into<Expr>, values: impl Into<Operand>) -> Self {
        Predicate::Compare {
            left: left.into(),
            op: Operator::NotIn,
            right: values.into(),
        }
    }

    pub fn between(
        expr: impl Into<Expr>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        Predicate::Between {
            expr: expr.into(),
            low: low.into(),
            high: high.into(),
            negated: false,
        }
    }

    pub fn not_between(
        expr: impl Into<Expr>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        Predicate::Between {
            expr: expr.into(),
            low: low.into(),
            high: high.into(),
            negated: true,
        }
    }

    pub fn like(left: impl Into<Expr>, pattern: impl Into<Operand>) -> Self {
        Self::compare(left, Operator::Like, pattern)
    }

    pub fn not_like(left: impl Into<Expr>, pattern: impl Into<Operand>) -> Self {
        Self::compare(left, Operator::NotLike, pattern)
    }

    pub fn is_null(expr: impl Into<Expr>) -> Self {
        Predicate::Null {
            expr: expr.into(),
            negated: false,
        }
    }

    pub fn is_not_null(expr: impl Into<Expr>) -> Self {
        Predicate::Null {
            expr: expr.into(),
            negated: true,
        }
    }

    pub fn columns(left: impl Into<Expr>, op: Operator, right: impl Into<Expr>) -> Self {
        Predicate::Columns {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    pub fn raw(template: impl Into<String>) -> Self {
        Predicate::Raw(Literal::new(template))
    }

    pub fn raw_with<I, A>(template: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Operand>,
    {
        Predicate::Raw(Literal::with_args(template, args))
    }

    pub fn exists(query: impl Into<Statement>) -> Self {
        Predicate::Exists {
            query: Box::new(query.into()),
            negated: false,
        }
    }

    pub fn not_exists(query: impl Into<Statement>) -> Self {
        Predicate::Exists {
            query: Box::new(query.into()),
            negated: true,
        }
    }

    pub fn group(tree: ConditionTree) -> Self {
        Predicate::Group(tree)
    }

    /// Map form: each `(key, value)` pair becomes `key = ?`, `key in (?)` for
    /// lists, `key in ?` for sub-queries or `key is null`. Keys are raw SQL
    /// text, never quoted. All pairs land in a single raw fragment joined
    /// by `and`.
    pub fn pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        let mut args = Vec::new();
        let parts: Vec<String> = pairs
            .into_iter()
            .map(|(key, value)| {
                let key = key.into();
                let value = value.into();
                if value.is_null() {
                    return format!("{} is null", key);
                }
                let fragment = match &value {
                    Operand::List(_) => format!("{} in (?)", key),
                    v if v.is_statement() => format!("{} in ?", key),
                    _ => format!("{} = ?", key),
                };
                args.push(value);
                fragment
            })
            .collect();

        Predicate::Raw(Literal {
            template: parts.join(" and "),
            args,
        })
    }
}

impl ConditionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn push(&mut self, predicate: Predicate, prefix: LogicalOp, negate: bool) {
        self.criteria.push(Criteria {
            predicate,
            prefix,
            negate,
        });
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.push(predicate, LogicalOp::And, false);
        self
    }

    pub fn or(mut self, predicate: Predicate) -> Self {
        self.push(predicate, LogicalOp::Or, false);
        self
    }

    pub fn and_not(mut self, predicate: Predicate) -> Self {
        self.push(predicate, LogicalOp::And, true);
        self
    }

    pub fn or_not(mut self, predicate: Predicate) -> Self {
        self.push(predicate, LogicalOp::Or, true);
        self
    }

    /// Map form, see [`Predicate::pairs`]. The pairs are and-ed into one
    /// criteria.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        Self::new().and(Predicate::pairs(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Select, Value};

    #[test]
    fn test_list_promotes_to_in() {
        let pred = Predicate::eq("b", vec!["foo", "bar"]);
        assert!(matches!(pred, Predicate::Compare { op: Operator::In, .. }));

        let pred = Predicate::ne("b", vec![1, 2]);
        assert!(matches!(pred, Predicate::Compare { op: Operator::NotIn, .. }));
    }

    #[test]
    fn test_subquery_promotes_to_in() {
        let sub = Select::new().column("id").from("foo");
        let pred = Predicate::eq("key", Statement::from(sub));
        assert!(matches!(pred, Predicate::Compare { op: Operator::In, .. }));
    }

    #[test]
    fn test_null_becomes_null_check() {
        let pred = Predicate::eq("c", Value::Null);
        assert_eq!(
            pred,
            Predicate::Null {
                expr: Expr::id("c"),
                negated: false
            }
        );
    }

    #[test]
    fn test_pairs_build_one_fragment() {
        let pred = Predicate::pairs([
            ("a", Operand::from(123)),
            ("b", Operand::from(vec!["foo", "bar"])),
            ("c", Operand::from(Value::Null)),
        ]);
        match pred {
            Predicate::Raw(lit) => {
                assert_eq!(lit.template, "a = ? and b in (?) and c is null");
                assert_eq!(lit.args.len(), 2);
            }
            other => panic!("expected raw predicate, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_keeps_operator() {
        let pred = Predicate::compare("a", Operator::Gt, 5);
        assert!(matches!(pred, Predicate::Compare { op: Operator::Gt, .. }));
    }
}
