//! Condition tree rendering.

use crate::ast::{ConditionTree, Operand, Predicate};
use crate::error::{CompileError, CompileResult};
use crate::transpiler::Compiler;

impl Compiler<'_> {
    /// Render a tree as `a and not (b) or c`. The first entry's prefix is
    /// never emitted.
    pub fn compile_conditions(&mut self, tree: &ConditionTree) -> CompileResult<String> {
        let mut sql = String::new();

        for (i, criteria) in tree.criteria.iter().enumerate() {
            let fragment = self.compile_predicate(&criteria.predicate)?;
            if i > 0 {
                sql.push(' ');
                sql.push_str(criteria.prefix.as_str());
                sql.push(' ');
            }
            if criteria.negate {
                sql.push_str(&format!("not ({})", fragment));
            } else {
                sql.push_str(&fragment);
            }
        }

        Ok(sql)
    }

    fn compile_predicate(&mut self, predicate: &Predicate) -> CompileResult<String> {
        match predicate {
            Predicate::Compare { left, op, right } => {
                // trees built field by field or deserialized skip the constructor
                let op = if matches!(right, Operand::List(_)) || right.is_statement() {
                    op.promoted()
                } else {
                    *op
                };
                let left = self.compile_expr(left)?;
                let right = match right {
                    Operand::List(items) if op.is_membership() => {
                        format!("({})", self.parameterize(items, false)?)
                    }
                    // statements render parenthesized already
                    r if op.is_membership() && !r.is_statement() => {
                        format!("({})", self.parameter(r, false)?)
                    }
                    r => self.parameter(r, false)?,
                };
                Ok(format!("{} {} {}", left, op.sql_symbol(), right))
            }
            Predicate::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let expr = self.compile_expr(expr)?;
                let low = self.parameter(low, false)?;
                let high = self.parameter(high, false)?;
                let keyword = if *negated { "not between" } else { "between" };
                Ok(format!("{} {} {} and {}", expr, keyword, low, high))
            }
            Predicate::Null { expr, negated } => {
                let expr = self.compile_expr(expr)?;
                Ok(if *negated {
                    format!("{} is not null", expr)
                } else {
                    format!("{} is null", expr)
                })
            }
            Predicate::Columns { left, op, right } => {
                let left = self.compile_expr(left)?;
                let right = self.compile_expr(right)?;
                Ok(format!("{} {} {}", left, op.sql_symbol(), right))
            }
            Predicate::Raw(literal) => self.literal(literal),
            Predicate::Exists { query, negated } => {
                let query = self.compile_statement(query)?;
                let keyword = if *negated { "not exists" } else { "exists" };
                Ok(format!("{} ({})", keyword, query))
            }
            Predicate::Group(tree) => {
                if tree.is_empty() {
                    return Err(CompileError::expression("empty condition group"));
                }
                Ok(format!("({})", self.compile_conditions(tree)?))
            }
            Predicate::Expr(expr) => self.compile_expr(expr),
        }
    }
}
