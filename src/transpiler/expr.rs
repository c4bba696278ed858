//! Expression rendering and parameter binding.

use crate::ast::{
    Alias, Expr, Join, JoinConstraint, Literal, Operand, Order, NullsOrder, Table, Union,
    UnionFilter, Value,
};
use crate::error::{CompileError, CompileResult};
use crate::transpiler::Compiler;
use crate::transpiler::template::{parse_template, Segment};

impl Compiler<'_> {
    /// Bind one operand into a single-value position and return its
    /// placeholder text.
    ///
    /// Expressions are compiled inline and `Undefined` renders the default
    /// token only when `allow_default` is set. A list is rejected: it would
    /// expand to several placeholders where one is expected.
    pub fn parameter(&mut self, operand: &Operand, allow_default: bool) -> CompileResult<String> {
        match operand {
            Operand::Undefined if allow_default => Ok(self.dialect().default_token().to_string()),
            Operand::Undefined => Err(CompileError::parameter(
                "undefined value where no default is allowed",
            )),
            Operand::Value(value) => Ok(self.bind(value.clone())),
            Operand::List(_) => Err(CompileError::parameter(
                "a list cannot bind to a single value",
            )),
            Operand::Expr(expr) => self.compile_expr(expr),
        }
    }

    /// Like [`Compiler::parameter`], but a list expands to comma-separated
    /// placeholders. Used for literal `?` arguments.
    pub fn parameter_or_list(&mut self, operand: &Operand) -> CompileResult<String> {
        match operand {
            Operand::List(items) => self.parameterize(items, false),
            other => self.parameter(other, false),
        }
    }

    /// Bind many operands, comma joined. An empty list is an error.
    pub fn parameterize(&mut self, operands: &[Operand], allow_default: bool) -> CompileResult<String> {
        if operands.is_empty() {
            return Err(CompileError::parameter("empty value list"));
        }
        let parts = operands
            .iter()
            .map(|op| self.parameter(op, allow_default))
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(parts.join(", "))
    }

    pub fn compile_expr(&mut self, expr: &Expr) -> CompileResult<String> {
        match expr {
            Expr::Identifier(id) => Ok(self.identifier(&id.name)),
            Expr::Literal(lit) => self.literal(lit),
            Expr::Constant(value) => self.constant(value),
            Expr::Function(f) => {
                let d = self.dialect();
                d.function(self, &f.name, &f.args)
            }
            Expr::Alias(alias) => self.alias(alias),
            Expr::Table(table) => self.table(table),
            Expr::Join(join) => self.join(join),
            Expr::Order(order) => self.order(order),
            Expr::Union(union) => self.union(union),
            Expr::Statement(stmt) => Ok(format!("({})", self.compile_statement(stmt)?)),
        }
    }

    /// Dotted identifier, each segment quoted when auto-quoting is on.
    pub fn identifier(&self, name: &str) -> String {
        if !self.auto_quote() {
            return name.to_string();
        }
        name.split('.')
            .map(|segment| {
                if segment == "*" {
                    segment.to_string()
                } else {
                    self.dialect().quote_identifier(segment)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `name(arg, ..)` with every argument bound or compiled.
    pub fn call(&mut self, name: &str, args: &[Operand]) -> CompileResult<String> {
        let args = args
            .iter()
            .map(|a| self.parameter(a, false))
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(format!("{}({})", name, args.join(", ")))
    }

    /// Inline SQL text for a raw value.
    pub fn constant(&self, value: &Value) -> CompileResult<String> {
        Ok(match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => self.dialect().bool_literal(*b),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => escape_string(s),
            Value::Uuid(u) => escape_string(&u.to_string()),
            Value::Date(d) => escape_string(&d.to_string()),
            Value::Time(t) => escape_string(&t.to_string()),
            Value::DateTime(ts) => escape_string(&ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            Value::Bytes(_) => {
                return Err(CompileError::parameter(
                    "binary data cannot be inlined, bind it instead",
                ));
            }
        })
    }

    pub(crate) fn literal(&mut self, lit: &Literal) -> CompileResult<String> {
        let segments = parse_template(&lit.template)?;
        let mut sql = String::with_capacity(lit.template.len());
        let mut next = 0;

        for segment in segments {
            match segment {
                Segment::Text(text) => sql.push_str(text),
                Segment::Next => {
                    let arg = lit.args.get(next).ok_or_else(|| {
                        CompileError::parameter(format!(
                            "template '{}' has more placeholders than arguments",
                            lit.template
                        ))
                    })?;
                    next += 1;
                    sql.push_str(&self.parameter_or_list(arg)?);
                }
                Segment::Indexed(n) => {
                    let arg = n
                        .checked_sub(1)
                        .and_then(|i| lit.args.get(i))
                        .ok_or_else(|| {
                            CompileError::parameter(format!(
                                "placeholder ?{} out of range in '{}'",
                                n, lit.template
                            ))
                        })?;
                    sql.push_str(&self.parameter_or_list(arg)?);
                }
            }
        }

        Ok(sql)
    }

    fn alias(&mut self, alias: &Alias) -> CompileResult<String> {
        let mut sql = format!(
            "{} as {}",
            self.compile_expr(&alias.value)?,
            self.identifier(&alias.name)
        );
        if !alias.columns.is_empty() {
            let columns: Vec<String> = alias.columns.iter().map(|c| self.identifier(c)).collect();
            sql.push_str(&format!(" ({})", columns.join(", ")));
        }
        Ok(sql)
    }

    fn table(&mut self, table: &Table) -> CompileResult<String> {
        if !table.source.is_table_like() {
            return Err(CompileError::join(format!(
                "{} cannot be used as a table source",
                table.source.kind()
            )));
        }
        let source = self.compile_expr(&table.source)?;
        if table.joins.is_empty() {
            return Ok(source);
        }
        let joins = self.join_list(&table.joins)?;
        Ok(format!("({} {})", source, joins))
    }

    /// Space-joined join fragments (join nodes or raw join text).
    pub fn join_list(&mut self, joins: &[Expr]) -> CompileResult<String> {
        let parts = joins
            .iter()
            .map(|j| match j {
                Expr::Join(join) => self.join(join),
                Expr::Literal(lit) => self.literal(lit),
                other => Err(CompileError::join(format!(
                    "{} is not a join expression",
                    other.kind()
                ))),
            })
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(parts.join(" "))
    }

    fn join(&mut self, join: &Join) -> CompileResult<String> {
        if !join.target.is_table_like() {
            return Err(CompileError::join(format!(
                "{} cannot be a join target",
                join.target.kind()
            )));
        }
        let mut sql = format!("{} join {}", join.kind.as_str(), self.compile_expr(&join.target)?);
        match &join.constraint {
            JoinConstraint::None => {}
            JoinConstraint::On(tree) => {
                if !tree.is_empty() {
                    sql.push_str(&format!(" on ({})", self.compile_conditions(tree)?));
                }
            }
            JoinConstraint::Using(columns) => {
                if columns.is_empty() {
                    return Err(CompileError::join("empty using column list"));
                }
                let columns: Vec<String> = columns.iter().map(|c| self.identifier(c)).collect();
                sql.push_str(&format!(" using ({})", columns.join(", ")));
            }
        }
        Ok(sql)
    }

    fn order(&mut self, order: &Order) -> CompileResult<String> {
        let direction = order.direction.as_str();
        let value = self.compile_expr(&order.value)?;

        let Some(nulls) = order.nulls else {
            return Ok(format!("{} {}", value, direction));
        };

        if self.dialect().supports_nulls_ordering() {
            return Ok(format!("{} {} nulls {}", value, direction, nulls.as_str()));
        }

        // Rendered twice, so anonymous placeholders bind twice.
        let check = match nulls {
            NullsOrder::First => "is null",
            NullsOrder::Last => "is not null",
        };
        let again = self.compile_expr(&order.value)?;
        Ok(format!("{} {}, {} {}", value, check, again, direction))
    }

    pub(crate) fn union(&mut self, union: &Union) -> CompileResult<String> {
        let query = self.compile_statement(&union.query)?;
        Ok(match union.filter {
            UnionFilter::Distinct => format!("union {}", query),
            UnionFilter::All => format!("union all {}", query),
        })
    }
}

/// Single-quote a string, doubling embedded quotes.
pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
