use crate::ast::{
    ConditionTree, JoinKind, NullsOrder, Operand, SortOrder, Statement, UnionFilter, Value,
};
use crate::error::{CompileError, CompileResult};
use serde::{Deserialize, Serialize};

/// An expression node.
///
/// Nodes are plain data: cloning yields an independent copy that can be
/// reused across statements, and equality is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Dotted name (`schema.table.column`)
    Identifier(Identifier),
    /// Verbatim SQL template with `?` / `?N` placeholders
    Literal(Literal),
    /// A value explicitly marked raw: inlined, never bound
    Constant(Value),
    Function(Function),
    Alias(Alias),
    Table(Table),
    Join(Join),
    Order(Order),
    Union(Union),
    /// Sub-statement, always embedded parenthesized
    Statement(Box<Statement>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub template: String,
    pub args: Vec<Operand>,
}

impl Literal {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, A>(template: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Operand>,
    {
        Self {
            template: template.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub args: Vec<Operand>,
}

/// `value as name [(columns)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub value: Box<Expr>,
    pub name: String,
    pub columns: Vec<String>,
}

/// A table source with the joins attached to it. With joins it renders
/// parenthesized, which is how join precedence is expressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub source: Box<Expr>,
    pub joins: Vec<Expr>,
}

impl Table {
    pub fn new(source: impl Into<Expr>) -> Self {
        Self {
            source: Box::new(source.into()),
            joins: Vec::new(),
        }
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(Expr::Join(join));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum JoinConstraint {
    #[default]
    None,
    /// `on (<conditions>)`
    On(ConditionTree),
    /// `using (<columns>)`
    Using(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub target: Box<Expr>,
    pub constraint: JoinConstraint,
}

impl Join {
    pub fn new(kind: JoinKind, target: impl Into<Expr>) -> Self {
        Self {
            kind,
            target: Box::new(target.into()),
            constraint: JoinConstraint::None,
        }
    }

    pub fn inner(target: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Inner, target)
    }

    pub fn left(target: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Left, target)
    }

    pub fn right(target: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Right, target)
    }

    pub fn cross(target: impl Into<Expr>) -> Self {
        Self::new(JoinKind::Cross, target)
    }

    /// Attach an `on` condition. Fails when the join already has a `using`
    /// column list.
    pub fn on(mut self, conditions: ConditionTree) -> CompileResult<Self> {
        match &mut self.constraint {
            JoinConstraint::Using(_) => Err(CompileError::join(
                "a join cannot combine `on` conditions with a `using` clause",
            )),
            JoinConstraint::On(existing) => {
                existing.criteria.extend(conditions.criteria);
                Ok(self)
            }
            JoinConstraint::None => {
                self.constraint = JoinConstraint::On(conditions);
                Ok(self)
            }
        }
    }

    /// Attach a `using` column list. Fails when the join already has `on`
    /// conditions.
    pub fn using<I, S>(mut self, columns: I) -> CompileResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into);
        match &mut self.constraint {
            JoinConstraint::On(_) => Err(CompileError::join(
                "a join cannot combine a `using` clause with `on` conditions",
            )),
            JoinConstraint::Using(existing) => {
                existing.extend(columns);
                Ok(self)
            }
            JoinConstraint::None => {
                self.constraint = JoinConstraint::Using(columns.collect());
                Ok(self)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub value: Box<Expr>,
    pub direction: SortOrder,
    pub nulls: Option<NullsOrder>,
}

impl Order {
    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    pub query: Box<Statement>,
    pub filter: UnionFilter,
}

impl Expr {
    /// Identifier, quoted segment by segment when auto-quoting is on.
    pub fn id(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier { name: name.into() })
    }

    /// Raw template without arguments.
    pub fn raw(template: impl Into<String>) -> Self {
        Expr::Literal(Literal::new(template))
    }

    /// Raw template with positional arguments.
    pub fn raw_with<I, A>(template: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Operand>,
    {
        Expr::Literal(Literal::with_args(template, args))
    }

    /// Inline constant (`'foo'`, `123`, `null`).
    pub fn esc(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn func<I, A>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Operand>,
    {
        Expr::Function(Function {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    pub fn table(name: impl Into<String>) -> Table {
        Table::new(Expr::id(name))
    }

    /// `self as name`
    pub fn alias(self, name: impl Into<String>) -> Self {
        Expr::Alias(Alias {
            value: Box::new(self),
            name: name.into(),
            columns: Vec::new(),
        })
    }

    /// `self as name (col1, col2, ..)`
    pub fn alias_with_columns<I, S>(self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Alias(Alias {
            value: Box::new(self),
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        })
    }

    pub fn asc(self) -> Order {
        Order {
            value: Box::new(self),
            direction: SortOrder::Asc,
            nulls: None,
        }
    }

    pub fn desc(self) -> Order {
        Order {
            value: Box::new(self),
            direction: SortOrder::Desc,
            nulls: None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "identifier",
            Expr::Literal(_) => "literal",
            Expr::Constant(_) => "constant",
            Expr::Function(_) => "function",
            Expr::Alias(_) => "alias",
            Expr::Table(_) => "table",
            Expr::Join(_) => "join",
            Expr::Order(_) => "order",
            Expr::Union(_) => "union",
            Expr::Statement(_) => "statement",
        }
    }

    /// Whether the node can stand where a table is expected (`from`, join
    /// target, DML target).
    pub fn is_table_like(&self) -> bool {
        matches!(
            self,
            Expr::Identifier(_)
                | Expr::Literal(_)
                | Expr::Function(_)
                | Expr::Alias(_)
                | Expr::Table(_)
                | Expr::Statement(_)
        )
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::id(name)
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::id(name)
    }
}

impl From<Identifier> for Expr {
    fn from(id: Identifier) -> Self {
        Expr::Identifier(id)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<Table> for Expr {
    fn from(table: Table) -> Self {
        Expr::Table(table)
    }
}

impl From<Join> for Expr {
    fn from(join: Join) -> Self {
        Expr::Join(join)
    }
}

impl From<Order> for Expr {
    fn from(order: Order) -> Self {
        Expr::Order(order)
    }
}

impl From<Statement> for Expr {
    fn from(stmt: Statement) -> Self {
        Expr::Statement(Box::new(stmt))
    }
}
