use serde::{Deserialize, Serialize};

use crate::ast::{
    ConditionTree, Expr, Join, LogicalOp, Operand, Predicate, Union, UnionFilter,
};

/// A root statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Compound(Compound),
    Values(Values),
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
            Statement::Compound(_) => "compound",
            Statement::Values(_) => "values",
        }
    }
}

/// CTE definition: `name [(columns)] as (query)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub query: Box<Statement>,
}

impl CommonTable {
    pub fn new(name: impl Into<String>, query: impl Into<Statement>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            query: Box::new(query.into()),
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Select {
    #[serde(default)]
    pub ctes: Vec<CommonTable>,
    #[serde(default)]
    pub distinct: bool,
    /// Empty means `*`
    #[serde(default)]
    pub columns: Vec<Expr>,
    #[serde(default)]
    pub table: Option<Expr>,
    /// Join nodes, or raw join fragments
    #[serde(default)]
    pub joins: Vec<Expr>,
    #[serde(default)]
    pub conditions: ConditionTree,
    #[serde(default)]
    pub groups: Vec<Expr>,
    #[serde(default)]
    pub havings: ConditionTree,
    #[serde(default)]
    pub orders: Vec<Expr>,
    #[serde(default)]
    pub limit: Option<Operand>,
    #[serde(default)]
    pub offset: Option<Operand>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: impl Into<Expr>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn columns<I, E>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the table source, replacing any previous one.
    pub fn from(mut self, table: impl Into<Expr>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(Expr::Join(join));
        self
    }

    /// Raw join fragment, e.g. `natural full join ?`.
    pub fn join_expr(mut self, join: impl Into<Expr>) -> Self {
        self.joins.push(join.into());
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::And, false);
        self
    }

    pub fn or_filter(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::Or, false);
        self
    }

    pub fn filter_not(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::And, true);
        self
    }

    pub fn or_filter_not(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::Or, true);
        self
    }

    pub fn group_by<I, E>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.havings.push(predicate, LogicalOp::And, false);
        self
    }

    pub fn or_having(mut self, predicate: Predicate) -> Self {
        self.havings.push(predicate, LogicalOp::Or, false);
        self
    }

    pub fn order_by(mut self, order: impl Into<Expr>) -> Self {
        self.orders.push(order.into());
        self
    }

    pub fn limit(mut self, limit: impl Into<Operand>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<Operand>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn with(mut self, cte: CommonTable) -> Self {
        self.ctes.push(cte);
        self
    }

    pub fn union(self, query: impl Into<Statement>) -> Compound {
        Compound::new(self).union(query)
    }

    pub fn union_all(self, query: impl Into<Statement>) -> Compound {
        Compound::new(self).union_all(query)
    }

    /// `(select ..) as name`
    pub fn alias(self, name: impl Into<String>) -> Expr {
        Expr::from(Statement::from(self)).alias(name)
    }

    /// `insert into table (columns) select ..`
    pub fn insert_into<I, S>(self, table: impl Into<Expr>, columns: I) -> Insert
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Insert::into(table).columns(columns).select(self)
    }

    /// A select with neither columns nor a table renders as nothing.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.table.is_none()
    }
}

/// Where the inserted rows come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum InsertSource {
    #[default]
    DefaultValues,
    Values(Values),
    Select(Box<Statement>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    #[serde(default)]
    pub ctes: Vec<CommonTable>,
    pub table: Expr,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub source: InsertSource,
    #[serde(default)]
    pub returning: Vec<String>,
}

impl Insert {
    pub fn into(table: impl Into<Expr>) -> Self {
        Self {
            ctes: Vec::new(),
            table: table.into(),
            columns: Vec::new(),
            source: InsertSource::DefaultValues,
            returning: Vec::new(),
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one positional row.
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        let row = row.into_iter().map(Into::into).collect();
        match &mut self.source {
            InsertSource::Values(values) => values.rows.push(row),
            source => *source = InsertSource::Values(Values { rows: vec![row] }),
        }
        self
    }

    /// Keyed rows. The column list is the union of all keys in order of
    /// first appearance; a record missing a column gets an undefined cell,
    /// which renders as the dialect's default token.
    pub fn records<R, I, K, V>(mut self, records: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        let records: Vec<Vec<(String, Operand)>> = records
            .into_iter()
            .map(|r| r.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
            .collect();

        let mut columns: Vec<String> = Vec::new();
        for (key, _) in records.iter().flatten() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|col| match record.iter().position(|(k, _)| k == col) {
                        Some(pos) => record.swap_remove(pos).1,
                        None => Operand::Undefined,
                    })
                    .collect()
            })
            .collect();

        self.columns = columns;
        self.source = InsertSource::Values(Values { rows });
        self
    }

    pub fn select(mut self, query: impl Into<Statement>) -> Self {
        self.source = InsertSource::Select(Box::new(query.into()));
        self
    }

    pub fn default_values(mut self) -> Self {
        self.source = InsertSource::DefaultValues;
        self
    }

    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn with(mut self, cte: CommonTable) -> Self {
        self.ctes.push(cte);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub ctes: Vec<CommonTable>,
    pub table: Expr,
    /// Assignments in call order. Duplicates are resolved at compile time.
    #[serde(default)]
    pub values: Vec<(String, Operand)>,
    #[serde(default)]
    pub conditions: ConditionTree,
    #[serde(default)]
    pub returning: Vec<String>,
}

impl Update {
    pub fn table(table: impl Into<Expr>) -> Self {
        Self {
            ctes: Vec::new(),
            table: table.into(),
            values: Vec::new(),
            conditions: ConditionTree::new(),
            returning: Vec::new(),
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Operand>) -> Self {
        self.values.push((column.into(), value.into()));
        self
    }

    pub fn set_all<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        self.values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::And, false);
        self
    }

    pub fn or_filter(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::Or, false);
        self
    }

    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn with(mut self, cte: CommonTable) -> Self {
        self.ctes.push(cte);
        self
    }

    /// Set-values with later duplicates overriding earlier ones, kept at the
    /// position where the column first appeared.
    pub fn flattened_values(&self) -> Vec<(&str, &Operand)> {
        let mut flat: Vec<(&str, &Operand)> = Vec::with_capacity(self.values.len());
        for (column, value) in &self.values {
            match flat.iter_mut().find(|(c, _)| *c == column.as_str()) {
                Some(slot) => slot.1 = value,
                None => flat.push((column.as_str(), value)),
            }
        }
        flat
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    #[serde(default)]
    pub ctes: Vec<CommonTable>,
    pub table: Expr,
    #[serde(default)]
    pub conditions: ConditionTree,
    #[serde(default)]
    pub returning: Vec<String>,
}

impl Delete {
    pub fn from(table: impl Into<Expr>) -> Self {
        Self {
            ctes: Vec::new(),
            table: table.into(),
            conditions: ConditionTree::new(),
            returning: Vec::new(),
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::And, false);
        self
    }

    pub fn or_filter(mut self, predicate: Predicate) -> Self {
        self.conditions.push(predicate, LogicalOp::Or, false);
        self
    }

    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn with(mut self, cte: CommonTable) -> Self {
        self.ctes.push(cte);
        self
    }
}

/// A union chain. Its own order/limit/offset apply to the whole chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub source: Box<Statement>,
    #[serde(default)]
    pub unions: Vec<Union>,
    #[serde(default)]
    pub orders: Vec<Expr>,
    #[serde(default)]
    pub limit: Option<Operand>,
    #[serde(default)]
    pub offset: Option<Operand>,
}

impl Compound {
    pub fn new(source: impl Into<Statement>) -> Self {
        Self {
            source: Box::new(source.into()),
            unions: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn union(mut self, query: impl Into<Statement>) -> Self {
        self.unions.push(Union {
            query: Box::new(query.into()),
            filter: UnionFilter::Distinct,
        });
        self
    }

    pub fn union_all(mut self, query: impl Into<Statement>) -> Self {
        self.unions.push(Union {
            query: Box::new(query.into()),
            filter: UnionFilter::All,
        });
        self
    }

    pub fn order_by(mut self, order: impl Into<Expr>) -> Self {
        self.orders.push(order.into());
        self
    }

    pub fn limit(mut self, limit: impl Into<Operand>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<Operand>) -> Self {
        self.offset = Some(offset.into());
        self
    }
}

/// `values (..), (..)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Values {
    pub rows: Vec<Vec<Operand>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// `(values ..) as name [(columns)]`
    pub fn alias<I, S>(self, name: impl Into<String>, columns: I) -> Expr
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::from(Statement::from(self)).alias_with_columns(name, columns)
    }
}

macro_rules! statement_conversions {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Statement {
                fn from(stmt: $variant) -> Self {
                    Statement::$variant(stmt)
                }
            }

            impl From<$variant> for Expr {
                fn from(stmt: $variant) -> Self {
                    Expr::Statement(Box::new(Statement::$variant(stmt)))
                }
            }

            impl From<$variant> for Operand {
                fn from(stmt: $variant) -> Self {
                    Operand::from(Statement::$variant(stmt))
                }
            }
        )*
    };
}

statement_conversions!(Select, Insert, Update, Delete, Compound, Values);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn test_records_fill_missing_cells() {
        let insert = Insert::into("coords").records([
            vec![("x", 20)],
            vec![("y", 40)],
            vec![("x", 10), ("y", 30)],
        ]);
        assert_eq!(insert.columns, vec!["x", "y"]);
        match insert.source {
            InsertSource::Values(values) => {
                assert_eq!(values.rows[0][1], Operand::Undefined);
                assert_eq!(values.rows[1][0], Operand::Undefined);
                assert_eq!(values.rows[2][0], Operand::Value(Value::Int(10)));
                assert_eq!(values.rows[2][1], Operand::Value(Value::Int(30)));
            }
            other => panic!("expected values source, got {:?}", other),
        }
    }

    #[test]
    fn test_update_flattening_keeps_first_position() {
        let update = Update::table("users")
            .set("a", 1)
            .set("b", 2)
            .set("a", 3);
        let flat = update.flattened_values();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0], ("a", &Operand::Value(Value::Int(3))));
        assert_eq!(flat[1], ("b", &Operand::Value(Value::Int(2))));
    }

    #[test]
    fn test_empty_select() {
        assert!(Select::new().is_empty());
        assert!(!Select::new().from("t").is_empty());
    }

    #[test]
    fn test_union_builds_compound() {
        let compound = Select::new().from("foo").union_all(Select::new().from("bar"));
        assert_eq!(compound.unions.len(), 1);
        assert_eq!(compound.unions[0].filter, UnionFilter::All);
    }
}
