//! INSERT, UPDATE and DELETE tests.

use super::{assert_sql, assert_sql_params, compile, s};
use crate::ast::*;
use crate::error::CompileError;
use crate::transpiler::{Dialect, ToSql};
use pretty_assertions::assert_eq;

use Dialect::{MySQL, Oracle, Postgres, SQLite, SqlServer, Standard};

// ============= Insert Tests =============

#[test]
fn test_insert_single_row() {
    let query = Insert::into("people")
        .columns(["name", "age"])
        .values([Operand::from("foo"), Operand::from(30)]);
    assert_sql_params(
        &query,
        &[
            (Postgres, "insert into \"people\" (\"name\", \"age\") values ($1, $2)"),
            (MySQL, "insert into `people` (`name`, `age`) values (?, ?)"),
            (SqlServer, "insert into [people] ([name], [age]) values (?, ?)"),
            (SQLite, "insert into \"people\" (\"name\", \"age\") values (?, ?)"),
        ],
        &[s("foo"), Value::Int(30)],
    );
}

#[test]
fn test_insert_many_rows() {
    let query = Insert::into("people")
        .columns(["name", "age"])
        .values([Operand::from("foo"), Operand::from(30)])
        .values([Operand::from("bar"), Operand::from(40)]);
    assert_sql_params(
        &query,
        &[(
            Postgres,
            "insert into \"people\" (\"name\", \"age\") values ($1, $2), ($3, $4)",
        )],
        &[s("foo"), Value::Int(30), s("bar"), Value::Int(40)],
    );
}

#[test]
fn test_insert_default_values() {
    assert_sql(
        &Insert::into("foo"),
        &[
            (Postgres, "insert into \"foo\" default values"),
            (MySQL, "insert into `foo` () values ()"),
            (SqlServer, "insert into [foo] default values"),
            (SQLite, "insert into \"foo\" default values"),
        ],
    );
}

#[test]
fn test_insert_records_fill_missing_cells() {
    let query = Insert::into("coords").records([
        vec![("x", 1)],
        vec![("y", 2)],
        vec![("x", 3), ("y", 4)],
    ]);
    assert_sql_params(
        &query,
        &[
            (
                Postgres,
                "insert into \"coords\" (\"x\", \"y\") values ($1, default), (default, $2), ($3, $4)",
            ),
            (
                MySQL,
                "insert into `coords` (`x`, `y`) values (?, default), (default, ?), (?, ?)",
            ),
            (
                SqlServer,
                "insert into [coords] ([x], [y]) values (?, default), (default, ?), (?, ?)",
            ),
            (
                SQLite,
                "insert into \"coords\" (\"x\", \"y\") values (?, null), (null, ?), (?, ?)",
            ),
        ],
        &[Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)],
    );
}

#[test]
fn test_insert_returning() {
    let query = Insert::into("users")
        .columns(["fname", "lname"])
        .values(["john", "doe"])
        .returning(["id"]);
    assert_sql(
        &query,
        &[
            (
                Postgres,
                "insert into \"users\" (\"fname\", \"lname\") values ($1, $2) returning \"id\"",
            ),
            (
                SqlServer,
                "insert into [users] ([fname], [lname]) output inserted.[id] values (?, ?)",
            ),
            (
                SQLite,
                "insert into \"users\" (\"fname\", \"lname\") values (?, ?) returning \"id\"",
            ),
        ],
    );
}

#[test]
fn test_insert_returning_unsupported() {
    let query = Insert::into("users").values(["john"]).returning(["id"]);
    for dialect in [MySQL, Oracle] {
        let err = query.to_sql_with_dialect(dialect).unwrap_err();
        assert!(
            matches!(err, CompileError::Unsupported { feature: "returning", .. }),
            "{:?}: {}",
            dialect,
            err
        );
    }
}

#[test]
fn test_insert_from_select() {
    let query = Select::new()
        .from(Expr::raw("another_table"))
        .limit(10)
        .insert_into("target", ["a", "b"]);
    assert_sql_params(
        &query,
        &[
            (
                Postgres,
                "insert into \"target\" (\"a\", \"b\") select * from another_table limit $1",
            ),
            (
                MySQL,
                "insert into `target` (`a`, `b`) select * from another_table limit ?",
            ),
            (
                SqlServer,
                "insert into [target] ([a], [b]) select top (?) * from another_table",
            ),
        ],
        &[Value::Int(10)],
    );
}

#[test]
fn test_insert_row_arity_mismatch() {
    let query = Insert::into("people")
        .columns(["name", "age"])
        .values(["foo"]);
    assert!(matches!(
        query.to_sql_with_dialect(Postgres),
        Err(CompileError::InvalidExpression(_))
    ));
}

#[test]
fn test_insert_list_cell_is_rejected() {
    let query = Insert::into("t")
        .columns(["a", "b"])
        .values([Operand::from(vec![1, 2]), Operand::from(3)]);
    for dialect in [Postgres, MySQL, SQLite] {
        assert!(
            matches!(
                query.to_sql_with_dialect(dialect),
                Err(CompileError::InvalidParameter(_))
            ),
            "{:?}",
            dialect
        );
    }
}

#[test]
fn test_insert_default_values_with_columns() {
    let query = Insert::into("people").columns(["name"]);
    assert!(matches!(
        query.to_sql_with_dialect(Postgres),
        Err(CompileError::InvalidExpression(_))
    ));
}

#[test]
fn test_insert_undefined_binds_nothing() {
    let query = Insert::into("t")
        .columns(["a", "b"])
        .values([Operand::Undefined, Operand::from(true)]);
    let compiled = compile(&query, Standard);
    assert_eq!(compiled.sql, "insert into t (a, b) values (default, ?)");
    assert_eq!(compiled.params, vec![Value::Bool(true)]);
}

// ============= Update Tests =============

#[test]
fn test_update() {
    let query = Update::table("users")
        .set("name", "alice")
        .set("visits", Expr::raw("visits + 1"))
        .filter(Predicate::eq("id", 7));
    assert_sql_params(
        &query,
        &[
            (
                Postgres,
                "update \"users\" set \"name\" = $1, \"visits\" = visits + 1 where \"id\" = $2",
            ),
            (
                SqlServer,
                "update [users] set [name] = ?, [visits] = visits + 1 where [id] = ?",
            ),
        ],
        &[s("alice"), Value::Int(7)],
    );
}

#[test]
fn test_update_default_cell() {
    let query = Update::table("users").set("status", Operand::Undefined);
    assert_sql(
        &query,
        &[
            (Postgres, "update \"users\" set \"status\" = default"),
            (SQLite, "update \"users\" set \"status\" = null"),
        ],
    );
}

#[test]
fn test_update_returning() {
    let query = Update::table("users")
        .set("name", "bob")
        .filter(Predicate::eq("id", 1))
        .returning(["id", "name"]);
    assert_sql(
        &query,
        &[
            (
                Postgres,
                "update \"users\" set \"name\" = $1 where \"id\" = $2 returning \"id\", \"name\"",
            ),
            (
                SqlServer,
                "update [users] set [name] = ? output inserted.[id], inserted.[name] where [id] = ?",
            ),
        ],
    );
}

#[test]
fn test_update_list_cell_is_rejected() {
    let query = Update::table("t").set("a", vec![1, 2]);
    assert!(matches!(
        query.to_sql_with_dialect(Postgres),
        Err(CompileError::InvalidParameter(_))
    ));
}

#[test]
fn test_update_without_values() {
    let query = Update::table("users").filter(Predicate::eq("id", 1));
    assert!(matches!(
        query.to_sql_with_dialect(Postgres),
        Err(CompileError::InvalidParameter(_))
    ));
}

// ============= Delete Tests =============

#[test]
fn test_delete() {
    let query = Delete::from("sessions").filter(Predicate::raw_with("expires_at < ?", ["2024-01-01"]));
    assert_sql_params(
        &query,
        &[
            (Postgres, "delete from \"sessions\" where expires_at < $1"),
            (MySQL, "delete from `sessions` where expires_at < ?"),
        ],
        &[s("2024-01-01")],
    );
}

#[test]
fn test_delete_everything() {
    assert_sql(&Delete::from("logs"), &[(Standard, "delete from logs")]);
}

#[test]
fn test_delete_returning() {
    let query = Delete::from("jobs")
        .filter(Predicate::eq("state", "done"))
        .returning(["id"]);
    assert_sql(
        &query,
        &[
            (
                Postgres,
                "delete from \"jobs\" where \"state\" = $1 returning \"id\"",
            ),
            (
                SqlServer,
                "delete from [jobs] output deleted.[id] where [state] = ?",
            ),
        ],
    );
}

#[test]
fn test_delete_with_cte() {
    let stale = Select::new()
        .column(Expr::raw("id"))
        .from("jobs")
        .filter(Predicate::raw_with("age > ?", [30]));
    let query = Delete::from("jobs")
        .with(CommonTable::new("stale", stale))
        .filter(Predicate::raw("id in (select id from stale)"));
    assert_sql(
        &query,
        &[(
            Postgres,
            "with \"stale\" as (select id from \"jobs\" where age > $1) delete from \"jobs\" where id in (select id from stale)",
        )],
    );
}
