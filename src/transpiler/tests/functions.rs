//! Builtin function translation.

use super::{assert_sql, assert_sql_params, s};
use crate::ast::{Expr, Value};
use crate::error::CompileError;
use crate::functions::*;
use crate::transpiler::{Dialect, ToSql};

use Dialect::{MySQL, Oracle, Postgres, SQLite, SqlServer, Standard};

const STAMP: &str = "2017-03-02 09:20:25";

// ============= String Function Tests =============

#[test]
fn test_upper_lower() {
    assert_sql(
        &upper(esc("foo")),
        &[
            (Postgres, "upper('foo')"),
            (MySQL, "upper('foo')"),
            (SqlServer, "upper('foo')"),
            (SQLite, "upper('foo')"),
        ],
    );
    assert_sql(
        &lower(id("bar")),
        &[
            (Postgres, "lower(\"bar\")"),
            (MySQL, "lower(`bar`)"),
            (SqlServer, "lower([bar])"),
            (Standard, "lower(bar)"),
        ],
    );
}

#[test]
fn test_concat() {
    let expr = concat([id("first_name"), esc(" "), id("last_name")]);
    assert_sql(
        &expr,
        &[
            (Postgres, "concat(\"first_name\", ' ', \"last_name\")"),
            (MySQL, "concat(`first_name`, ' ', `last_name`)"),
            (SqlServer, "concat([first_name], ' ', [last_name])"),
            (SQLite, "\"first_name\" || ' ' || \"last_name\""),
            (Oracle, "\"first_name\" || ' ' || \"last_name\""),
        ],
    );
}

#[test]
fn test_length() {
    assert_sql(
        &length(esc("foo")),
        &[
            (Postgres, "length('foo')"),
            (MySQL, "length('foo')"),
            (SqlServer, "len('foo')"),
            (SQLite, "length('foo')"),
        ],
    );
}

#[test]
fn test_replace() {
    assert_sql_params(
        &replace(id("id"), esc("foo"), "bar"),
        &[
            (Postgres, "replace(\"id\", 'foo', $1)"),
            (MySQL, "replace(`id`, 'foo', ?)"),
            (SqlServer, "replace([id], 'foo', ?)"),
            (SQLite, "replace(\"id\", 'foo', ?)"),
        ],
        &[s("bar")],
    );
}

#[test]
fn test_substr_with_length() {
    assert_sql_params(
        &substr(id("first_name"), 1, Some(1.into())),
        &[
            (Postgres, "substr(\"first_name\", $1, $2)"),
            (MySQL, "substr(`first_name`, ?, ?)"),
            (SqlServer, "substring([first_name], ?, ?)"),
            (SQLite, "substr(\"first_name\", ?, ?)"),
        ],
        &[Value::Int(1), Value::Int(1)],
    );
}

#[test]
fn test_substr_without_length() {
    assert_sql_params(
        &substr(esc("abcdefgh"), 4, None),
        &[
            (Postgres, "substr('abcdefgh', $1)"),
            (SqlServer, "substring('abcdefgh', ?, len('abcdefgh'))"),
            (SQLite, "substr('abcdefgh', ?)"),
        ],
        &[Value::Int(4)],
    );
}

#[test]
fn test_trims() {
    assert_sql(
        &trim(id("name")),
        &[
            (Postgres, "trim(\"name\")"),
            (SqlServer, "rtrim(ltrim([name]))"),
        ],
    );
    assert_sql(
        &rtrim(esc("foo  ")),
        &[(SqlServer, "rtrim('foo  ')"), (SQLite, "rtrim('foo  ')")],
    );
    assert_sql(&ltrim(id("name")), &[(MySQL, "ltrim(`name`)")]);
}

#[test]
fn test_left_right() {
    assert_sql_params(
        &left(id("first_name"), 3),
        &[
            (Postgres, "left(\"first_name\", $1)"),
            (MySQL, "left(`first_name`, ?)"),
            (SqlServer, "left([first_name], ?)"),
            (SQLite, "substr(\"first_name\", 1, ?)"),
            (Oracle, "substr(\"first_name\", 1, ?)"),
        ],
        &[Value::Int(3)],
    );
    assert_sql_params(
        &right(esc("foobar"), 3),
        &[
            (Postgres, "right('foobar', $1)"),
            (SQLite, "substr('foobar', -?)"),
        ],
        &[Value::Int(3)],
    );
}

#[test]
fn test_right_negates_compound_length() {
    assert_sql(
        &right(id("name"), raw("n + 1")),
        &[
            (SQLite, "substr(\"name\", -(n + 1))"),
            (Oracle, "substr(\"name\", -(n + 1))"),
        ],
    );
}

#[test]
fn test_strpos() {
    assert_sql_params(
        &strpos(id("full_name"), "foo"),
        &[
            (Postgres, "strpos(\"full_name\", $1)"),
            (MySQL, "instr(`full_name`, ?)"),
            (SqlServer, "charindex(?, [full_name])"),
            (SQLite, "instr(\"full_name\", ?)"),
            (Oracle, "instr(\"full_name\", ?)"),
        ],
        &[s("foo")],
    );
}

#[test]
fn test_repeat() {
    assert_sql_params(
        &repeat(esc("sql"), 3),
        &[
            (Postgres, "repeat('sql', $1)"),
            (MySQL, "repeat('sql', ?)"),
            (SqlServer, "replicate('sql', ?)"),
            (
                SQLite,
                "replace(substr(quote(zeroblob((? + 1) / 2)), 3, ?1), '0', 'sql')",
            ),
        ],
        &[Value::Int(3)],
    );
}

#[test]
fn test_space() {
    assert_sql_params(
        &space(5),
        &[
            (Postgres, "repeat(' ', $1)"),
            (MySQL, "space(?)"),
            (SqlServer, "space(?)"),
            (
                SQLite,
                "replace(substr(quote(zeroblob((? + 1) / 2)), 3, ?1), '0', ' ')",
            ),
            (Oracle, "rpad(' ', ?)"),
        ],
        &[Value::Int(5)],
    );
}

#[test]
fn test_sqlite_repeat_refers_to_its_own_binding() {
    let expr = concat([Expr::from(repeat(esc("ab"), 2)), Expr::from(space(3))]);
    let query = expr.to_sql_with_dialect(SQLite).unwrap();
    assert_eq!(
        query.sql,
        "replace(substr(quote(zeroblob((? + 1) / 2)), 3, ?1), '0', 'ab') || replace(substr(quote(zeroblob((? + 1) / 2)), 3, ?2), '0', ' ')"
    );
    assert_eq!(query.params, vec![Value::Int(2), Value::Int(3)]);
}

// ============= Math Function Tests =============

#[test]
fn test_rand() {
    assert_sql(
        &rand(),
        &[
            (Postgres, "rand()"),
            (MySQL, "rand()"),
            (SqlServer, "rand()"),
            (SQLite, "(random() / 18446744073709551616 + .5)"),
            (Oracle, "dbms_random.value"),
        ],
    );
    assert_sql(
        &Expr::func("random", Vec::<Expr>::new()),
        &[
            (MySQL, "rand()"),
            (SqlServer, "rand()"),
            (SQLite, "(random() / 18446744073709551616 + .5)"),
            (Oracle, "dbms_random.value"),
        ],
    );
}

#[test]
fn test_abs_and_round() {
    assert_sql_params(
        &abs(-9),
        &[(Postgres, "abs($1)"), (MySQL, "abs(?)")],
        &[Value::Int(-9)],
    );
    assert_sql_params(
        &round(123.4545, 2),
        &[(Postgres, "round($1, $2)"), (SqlServer, "round(?, ?)")],
        &[Value::Float(123.4545), Value::Int(2)],
    );
}

// ============= Date & Time Function Tests =============

#[test]
fn test_now_and_utc() {
    assert_sql(
        &now(),
        &[
            (Postgres, "localtimestamp(0)"),
            (MySQL, "now()"),
            (SqlServer, "cast(getdate() as datetime2(0))"),
            (SQLite, "datetime('now', 'localtime')"),
            (Oracle, "localtimestamp(0)"),
        ],
    );
    assert_sql(
        &utc(),
        &[
            (Postgres, "current_timestamp(0) at time zone 'UTC'"),
            (MySQL, "utc_timestamp()"),
            (SqlServer, "cast(getutcdate() as datetime2(0))"),
            (SQLite, "datetime('now', 'utc')"),
        ],
    );
}

#[test]
fn test_today_and_current_time() {
    assert_sql(
        &today(),
        &[
            (Postgres, "current_date"),
            (MySQL, "current_date()"),
            (SqlServer, "cast(getdate() as date)"),
            (SQLite, "date('now', 'localtime')"),
            (Oracle, "trunc(sysdate)"),
        ],
    );
    assert_sql(
        &current_time(),
        &[
            (Postgres, "current_time(0)"),
            (MySQL, "current_time()"),
            (SqlServer, "cast(getdate() as time(0))"),
            (SQLite, "time('now', 'localtime')"),
        ],
    );
}

#[test]
fn test_date_and_time() {
    assert_sql(
        &date(esc(STAMP)),
        &[
            (Postgres, "'2017-03-02 09:20:25'::date"),
            (MySQL, "date('2017-03-02 09:20:25')"),
            (SqlServer, "cast('2017-03-02 09:20:25' as date)"),
            (SQLite, "date('2017-03-02 09:20:25')"),
        ],
    );
    assert_sql(
        &time(id("created_at")),
        &[
            (Postgres, "\"created_at\"::time(0)"),
            (MySQL, "time(`created_at`)"),
            (SqlServer, "cast([created_at] as time(0))"),
            (SQLite, "time(\"created_at\")"),
        ],
    );
}

#[test]
fn test_date_parts() {
    assert_sql(
        &day(esc(STAMP)),
        &[
            (Postgres, "extract(day from '2017-03-02 09:20:25')"),
            (MySQL, "day('2017-03-02 09:20:25')"),
            (SqlServer, "day('2017-03-02 09:20:25')"),
            (SQLite, "cast(strftime('%d', '2017-03-02 09:20:25') as integer)"),
        ],
    );
    assert_sql(
        &year(id("purchased_at")),
        &[
            (Postgres, "extract(year from \"purchased_at\")"),
            (SqlServer, "year([purchased_at])"),
            (SQLite, "cast(strftime('%Y', \"purchased_at\") as integer)"),
        ],
    );
    assert_sql(
        &minute(esc(STAMP)),
        &[
            (SqlServer, "datepart(minute, '2017-03-02 09:20:25')"),
            (Oracle, "extract(minute from '2017-03-02 09:20:25')"),
            (SQLite, "cast(strftime('%M', '2017-03-02 09:20:25') as integer)"),
        ],
    );
}

#[test]
fn test_unknown_function_passes_through() {
    let expr = Expr::func("json_extract", [Expr::from(id("doc")), Expr::esc("$.a")]);
    assert_sql(
        &expr,
        &[
            (SQLite, "json_extract(\"doc\", '$.a')"),
            (MySQL, "json_extract(`doc`, '$.a')"),
        ],
    );
}

#[test]
fn test_builtin_arity_is_checked() {
    let expr = Expr::func("left", [id("name")]);
    assert!(matches!(
        expr.to_sql_with_dialect(SQLite),
        Err(CompileError::InvalidExpression(_))
    ));
}

// ============= Values Tests =============

#[test]
fn test_values() {
    assert_sql_params(
        &values([vec![Value::Int(123), s("foo")]]),
        &[(Postgres, "values ($1, $2)"), (MySQL, "values (?, ?)")],
        &[Value::Int(123), s("foo")],
    );
}

#[test]
fn test_values_with_alias_and_columns() {
    let rows = values([
        vec![Value::Int(1), s("foo")],
        vec![Value::Int(2), s("bar")],
        vec![Value::Int(3), s("baz")],
    ]);
    assert_sql_params(
        &rows.alias("table", ["col1", "col2"]),
        &[
            (
                Postgres,
                "(values ($1, $2), ($3, $4), ($5, $6)) as \"table\" (\"col1\", \"col2\")",
            ),
            (
                SqlServer,
                "(values (?, ?), (?, ?), (?, ?)) as [table] ([col1], [col2])",
            ),
        ],
        &[
            Value::Int(1),
            s("foo"),
            Value::Int(2),
            s("bar"),
            Value::Int(3),
            s("baz"),
        ],
    );
}

#[test]
fn test_values_with_alias_only() {
    let rows = values([vec![Value::Int(123), s("foo")]]);
    assert_sql(
        &rows.alias("table", Vec::<String>::new()),
        &[(MySQL, "(values (?, ?)) as `table`")],
    );
}
