use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;
use crate::transpiler::sql::mysql::MysqlGenerator;
use crate::transpiler::sql::oracle::OracleGenerator;
use crate::transpiler::sql::postgres::PostgresGenerator;
use crate::transpiler::sql::sqlite::SqliteGenerator;
use crate::transpiler::sql::sqlserver::SqlServerGenerator;
use crate::transpiler::sql::standard::StandardGenerator;
use crate::transpiler::traits::SqlGenerator;

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    #[default]
    Standard,
    Postgres,
    MySQL,
    SQLite,
    SqlServer,
    Oracle,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Standard,
        Dialect::Postgres,
        Dialect::MySQL,
        Dialect::SQLite,
        Dialect::SqlServer,
        Dialect::Oracle,
    ];

    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::Standard => Box::new(StandardGenerator),
            Dialect::Postgres => Box::new(PostgresGenerator),
            Dialect::MySQL => Box::new(MysqlGenerator),
            Dialect::SQLite => Box::new(SqliteGenerator),
            Dialect::SqlServer => Box::new(SqlServerGenerator),
            Dialect::Oracle => Box::new(OracleGenerator),
        }
    }

    /// Selection key, as accepted by `FromStr`.
    pub fn key(&self) -> &'static str {
        match self {
            Dialect::Standard => "standard",
            Dialect::Postgres => "postgre",
            Dialect::MySQL => "mysql",
            Dialect::SQLite => "sqlite",
            Dialect::SqlServer => "mssql",
            Dialect::Oracle => "oracle",
        }
    }
}

impl FromStr for Dialect {
    type Err = CompileError;

    /// Case-insensitive key lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CompileError::UnknownDialect(s.to_string()))
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<String> for Dialect {
    type Error = CompileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dialect> for String {
    fn from(d: Dialect) -> Self {
        d.key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        assert_eq!("MSSQL".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("Postgre".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("sqlite".parse::<Dialect>().unwrap(), Dialect::SQLite);
    }

    #[test]
    fn test_unknown_key() {
        let err = "postgres".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, CompileError::UnknownDialect(ref k) if k == "postgres"));
    }

    #[test]
    fn test_key_round_trip() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
            assert_eq!(dialect.generator().name(), dialect.key());
        }
    }

    #[test]
    fn test_default_auto_quote() {
        assert!(!Dialect::Standard.generator().auto_quote_identifiers());
        assert!(Dialect::MySQL.generator().auto_quote_identifiers());
    }
}
