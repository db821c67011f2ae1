//! Bind values for built statements.

use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// A value bound to a `$n` placeholder. Record columns are only text or bigint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Param {
    Text(String),
    BigInt(i64),
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Text(s)
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Text(s.to_string())
    }
}

impl From<i64> for Param {
    fn from(n: i64) -> Self {
        Param::BigInt(n)
    }
}

/// Collect params into PostgreSQL arguments, in placeholder order.
pub fn to_arguments(params: &[Param]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for p in params {
        let added = match p {
            Param::Text(s) => args.add(s.clone()),
            Param::BigInt(n) => args.add(*n),
        };
        added.map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
