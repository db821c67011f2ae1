//! Builds parameterized INSERT, SELECT, UPDATE and soft-delete statements from a [`Table`].
//!
//! Every table carries `id`, `created_at`, `updated_at` and `deleted_at` besides its own
//! columns. Reads, updates and deletes only ever touch live rows (`deleted_at IS NULL`).

use super::params::Param;

pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const DELETED_AT: &str = "deleted_at";

/// Static description of a mapped table.
pub trait Table {
    const NAME: &'static str;
    /// Writable columns in insert order; excludes id and timestamps.
    const COLUMNS: &'static [&'static str];
}

/// A set of column assignments targeting one table. Inserts write every column the
/// changeset yields; updates write only those, leaving the rest untouched.
pub trait Changeset {
    type Target: Table;

    fn assignments(&self) -> Vec<(&'static str, Param)>;
}

/// A to-one relation loaded into the same SELECT as a JSON object.
pub struct Include {
    /// Output column name.
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
    /// Foreign key on the main table matched against the related `id`.
    pub our_key: &'static str,
}

impl Include {
    pub fn to_one<R: Table>(name: &'static str, our_key: &'static str) -> Self {
        Include {
            name,
            table: R::NAME,
            columns: R::COLUMNS,
            our_key,
        }
    }
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Param>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Param) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn all_columns<'a>(columns: &[&'a str]) -> Vec<&'a str> {
    let mut out = vec![ID];
    out.extend_from_slice(columns);
    out.extend([CREATED_AT, UPDATED_AT, DELETED_AT]);
    out
}

fn column_list(columns: &[&str], alias: Option<&str>) -> String {
    all_columns(columns)
        .iter()
        .map(|c| match alias {
            Some(a) => format!("{}.{} AS {}", a, quoted(c), quoted(c)),
            None => quoted(c),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT every assignment of the changeset, RETURNING the full row.
pub fn insert<C: Changeset>(changeset: &C) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (col, val) in changeset.assignments() {
        let n = q.push_param(val);
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    let table = quoted(C::Target::NAME);
    let returning = column_list(C::Target::COLUMNS, None);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// SELECT live rows ordered by id; with `id`, only that row.
pub fn select_live<T: Table>(id: Option<i64>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = vec![format!("{} IS NULL", quoted(DELETED_AT))];
    if let Some(id) = id {
        let n = q.push_param(Param::BigInt(id));
        where_parts.push(format!("{} = ${}", quoted(ID), n));
    }
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {}",
        column_list(T::COLUMNS, None),
        quoted(T::NAME),
        where_parts.join(" AND "),
        quoted(ID)
    );
    q
}

/// SELECT live rows with includes in a single query: main table aliased as "main", each
/// include as a scalar `row_to_json` subquery over the live related row (NULL if none).
pub fn select_live_with_includes<T: Table>(id: Option<i64>, includes: &[Include]) -> QueryBuf {
    const MAIN_ALIAS: &str = "main";
    let mut q = QueryBuf::new();
    let mut select_parts = vec![column_list(T::COLUMNS, Some(MAIN_ALIAS))];
    for inc in includes {
        select_parts.push(format!(
            "(SELECT row_to_json(sub) FROM (SELECT {} FROM {} WHERE {} = {}.{} AND {} IS NULL) sub) AS {}",
            column_list(inc.columns, None),
            quoted(inc.table),
            quoted(ID),
            MAIN_ALIAS,
            quoted(inc.our_key),
            quoted(DELETED_AT),
            quoted(inc.name)
        ));
    }
    let mut where_parts = vec![format!("{}.{} IS NULL", MAIN_ALIAS, quoted(DELETED_AT))];
    if let Some(id) = id {
        let n = q.push_param(Param::BigInt(id));
        where_parts.push(format!("{}.{} = ${}", MAIN_ALIAS, quoted(ID), n));
    }
    q.sql = format!(
        "SELECT {} FROM {} {} WHERE {} ORDER BY {}.{}",
        select_parts.join(", "),
        quoted(T::NAME),
        MAIN_ALIAS,
        where_parts.join(" AND "),
        MAIN_ALIAS,
        quoted(ID)
    );
    q
}

/// UPDATE the live row with `id`: SET only the changeset's assignments, plus `updated_at`.
pub fn update<C: Changeset>(id: i64, changeset: &C) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, val) in changeset.assignments() {
        let n = q.push_param(val);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    sets.push(format!("{} = NOW()", quoted(UPDATED_AT)));
    let n = q.push_param(Param::BigInt(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} AND {} IS NULL",
        quoted(C::Target::NAME),
        sets.join(", "),
        quoted(ID),
        n,
        quoted(DELETED_AT)
    );
    q
}

/// Soft delete: stamp `deleted_at` on the live row with `id`.
pub fn soft_delete<T: Table>(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Param::BigInt(id));
    q.sql = format!(
        "UPDATE {} SET {} = NOW() WHERE {} = ${} AND {} IS NULL",
        quoted(T::NAME),
        quoted(DELETED_AT),
        quoted(ID),
        n,
        quoted(DELETED_AT)
    );
    q
}
