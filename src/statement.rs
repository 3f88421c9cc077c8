//! The one prepare/bind/step/finalize procedure every operation goes through.

use crate::error::{engine_message, Result, SqliteManagerError};
use crate::value::{Row, Value};
use rusqlite::Connection;

/// Prepares `sql`, binds `params` positionally (1-indexed), steps through
/// every row and hands each one to `read_row`.
///
/// SQL that compiles to nothing (empty, whitespace, comments) yields no rows.
/// The statement is finalized when it goes out of scope, which covers every
/// return path below.
pub(crate) fn run<T>(
    conn: &Connection,
    sql: &str,
    params: &[Value],
    mut read_row: impl FnMut(&rusqlite::Row<'_>, &[String]) -> T,
) -> Result<Vec<T>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| SqliteManagerError::PrepareFailed(engine_message(&e)))?;

    // sqlite hands back a null statement handle when there is nothing to run
    if stmt.column_count() == 0 && stmt.expanded_sql().is_none() {
        return Ok(Vec::new());
    }

    for (index, param) in params.iter().enumerate() {
        stmt.raw_bind_parameter(index + 1, param)
            .map_err(|e| SqliteManagerError::BindFailed(engine_message(&e)))?;
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut results = Vec::new();
    let mut rows = stmt.raw_query();
    while let Some(row) = rows
        .next()
        .map_err(|e| SqliteManagerError::CommonFailed(engine_message(&e)))?
    {
        results.push(read_row(row, &columns));
    }
    Ok(results)
}

/// Converts a result row into a column-name map, skipping NULL and BLOB
/// columns.
pub(crate) fn row_to_map(row: &rusqlite::Row<'_>, columns: &[String]) -> Row {
    let mut map = Row::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        if let Some(value) = row.get_ref(index).ok().and_then(Value::from_column) {
            map.insert(name.clone(), value);
        }
    }
    map
}

/// Reads the first column as an existence flag: nonzero integer means true.
pub(crate) fn exists_flag(row: &rusqlite::Row<'_>, _columns: &[String]) -> bool {
    matches!(row.get_ref(0), Ok(rusqlite::types::ValueRef::Integer(flag)) if flag != 0)
}

/// Builds the existence query for `column` in `table`.
///
/// Identifiers are interpolated verbatim.
pub(crate) fn exists_sql(table: &str, column: &str) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ? LIMIT 1)",
        table, column
    )
}

/// A column descriptor from `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnInfo {
    pub name: String,
    /// 1-based position in the primary key, 0 when not part of it.
    pub pk: i64,
}

pub(crate) fn table_info(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let sql = format!("PRAGMA table_info({})", table);
    run(conn, &sql, &[], |row, _| -> rusqlite::Result<ColumnInfo> {
        Ok(ColumnInfo {
            name: row.get(1)?,
            pk: row.get(5)?,
        })
    })?
    .into_iter()
    .collect::<rusqlite::Result<Vec<_>>>()
    .map_err(|e| SqliteManagerError::CommonFailed(engine_message(&e)))
}
