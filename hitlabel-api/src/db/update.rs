//! Partial updates built from typed column assignments
//!
//! Each resource exposes an enum whose variants are the only columns a client
//! may change. Column names come from the enum, values are always bound.

use sqlx::sqlite::SqliteConnection;
use sqlx::{QueryBuilder, Sqlite};

/// One `column = ?` pair of an UPDATE statement
pub trait Assignment {
    /// Column name, from a fixed set
    fn column(&self) -> &'static str;

    /// Bind the new value onto the statement
    fn push_value<'args>(self, builder: &mut QueryBuilder<'args, Sqlite>);
}

/// Table and primary-key column an update targets
#[derive(Debug, Clone, Copy)]
pub struct UpdateTarget {
    pub table: &'static str,
    pub key_column: &'static str,
}

/// Apply `assignments` to the row whose key is `id`
///
/// Returns the number of rows changed (0 when the id does not exist). An empty
/// assignment list changes nothing and never reaches the database.
pub async fn apply<A: Assignment>(
    conn: &mut SqliteConnection,
    target: UpdateTarget,
    id: i64,
    assignments: Vec<A>,
) -> sqlx::Result<u64> {
    if assignments.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE ");
    builder.push(target.table).push(" SET ");

    for (i, assignment) in assignments.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(assignment.column()).push(" = ");
        assignment.push_value(&mut builder);
    }

    builder
        .push(" WHERE ")
        .push(target.key_column)
        .push(" = ")
        .push_bind(id);

    let result = builder.build().execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
