//! Embedded schema for the board tables.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::result::QueryResult;

/// SQL creating the `tasks`, `tags` and `task_tags` tables.
pub const CREATE_BOARD_TABLES_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// Applies the board schema to `connection`.
///
/// Blocking; call from `spawn_blocking` or a synchronous context.
///
/// # Errors
///
/// Returns the database error when a statement fails.
pub fn apply_migrations(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(CREATE_BOARD_TABLES_SQL)
}
