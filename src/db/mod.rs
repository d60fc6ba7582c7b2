use rusqlite::{Connection, Params, Row};
use r2d2_sqlite::SqliteConnectionManager;
use std::time::Duration;
mod entities;
mod error;
mod deadline;
mod helpers;
mod mappers;
mod schema;
mod articles;
mod comments;
mod threads;
pub use entities::*;
pub use error::StoreError;
pub use deadline::Deadline;
pub use schema::init_schema;
pub use articles::ArticleStore;
pub use comments::CommentStore;
pub use threads::ThreadQueries;

// Type alias to make function signatures much clearer:
pub type Pool = r2d2::Pool<SqliteConnectionManager>;
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;
pub type Result<T> = std::result::Result<T, StoreError>;

// How long SQLite waits on a locked database when the
// caller didn't give us a tighter deadline.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/**
 * All the DB stuff is synchronous, the HTTP layer moves
 * the calls to the blocking thread pool.
 */

// Runs once for every new connection the pool opens.
// Foreign keys are off by default in SQLite.
#[derive(Debug)]
struct ConnectionSetup;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionSetup {
  fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)
  }
}

pub fn open_pool(
  manager: SqliteConnectionManager,
  max_size: u32,
  connection_timeout: Duration
) -> std::result::Result<Pool, r2d2::Error> {
  Pool::builder()
    .max_size(max_size)
    .connection_timeout(connection_timeout)
    .connection_customizer(Box::new(ConnectionSetup))
    .build(manager)
}

// Get a connection without waiting past the deadline. Every
// store operation does all of its work on the one connection
// it gets from here.
fn checkout(pool: &Pool, deadline: Deadline) -> Result<PooledConnection> {
  let conn = match deadline.remaining() {
    Some(left) => pool.get_timeout(left)?,
    None => pool.get()?
  };
  deadline.check()?;
  conn.busy_timeout(deadline.busy_timeout(DEFAULT_BUSY_TIMEOUT))?;
  Ok(conn)
}

fn select_many<T, P, F>(
  conn: &Connection,
  query: &str,
  params: P,
  mapper: F
) -> Result<Vec<T>>
  where
    P: Params,
    F: FnMut(&Row<'_>) -> std::result::Result<T, rusqlite::Error>,
{
  let mut stmt = conn.prepare(query)?;
  let rows = stmt.query_map(params, mapper)?;
  rows.collect::<std::result::Result<Vec<T>, rusqlite::Error>>()
    .map_err(StoreError::from)
}

// In-memory database shared by the tests. An in-memory SQLite
// database only lives as long as its connection, hence the
// single connection pool.
#[cfg(test)]
pub fn test_pool() -> Pool {
  let pool = open_pool(
    SqliteConnectionManager::memory(),
    1,
    Duration::from_secs(5)
  ).expect("In-memory pool");
  init_schema(&pool).expect("Schema creation");
  pool
}
