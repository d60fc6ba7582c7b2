use log::info;
use super::{Pool, Result};

// AUTOINCREMENT so that ids are never reused, even if rows
// were to be removed by hand.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS articles (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  title TEXT NOT NULL,
  content TEXT NOT NULL DEFAULT '',
  nickname TEXT NOT NULL,
  creation_date INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS comments (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  article_id INTEGER NOT NULL REFERENCES articles(id),
  parent_comment_id INTEGER REFERENCES comments(id),
  content TEXT NOT NULL,
  nickname TEXT NOT NULL,
  creation_date INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS comments_article_date_idx
  ON comments (article_id, creation_date, id);
CREATE INDEX IF NOT EXISTS comments_parent_idx
  ON comments (parent_comment_id);
";

/**
 * Creates the tables if they're not there yet. Safe to
 * call on every startup.
 */
pub fn init_schema(pool: &Pool) -> Result<()> {
  let conn = pool.get()?;
  conn.execute_batch(SCHEMA)?;
  info!("Database schema is ready");
  Ok(())
}
