use rusqlite::params;
use super::entities::Comment;
use super::mappers::{map_comment, COMMENT_COLUMNS};
use super::articles::article_exists;
use super::comments::comment_article_id;
use super::{checkout, select_many, Deadline, Pool, Result, StoreError};

// Same ordering for every thread query, the storage order
// doesn't leak out.
const THREAD_ORDER: &str = "ORDER BY creation_date ASC, id ASC";

/// Reads slices of the comment tree back.
///
/// Comments are stored flat with a parent pointer. Callers either
/// get everything posted on an article (and group by parent on
/// their side) or expand one comment at a time with `replies`.
#[derive(Clone)]
pub struct ThreadQueries {
  pool: Pool
}

impl ThreadQueries {

  pub fn new(pool: Pool) -> Self {
    Self { pool }
  }

  /// Every comment of the article, at any depth. An article
  /// without comments gives an empty list, a missing article
  /// is an error.
  pub fn comments_for_article(
    &self,
    article_id: i64,
    deadline: Deadline
  ) -> Result<Vec<Comment>> {
    let conn = checkout(&self.pool, deadline)?;
    if !article_exists(&conn, article_id)? {
      return Err(StoreError::NotFound(
        format!("Article {} does not exist", article_id)
      ));
    }
    select_many(
      &conn,
      &format!(
        "SELECT {} FROM comments WHERE article_id = ?1 {}",
        COMMENT_COLUMNS,
        THREAD_ORDER
      ),
      params![article_id],
      map_comment
    )
  }

  /// Direct replies to one comment, grandchildren excluded.
  pub fn replies(
    &self,
    article_id: i64,
    parent_comment_id: i64,
    deadline: Deadline
  ) -> Result<Vec<Comment>> {
    let conn = checkout(&self.pool, deadline)?;
    if !article_exists(&conn, article_id)? {
      return Err(StoreError::NotFound(
        format!("Article {} does not exist", article_id)
      ));
    }
    match comment_article_id(&conn, parent_comment_id)? {
      Some(id) if id == article_id => (),
      _ => return Err(StoreError::NotFound(format!(
        "Comment {} does not exist on article {}",
        parent_comment_id,
        article_id
      )))
    }
    select_many(
      &conn,
      &format!(
        "SELECT {} FROM comments WHERE article_id = ?1 \
        AND parent_comment_id = ?2 {}",
        COMMENT_COLUMNS,
        THREAD_ORDER
      ),
      params![article_id, parent_comment_id],
      map_comment
    )
  }

}
