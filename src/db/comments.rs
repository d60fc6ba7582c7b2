use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use log::info;
use crate::utils::time_utils;
use super::entities::*;
use super::mappers::{map_comment, COMMENT_COLUMNS};
use super::articles::article_exists;
use super::helpers;
use super::{checkout, select_many, Deadline, Pool, Result, StoreError};

/// Owns the comments table. Articles are only ever read
/// from here, to check that references are valid.
#[derive(Clone)]
pub struct CommentStore {
  pool: Pool
}

impl CommentStore {

  pub fn new(pool: Pool) -> Self {
    Self { pool }
  }

  /**
   * The article and parent checks happen in the same
   * immediate transaction as the insert, so a reply is
   * always validated against the state it gets written to.
   */
  pub fn create_comment(
    &self,
    new_comment: NewComment,
    deadline: Deadline
  ) -> Result<Comment> {
    helpers::require_text("content", &new_comment.content)?;
    helpers::require_text("nickname", &new_comment.nickname)?;
    let creation_date = new_comment.creation_date
      .unwrap_or_else(time_utils::current_timestamp);

    let mut conn = checkout(&self.pool, deadline)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if !article_exists(&tx, new_comment.article_id)? {
      return Err(StoreError::NotFound(
        format!("Article {} does not exist", new_comment.article_id)
      ));
    }
    if let Some(parent_id) = new_comment.parent_comment_id {
      // A parent from another article is as good as missing.
      match comment_article_id(&tx, parent_id)? {
        Some(article_id) if article_id == new_comment.article_id => (),
        _ => return Err(StoreError::NotFound(format!(
          "Comment {} does not exist on article {}",
          parent_id,
          new_comment.article_id
        )))
      }
    }
    tx.execute(
      &format!(
        "INSERT INTO comments \
        (article_id, parent_comment_id, content, nickname, creation_date) \
        VALUES ({})",
        helpers::placeholders(5)
      ),
      params![
        new_comment.article_id,
        new_comment.parent_comment_id,
        new_comment.content,
        new_comment.nickname,
        creation_date
      ]
    )?;
    let id = tx.last_insert_rowid();
    deadline.check()?;
    tx.commit()?;
    info!("Created comment {} on article {}", id, new_comment.article_id);

    Ok(Comment {
      id,
      article_id: new_comment.article_id,
      parent_comment_id: new_comment.parent_comment_id,
      content: new_comment.content,
      nickname: new_comment.nickname,
      creation_date
    })
  }

  pub fn list_all_comments(&self, deadline: Deadline) -> Result<Vec<Comment>> {
    let conn = checkout(&self.pool, deadline)?;
    select_many(
      &conn,
      &format!("SELECT {} FROM comments ORDER BY id ASC", COMMENT_COLUMNS),
      [],
      map_comment
    )
  }

}

// Article the comment is attached to, None if there's
// no such comment.
pub(crate) fn comment_article_id(
  conn: &Connection,
  comment_id: i64
) -> Result<Option<i64>> {
  conn.query_row(
    "SELECT article_id FROM comments WHERE id = ?1",
    params![comment_id],
    |row| row.get(0)
  )
    .optional()
    .map_err(StoreError::from)
}
