use rusqlite::{params, Connection, OptionalExtension};
use log::info;
use crate::utils::time_utils;
use super::entities::*;
use super::mappers::{map_article, ARTICLE_COLUMNS};
use super::helpers;
use super::{checkout, select_many, Deadline, Pool, Result, StoreError};

/// Owns the articles table.
#[derive(Clone)]
pub struct ArticleStore {
  pool: Pool
}

impl ArticleStore {

  pub fn new(pool: Pool) -> Self {
    Self { pool }
  }

  pub fn create_article(
    &self,
    new_article: NewArticle,
    deadline: Deadline
  ) -> Result<Article> {
    helpers::require_text("title", &new_article.title)?;
    helpers::require_text("nickname", &new_article.nickname)?;
    let creation_date = new_article.creation_date
      .unwrap_or_else(time_utils::current_timestamp);

    let mut conn = checkout(&self.pool, deadline)?;
    let tx = conn.transaction()?;
    tx.execute(
      &format!(
        "INSERT INTO articles (title, content, nickname, creation_date) VALUES ({})",
        helpers::placeholders(4)
      ),
      params![
        new_article.title,
        new_article.content,
        new_article.nickname,
        creation_date
      ]
    )?;
    let id = tx.last_insert_rowid();
    // Dropping the transaction rolls it back.
    deadline.check()?;
    tx.commit()?;
    info!("Created article {}", id);

    Ok(Article {
      id,
      title: new_article.title,
      content: new_article.content,
      nickname: new_article.nickname,
      creation_date
    })
  }

  pub fn get_article(&self, article_id: i64, deadline: Deadline) -> Result<Article> {
    let conn = checkout(&self.pool, deadline)?;
    conn.query_row(
      &format!("SELECT {} FROM articles WHERE id = ?1", ARTICLE_COLUMNS),
      params![article_id],
      map_article
    )
      .optional()?
      .ok_or_else(|| StoreError::NotFound(
        format!("Article {} does not exist", article_id)
      ))
  }

  // Insertion order.
  pub fn list_articles(&self, deadline: Deadline) -> Result<Vec<Article>> {
    let conn = checkout(&self.pool, deadline)?;
    select_many(
      &conn,
      &format!("SELECT {} FROM articles ORDER BY id ASC", ARTICLE_COLUMNS),
      [],
      map_article
    )
  }

}

pub(crate) fn article_exists(conn: &Connection, article_id: i64) -> Result<bool> {
  let exists: bool = conn.query_row(
    "SELECT EXISTS(SELECT 1 FROM articles WHERE id = ?1)",
    params![article_id],
    |row| row.get(0)
  )?;
  Ok(exists)
}
