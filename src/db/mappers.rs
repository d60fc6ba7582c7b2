use super::entities::*;
use rusqlite::{Row, Error};

// Column lists the mappers below expect, in that order.
pub const ARTICLE_COLUMNS: &str =
  "id, title, content, nickname, creation_date";
pub const COMMENT_COLUMNS: &str =
  "id, article_id, parent_comment_id, content, nickname, creation_date";

pub fn map_article(row: &Row) -> Result<Article, Error> {
  Ok(Article {
    id: row.get(0)?,
    title: row.get(1)?,
    content: row.get(2)?,
    nickname: row.get(3)?,
    creation_date: row.get(4)?
  })
}

pub fn map_comment(row: &Row) -> Result<Comment, Error> {
  Ok(Comment {
    id: row.get(0)?,
    article_id: row.get(1)?,
    parent_comment_id: row.get(2)?,
    content: row.get(3)?,
    nickname: row.get(4)?,
    creation_date: row.get(5)?
  })
}
