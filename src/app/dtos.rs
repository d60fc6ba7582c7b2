use serde::{Deserialize, Serialize};
use crate::db::{Article, Comment, NewArticle, NewComment};
use crate::utils::time_utils;
use super::error::Error;

// I'm using the From trait to convert entities to DTOs.
// Going the other way (request body -> entity) can fail
// on the date so that's a plain function returning a
// Result.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
  pub id: i64,
  pub title: String,
  pub content: String,
  pub nickname: String,
  pub creation_date: String
}

impl From<Article> for ArticleDto {
  fn from(article: Article) -> Self {
    Self {
      id: article.id,
      title: article.title,
      content: article.content,
      nickname: article.nickname,
      creation_date: time_utils::timestamp_to_rfc3339(article.creation_date)
    }
  }
}

// parentCommentId is serialized as null for top-level
// comments so clients can group replies without guessing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
  pub id: i64,
  pub article_id: i64,
  pub parent_comment_id: Option<i64>,
  pub content: String,
  pub nickname: String,
  pub creation_date: String
}

impl From<Comment> for CommentDto {
  fn from(comment: Comment) -> Self {
    Self {
      id: comment.id,
      article_id: comment.article_id,
      parent_comment_id: comment.parent_comment_id,
      content: comment.content,
      nickname: comment.nickname,
      creation_date: time_utils::timestamp_to_rfc3339(comment.creation_date)
    }
  }
}

/* --- Request bodies --- */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleForm {
  pub title: String,
  #[serde(default)]
  pub content: String,
  pub nickname: String,
  pub creation_date: Option<String>
}

impl ArticleForm {
  pub fn into_new_article(self) -> Result<NewArticle, Error> {
    Ok(NewArticle {
      creation_date: parse_creation_date(self.creation_date.as_deref())?,
      title: self.title,
      content: self.content,
      nickname: self.nickname
    })
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
  pub article_id: i64,
  pub parent_comment_id: Option<i64>,
  pub content: String,
  pub nickname: String,
  pub creation_date: Option<String>
}

impl CommentForm {
  pub fn into_new_comment(self) -> Result<NewComment, Error> {
    Ok(NewComment {
      creation_date: parse_creation_date(self.creation_date.as_deref())?,
      article_id: self.article_id,
      parent_comment_id: self.parent_comment_id,
      content: self.content,
      nickname: self.nickname
    })
  }
}
/* --- End request bodies --- */

fn parse_creation_date(date: Option<&str>) -> Result<Option<i64>, Error> {
  match date {
    None => Ok(None),
    Some(d) => time_utils::rfc3339_to_timestamp(d)
      .map(Some)
      .ok_or_else(|| Error::BadRequest(
        format!("Invalid creation date: {}", d)
      ))
  }
}
