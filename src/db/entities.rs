// Plain rows as they live in SQLite. Dates are unix
// timestamps in seconds, the DTOs in the app module
// turn them into something readable.

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
  pub id: i64,
  pub title: String,
  pub content: String,
  pub nickname: String,
  pub creation_date: i64
}

// What a caller submits, the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewArticle {
  pub title: String,
  pub content: String,
  pub nickname: String,
  pub creation_date: Option<i64>
}

// parent_comment_id is NULL for top-level comments. Nothing
// else means "no parent", ids start at 1 but we don't rely
// on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
  pub id: i64,
  pub article_id: i64,
  pub parent_comment_id: Option<i64>,
  pub content: String,
  pub nickname: String,
  pub creation_date: i64
}

#[derive(Debug, Clone)]
pub struct NewComment {
  pub article_id: i64,
  pub parent_comment_id: Option<i64>,
  pub content: String,
  pub nickname: String,
  pub creation_date: Option<i64>
}
