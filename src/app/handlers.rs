use actix_web::{
  web,
  HttpResponse,
  Result
};
use log::debug;
use super::dtos::*;
use super::error::Error;
use super::helpers::run_blocking;
use super::AppState;

// Module with all the API handler functions. They only
// translate between JSON and the stores, every rule about
// articles and comments lives in the db module.

// Default response when no route matched the request:
pub async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::NotFound(String::from("Endpoint doesn't exist")))
}

pub async fn articles(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let deadline = app_state.deadline();
  let state = app_state.clone();
  let articles = run_blocking(
    move || state.articles.list_articles(deadline)
  ).await?;
  Ok(
    HttpResponse::Ok().json(
      articles
        .into_iter()
        .map(Into::into)
        .collect::<Vec<ArticleDto>>()
    )
  )
}

// Path variables have to be in a tuple.
pub async fn article(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  let deadline = app_state.deadline();
  let state = app_state.clone();
  let article = run_blocking(
    move || state.articles.get_article(article_id, deadline)
  ).await?;
  Ok(HttpResponse::Ok().json(ArticleDto::from(article)))
}

pub async fn post_article(
  app_state: web::Data<AppState>,
  article_form: web::Json<ArticleForm>
) -> Result<HttpResponse, Error> {
  let new_article = article_form.into_inner().into_new_article()?;
  let deadline = app_state.deadline();
  let state = app_state.clone();
  let article = run_blocking(
    move || state.articles.create_article(new_article, deadline)
  )
    .await
    .map_err(|e| {
      debug!("Article rejected - {}", e);
      e
    })?;
  Ok(HttpResponse::Ok().json(ArticleDto::from(article)))
}

pub async fn post_comment(
  app_state: web::Data<AppState>,
  comment_form: web::Json<CommentForm>
) -> Result<HttpResponse, Error> {
  let new_comment = comment_form.into_inner().into_new_comment()?;
  let deadline = app_state.deadline();
  let state = app_state.clone();
  let comment = run_blocking(
    move || state.comments.create_comment(new_comment, deadline)
  )
    .await
    .map_err(|e| {
      debug!("Comment rejected - {}", e);
      e
    })?;
  Ok(HttpResponse::Ok().json(CommentDto::from(comment)))
}

pub async fn comments(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let deadline = app_state.deadline();
  let state = app_state.clone();
  let comments = run_blocking(
    move || state.comments.list_all_comments(deadline)
  ).await?;
  Ok(HttpResponse::Ok().json(comment_dtos(comments)))
}

pub async fn article_comments(
  app_state: web::Data<AppState>,
  path: web::Path<(i64,)>
) -> Result<HttpResponse, Error> {
  let article_id = path.into_inner().0;
  let deadline = app_state.deadline();
  let state = app_state.clone();
  let comments = run_blocking(
    move || state.threads.comments_for_article(article_id, deadline)
  ).await?;
  Ok(HttpResponse::Ok().json(comment_dtos(comments)))
}

pub async fn comment_replies(
  app_state: web::Data<AppState>,
  path: web::Path<(i64, i64)>
) -> Result<HttpResponse, Error> {
  let (article_id, comment_id) = path.into_inner();
  let deadline = app_state.deadline();
  let state = app_state.clone();
  let replies = run_blocking(
    move || state.threads.replies(article_id, comment_id, deadline)
  ).await?;
  Ok(HttpResponse::Ok().json(comment_dtos(replies)))
}

fn comment_dtos(comments: Vec<crate::db::Comment>) -> Vec<CommentDto> {
  comments.into_iter().map(CommentDto::from).collect()
}
