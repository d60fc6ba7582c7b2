use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use r2d2_sqlite::SqliteConnectionManager;
use color_eyre::Result;
use eyre::WrapErr;
use log::{debug, info};
use std::time::Duration;
// I think we have to add crate here because
// of the other crate named "config" that we
// use as a dependency.
use crate::config::Config;
use crate::db::{self, ArticleStore, CommentStore, Deadline, Pool, ThreadQueries};
mod handlers;
mod dtos;
mod error;
mod helpers;

// Declare app state struct. The stores all share the
// same pool, cloning them only clones the pool handle.
pub struct AppState {
  pub articles: ArticleStore,
  pub comments: CommentStore,
  pub threads: ThreadQueries,
  request_timeout: Duration
}

impl AppState {

  pub fn new(pool: Pool, request_timeout: Duration) -> Self {
    Self {
      articles: ArticleStore::new(pool.clone()),
      comments: CommentStore::new(pool.clone()),
      threads: ThreadQueries::new(pool),
      request_timeout
    }
  }

  // Deadline given to the store call of a request. A zero
  // request timeout in the config disables it.
  pub fn deadline(&self) -> Deadline {
    if self.request_timeout.as_secs() == 0 {
      Deadline::none()
    } else {
      Deadline::after(self.request_timeout)
    }
  }

}

// Function to start the server.
// The pool is created here and handed to the stores, nothing
// else holds on to a database handle.
pub async fn run() -> Result<()> {
  let config = Config::from_env()?;
  debug!("Current config: {:?}", config);
  let manager = SqliteConnectionManager::file(&config.db_path);
  let pool = db::open_pool(
    manager,
    config.db_pool_size,
    config.connection_timeout()
  ).wrap_err("Database connection failed")?;
  db::init_schema(&pool)
    .wrap_err("Could not create the database schema")?;

  // Got to save these for later because the closure
  // given to HttpServer is called once per worker.
  let bind_address = config.bind_address.clone();
  let allowed_origin = config.allowed_origin.clone();

  let app_state = web::Data::new(
    AppState::new(pool, config.request_timeout())
  );

  info!("Starting server on {}", bind_address);
  HttpServer::new(move|| {
    App::new()
      .app_data(app_state.clone())
      .wrap(cors(allowed_origin.as_deref()))
      .wrap(middleware::Logger::default())
      .configure(base_endpoints_config)
      .default_service(web::route().to(handlers::not_found))
  })
  .bind(bind_address)?
  .run()
  .await
  .wrap_err("Start Actix web server")
}

fn cors(allowed_origin: Option<&str>) -> Cors {
  match allowed_origin {
    Some(origin) => Cors::default()
      .allowed_origin(origin)
      .allowed_methods(vec!["GET", "POST"])
      .allow_any_header()
      .max_age(3600),
    None => Cors::default()
  }
}

// Route configuration:
fn base_endpoints_config(cfg: &mut web::ServiceConfig) {
  cfg.app_data(web::PathConfig::default().error_handler(|_, _| {
      actix_web::error::ErrorBadRequest("Invalid path arguments")
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _| {
      actix_web::error::ErrorBadRequest(format!("Invalid request body: {}", err))
    }))
    .route("/articles", web::get().to(handlers::articles))
    .route("/article", web::post().to(handlers::post_article))
    .route("/articles/{id}", web::get().to(handlers::article))
    .route("/article/comment", web::post().to(handlers::post_comment))
    .route("/comments", web::get().to(handlers::comments))
    .route("/comments/{article_id}", web::get().to(handlers::article_comments))
    .route("/comments/{article_id}/{id}", web::get().to(handlers::comment_replies));
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::dtos::{ArticleDto, CommentDto};
  use actix_web::{http::StatusCode, test};
  use serde_json::json;

  fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(db::test_pool(), Duration::from_secs(5)))
  }

  macro_rules! test_app {
    ($state:expr) => {
      test::init_service(
        App::new()
          .app_data($state.clone())
          .configure(base_endpoints_config)
          .default_service(web::route().to(handlers::not_found))
      ).await
    };
  }

  #[actix_web::test]
  async fn post_then_get_article() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
      .uri("/article")
      .set_json(&json!({
        "title": "Sample Article",
        "content": "This is a sample article content.",
        "nickname": "JohnDoe"
      }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::OK, resp.status());
    let created: ArticleDto = test::read_body_json(resp).await;
    assert_eq!("Sample Article", created.title);
    assert_eq!("JohnDoe", created.nickname);

    let req = test::TestRequest::get()
      .uri(&format!("/articles/{}", created.id))
      .to_request();
    let fetched: ArticleDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.id, fetched.id);
    assert_eq!(created.creation_date, fetched.creation_date);

    let req = test::TestRequest::get().uri("/articles").to_request();
    let all: Vec<ArticleDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(1, all.len());
  }

  #[actix_web::test]
  async fn missing_article_is_404() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::get().uri("/articles/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::NOT_FOUND, resp.status());
  }

  #[actix_web::test]
  async fn invalid_path_is_400() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::get().uri("/comments/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::BAD_REQUEST, resp.status());
  }

  #[actix_web::test]
  async fn unknown_route_is_404() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::get().uri("/nothing/here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::NOT_FOUND, resp.status());
  }

  #[actix_web::test]
  async fn comment_thread_over_http() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
      .uri("/article")
      .set_json(&json!({
        "title": "Sample Article",
        "content": "content",
        "nickname": "JohnDoe"
      }))
      .to_request();
    let article: ArticleDto = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
      .uri("/article/comment")
      .set_json(&json!({
        "articleId": article.id,
        "content": "First!",
        "nickname": "JaneDoe"
      }))
      .to_request();
    let c1: CommentDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(None, c1.parent_comment_id);

    let req = test::TestRequest::post()
      .uri("/article/comment")
      .set_json(&json!({
        "articleId": article.id,
        "parentCommentId": c1.id,
        "content": "Replying to the first one",
        "nickname": "JohnDoe"
      }))
      .to_request();
    let c2: CommentDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(Some(c1.id), c2.parent_comment_id);

    let req = test::TestRequest::get()
      .uri(&format!("/comments/{}", article.id))
      .to_request();
    let all: Vec<CommentDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(vec![c1.id, c2.id], all.iter().map(|c| c.id).collect::<Vec<i64>>());

    let req = test::TestRequest::get()
      .uri(&format!("/comments/{}/{}", article.id, c1.id))
      .to_request();
    let replies: Vec<CommentDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(vec![c2.id], replies.iter().map(|c| c.id).collect::<Vec<i64>>());

    let req = test::TestRequest::get()
      .uri(&format!("/comments/{}/{}", article.id, c2.id))
      .to_request();
    let none: Vec<CommentDto> = test::call_and_read_body_json(&app, req).await;
    assert!(none.is_empty());

    let req = test::TestRequest::get().uri("/comments").to_request();
    let everything: Vec<CommentDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(2, everything.len());
  }

  #[actix_web::test]
  async fn comment_on_missing_article_is_404() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
      .uri("/article/comment")
      .set_json(&json!({
        "articleId": 999,
        "content": "Hello?",
        "nickname": "JaneDoe"
      }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::NOT_FOUND, resp.status());

    let req = test::TestRequest::get().uri("/comments").to_request();
    let everything: Vec<CommentDto> = test::call_and_read_body_json(&app, req).await;
    assert!(everything.is_empty());
  }

  #[actix_web::test]
  async fn empty_comment_is_400() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
      .uri("/article/comment")
      .set_json(&json!({
        "articleId": 1,
        "content": "",
        "nickname": "JaneDoe"
      }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::BAD_REQUEST, resp.status());
  }

  #[actix_web::test]
  async fn malformed_body_is_400() {
    let state = state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
      .uri("/article")
      .set_json(&json!({ "content": "no title" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::BAD_REQUEST, resp.status());
  }

  #[actix_web::test]
  async fn zero_request_timeout_means_no_deadline() {
    let sut = AppState::new(db::test_pool(), Duration::from_secs(0));
    assert_eq!(None, sut.deadline().remaining());
    let bounded = AppState::new(db::test_pool(), Duration::from_secs(10));
    assert!(bounded.deadline().remaining().is_some());
  }
}
