use actix_web::{
  get, post, put, delete, web, HttpResponse,
  Error
};

use serde_json::json;

use crate::error::*;
use crate::app::*;
use crate::forms::*;
use crate::models::{Like, PostDetails};
use crate::validation::*;
use crate::auth::AuthData;
use crate::subdoc::{self, SubdocError};

use crate::db::DbService;

use crate::middleware::Auth;

async fn load_post(db: &DbService, post_id: i32) -> Result<PostDetails> {
  db.post.get_by_id(post_id).await?.ok_or_else(|| {
    crate::Error::NotFound(json!({
      "post": "No post exists by the given id",
    }))
  })
}

// A non-owner gets the same shape as a missing post.
fn not_owner() -> crate::Error {
  crate::Error::Forbidden(json!({
    "authorization": "No post exists by the given id for the logged in user",
  }))
}

fn comment_error(err: SubdocError) -> crate::Error {
  match err {
    SubdocError::NotFound => crate::Error::NotFound(json!({
      "comment": "No comment exists by the given id",
    })),
    SubdocError::Forbidden => crate::Error::Forbidden(json!({
      "authorization": "Permission Denied",
    })),
  }
}

/// create a new post
#[post("/posts", wrap="Auth::required()")]
async fn store_post(
  auth: AuthData,
  db: web::Data<DbService>,
  form: web::Json<CreatePost>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  validate_post_text(form.text.as_deref()).into_result()?;

  let post_id = match db.post.insert(auth.user_id, &form).await? {
    Some(post_id) => post_id,
    None => {
      return Ok(HttpResponse::InternalServerError().json("Failed to store post."));
    },
  };

  let post = load_post(&db, post_id).await?;
  Ok(HttpResponse::Ok().json(post))
}

/// get all posts, newest first
#[get("/posts")]
async fn list(
  db: web::Data<DbService>,
) -> Result<HttpResponse, Error> {
  let posts = db.post.get_all().await?;
  if posts.is_empty() {
    return Ok(HttpResponse::NotFound().json(json!({
      "post": "No posts yet.",
    })));
  }
  Ok(HttpResponse::Ok().json(posts))
}

/// get post by id
#[get("/posts/{id}")]
async fn get_post(
  db: web::Data<DbService>,
  post_id: web::Path<i32>,
) -> Result<HttpResponse, Error> {
  let post = load_post(&db, post_id.into_inner()).await?;
  Ok(HttpResponse::Ok().json(post))
}

/// update own post
#[put("/posts/{id}", wrap="Auth::required()")]
async fn update_post(
  auth: AuthData,
  db: web::Data<DbService>,
  post_id: web::Path<i32>,
  form: web::Json<UpdatePost>,
) -> Result<HttpResponse, Error> {
  let post_id = post_id.into_inner();
  let form = form.into_inner();
  validate_post_text(form.text.as_deref()).into_result()?;

  let post = load_post(&db, post_id).await?;
  if !post.owned_by(auth.user_id) {
    return Err(not_owner().into());
  }

  db.post.update_text(post_id, form.text.as_deref().unwrap_or("")).await?;

  let post = load_post(&db, post_id).await?;
  Ok(HttpResponse::Ok().json(post))
}

/// delete own post
#[delete("/posts/{id}", wrap="Auth::required()")]
async fn delete_post(
  auth: AuthData,
  db: web::Data<DbService>,
  post_id: web::Path<i32>,
) -> Result<HttpResponse, Error> {
  let post_id = post_id.into_inner();

  let post = load_post(&db, post_id).await?;
  if !post.owned_by(auth.user_id) {
    return Err(not_owner().into());
  }

  db.post.delete(post_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "delete": "success" })))
}

/// like or unlike a post
#[post("/posts/like/{id}", wrap="Auth::required()")]
async fn toggle_like(
  auth: AuthData,
  db: web::Data<DbService>,
  post_id: web::Path<i32>,
) -> Result<HttpResponse, Error> {
  let mut post = load_post(&db, post_id.into_inner()).await?;

  // One endpoint for both directions; the current state decides.
  subdoc::toggle(&mut post.likes, auth.user_id, || Like { user: auth.user_id });
  db.post.save_likes(post.id, &post.likes).await?;

  Ok(HttpResponse::Ok().json(post))
}

/// comment on a post
#[post("/posts/comment/{id}", wrap="Auth::required()")]
async fn add_comment(
  auth: AuthData,
  db: web::Data<DbService>,
  post_id: web::Path<i32>,
  form: web::Json<CreateComment>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  validate_comment_text(form.text.as_deref()).into_result()?;

  let mut post = load_post(&db, post_id.into_inner()).await?;
  subdoc::push_front(&mut post.comments, form.into_entry(auth.user_id));
  db.post.save_comments(post.id, &post.comments).await?;

  Ok(HttpResponse::Ok().json(post))
}

/// update own comment
#[put("/posts/comment/{id}/{comment_id}", wrap="Auth::required()")]
async fn update_comment(
  auth: AuthData,
  db: web::Data<DbService>,
  path: web::Path<(i32, String)>,
  form: web::Json<UpdateComment>,
) -> Result<HttpResponse, Error> {
  let (post_id, comment_id) = path.into_inner();
  let form = form.into_inner();
  validate_comment_text(form.text.as_deref()).into_result()?;

  let mut post = load_post(&db, post_id).await?;
  let idx = subdoc::find_owned(&post.comments, &comment_id, auth.user_id)
    .map_err(comment_error)?;

  // In-place patch; the comment keeps its position in the list.
  form.apply(&mut post.comments[idx]);

  db.post.save_comments(post.id, &post.comments).await?;

  Ok(HttpResponse::Ok().json(post))
}

/// delete own comment
#[delete("/posts/comment/{id}/{comment_id}", wrap="Auth::required()")]
async fn delete_comment(
  auth: AuthData,
  db: web::Data<DbService>,
  path: web::Path<(i32, String)>,
) -> Result<HttpResponse, Error> {
  let (post_id, comment_id) = path.into_inner();

  let mut post = load_post(&db, post_id).await?;
  subdoc::remove_owned(&mut post.comments, &comment_id, auth.user_id)
    .map_err(comment_error)?;
  db.post.save_comments(post.id, &post.comments).await?;

  Ok(HttpResponse::Ok().json(post))
}

#[derive(Debug, Clone, Default)]
pub struct PostService {
}

impl super::Service for PostService {
  fn load_app_config(&mut self, _config: &AppConfig, _prefix: &str) -> Result<()> {
    Ok(())
  }

  fn api_config(&self, web: &mut web::ServiceConfig) {
    web
      .data(self.clone())
      .service(store_post)
      .service(list)
      .service(toggle_like)
      .service(add_comment)
      .service(update_comment)
      .service(delete_comment)
      .service(get_post)
      .service(update_post)
      .service(delete_post);
  }
}

pub fn new_factory() -> PostService {
  Default::default()
}
