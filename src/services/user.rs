use actix_web::{
  get, post, web, HttpResponse,
  Error
};

use serde_json::json;

use crate::error::*;
use crate::app::*;
use crate::forms::*;
use crate::validation::*;
use crate::auth::{AuthData, GenerateJwt};

use crate::db::DbService;
use crate::auth::pass;

use crate::middleware::Auth;

// One message for unknown users and wrong passwords alike; login
// failures must not reveal which check missed.
fn bad_credentials() -> HttpResponse {
  HttpResponse::BadRequest().json(json!({
    "login": "Incorrect username or password",
  }))
}

/// register new user
#[post("/users/register")]
async fn register(
  cfg: web::Data<UserService>,
  db: web::Data<DbService>,
  form: web::Json<RegisterUser>,
) -> Result<HttpResponse, Error> {
  if !cfg.allow_register {
    return Ok(HttpResponse::Forbidden().finish());
  }

  let form = form.into_inner();
  validate_register(&form).into_result()?;

  // Pre-checks for friendlier messages; the unique constraints in the
  // store are the real guarantee.
  if db.user.get_by_email(form.email.as_deref().unwrap_or("")).await?.is_some() {
    return Ok(HttpResponse::BadRequest().json(json!({
      "registration": "Email already exists",
    })));
  }
  if db.user.get_by_username(form.username.as_deref().unwrap_or("")).await?.is_some() {
    return Ok(HttpResponse::BadRequest().json(json!({
      "registration": "Username already exists",
    })));
  }

  let hash = pass::hash_password(form.password.as_deref().unwrap_or(""))?;
  let user = db.user.insert(&form.into_new_user(hash)).await?;

  Ok(HttpResponse::Ok().json(user))
}

/// login user
#[post("/users/login")]
async fn login(
  db: web::Data<DbService>,
  form: web::Json<LoginUser>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  validate_login(&form).into_result()?;

  // `username` may also be the account email.
  let user = match db.user.get_by_username_or_email(form.username.as_deref().unwrap_or("")).await? {
    Some(user) => user,
    None => {
      return Ok(bad_credentials());
    }
  };

  let res = pass::check_password(&user.password, form.password.as_deref().unwrap_or(""))?;
  if !res.is_valid {
    return Ok(bad_credentials());
  }
  if res.needs_update {
    // Rehash while the clear text is at hand.
    db.user.update_password(user.id, form.password.as_deref().unwrap_or("")).await?;
  }

  let token = user.generate_jwt()?;
  Ok(HttpResponse::Ok().json(LoginResponse {
    success: true,
    token: format!("Bearer {}", token),
  }))
}

/// get current user
#[get("/users/current", wrap="Auth::required()")]
async fn current_user(
  auth: AuthData,
  db: web::Data<DbService>,
) -> Result<HttpResponse, Error> {
  match db.user.get_by_id(auth.user_id).await? {
    Some(user) => {
      Ok(HttpResponse::Ok().json(CurrentUser::from(user)))
    },
    _ => {
      // token outlived the account.
      Ok(HttpResponse::NotFound().finish())
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct UserService {
  pub allow_register: bool,
}

impl super::Service for UserService {
  fn load_app_config(&mut self, config: &AppConfig, _prefix: &str) -> Result<()> {
    self.allow_register = config.get_bool("User.allow_register")?.unwrap_or(true);
    Ok(())
  }

  fn api_config(&self, web: &mut web::ServiceConfig) {
    web
      .data(self.clone())
      .service(register)
      .service(login)
      .service(current_user);
  }
}

pub fn new_factory() -> UserService {
  Default::default()
}
