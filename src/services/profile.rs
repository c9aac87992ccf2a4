use actix_web::{
  get, post, put, delete, web, HttpResponse,
  Error
};

use serde_json::json;

use crate::error::*;
use crate::app::*;
use crate::forms::*;
use crate::models::ProfileDetails;
use crate::validation::*;
use crate::auth::AuthData;
use crate::subdoc::{self, SubdocError};

use crate::db::DbService;

use crate::middleware::Auth;

/// Load the caller's profile.  Experience and education operations
/// authorize implicitly through this lookup: the parent is keyed by the
/// caller, so other users' entries are simply never visible.
async fn own_profile(db: &DbService, auth: &AuthData) -> Result<ProfileDetails> {
  db.profile.get_by_user(auth.user_id).await?.ok_or_else(|| {
    crate::Error::NotFound(json!({
      "profile": "No profile exists for the logged in user",
    }))
  })
}

fn experience_error(err: SubdocError) -> crate::Error {
  match err {
    SubdocError::NotFound => crate::Error::NotFound(json!({
      "experience": "No experience entry exists by the given id",
    })),
    SubdocError::Forbidden => crate::Error::Forbidden(json!({
      "authorization": "Permission Denied",
    })),
  }
}

fn education_error(err: SubdocError) -> crate::Error {
  match err {
    SubdocError::NotFound => crate::Error::NotFound(json!({
      "education": "No education entry exists by the given id",
    })),
    SubdocError::Forbidden => crate::Error::Forbidden(json!({
      "authorization": "Permission Denied",
    })),
  }
}

/// get current user's profile
#[get("/profile", wrap="Auth::required()")]
async fn own(
  auth: AuthData,
  db: web::Data<DbService>,
) -> Result<HttpResponse, Error> {
  let profile = own_profile(&db, &auth).await?;
  Ok(HttpResponse::Ok().json(profile))
}

/// create or update the current user's profile
#[post("/profile", wrap="Auth::required()")]
async fn upsert(
  auth: AuthData,
  db: web::Data<DbService>,
  form: web::Json<ProfileForm>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  validate_profile(&form).into_result()?;

  // The stored handle is always the caller's username.
  let handle = auth.username.clone();

  if db.profile.get_by_user(auth.user_id).await?.is_some() {
    db.profile.update(auth.user_id, &form).await?;
  } else {
    if db.profile.get_by_handle(&handle).await?.is_some() {
      return Ok(HttpResponse::BadRequest().json(json!({
        "handle": "Handle already exists",
      })));
    }
    db.profile.insert(auth.user_id, &handle, &form).await?;
  }

  let profile = own_profile(&db, &auth).await?;
  Ok(HttpResponse::Ok().json(profile))
}

/// get all profiles
#[get("/profile/all")]
async fn list(
  db: web::Data<DbService>,
) -> Result<HttpResponse, Error> {
  let profiles = db.profile.get_all().await?;
  if profiles.is_empty() {
    return Ok(HttpResponse::NotFound().json(json!({
      "profile": "No profiles exist in the database",
    })));
  }
  Ok(HttpResponse::Ok().json(profiles))
}

/// get profile by handle or owner id
#[get("/profile/user/{handle_or_id}")]
async fn by_handle_or_id(
  db: web::Data<DbService>,
  path: web::Path<String>,
) -> Result<HttpResponse, Error> {
  let segment = path.into_inner();
  // Numeric segments may also address the profile by its owner's id.
  let user_id = segment.parse::<i32>().unwrap_or(-1);

  match db.profile.get_by_handle_or_user(&segment, user_id).await? {
    Some(profile) => Ok(HttpResponse::Ok().json(profile)),
    None => Ok(HttpResponse::NotFound().json(json!({
      "profile": "No profile exists for the given username",
    }))),
  }
}

/// add an experience entry
#[post("/profile/experience", wrap="Auth::required()")]
async fn add_experience(
  auth: AuthData,
  db: web::Data<DbService>,
  form: web::Json<ExperienceForm>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  validate_experience(&form).into_result()?;

  let mut profile = own_profile(&db, &auth).await?;
  subdoc::push_front(&mut profile.experience, form.into_entry());
  db.profile.save_experience(auth.user_id, &profile.experience).await?;

  Ok(HttpResponse::Ok().json(profile))
}

/// update an experience entry
#[put("/profile/experience/{id}", wrap="Auth::required()")]
async fn update_experience(
  auth: AuthData,
  db: web::Data<DbService>,
  path: web::Path<String>,
  form: web::Json<UpdateExperience>,
) -> Result<HttpResponse, Error> {
  let entry_id = path.into_inner();
  let form = form.into_inner();

  let mut profile = own_profile(&db, &auth).await?;
  let idx = subdoc::find_entry(&profile.experience, &entry_id)
    .map_err(experience_error)?;
  form.apply(&mut profile.experience[idx]);
  db.profile.save_experience(auth.user_id, &profile.experience).await?;

  Ok(HttpResponse::Ok().json(profile))
}

/// delete an experience entry
#[delete("/profile/experience/{id}", wrap="Auth::required()")]
async fn delete_experience(
  auth: AuthData,
  db: web::Data<DbService>,
  path: web::Path<String>,
) -> Result<HttpResponse, Error> {
  let entry_id = path.into_inner();

  let mut profile = own_profile(&db, &auth).await?;
  subdoc::remove_entry(&mut profile.experience, &entry_id)
    .map_err(experience_error)?;
  db.profile.save_experience(auth.user_id, &profile.experience).await?;

  Ok(HttpResponse::Ok().json(profile))
}

/// add an education entry
#[post("/profile/education", wrap="Auth::required()")]
async fn add_education(
  auth: AuthData,
  db: web::Data<DbService>,
  form: web::Json<EducationForm>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  validate_education(&form).into_result()?;

  let mut profile = own_profile(&db, &auth).await?;
  subdoc::push_front(&mut profile.education, form.into_entry());
  db.profile.save_education(auth.user_id, &profile.education).await?;

  Ok(HttpResponse::Ok().json(profile))
}

/// update an education entry
#[put("/profile/education/{id}", wrap="Auth::required()")]
async fn update_education(
  auth: AuthData,
  db: web::Data<DbService>,
  path: web::Path<String>,
  form: web::Json<UpdateEducation>,
) -> Result<HttpResponse, Error> {
  let entry_id = path.into_inner();
  let form = form.into_inner();

  let mut profile = own_profile(&db, &auth).await?;
  let idx = subdoc::find_entry(&profile.education, &entry_id)
    .map_err(education_error)?;
  form.apply(&mut profile.education[idx]);
  db.profile.save_education(auth.user_id, &profile.education).await?;

  Ok(HttpResponse::Ok().json(profile))
}

/// delete an education entry
#[delete("/profile/education/{id}", wrap="Auth::required()")]
async fn delete_education(
  auth: AuthData,
  db: web::Data<DbService>,
  path: web::Path<String>,
) -> Result<HttpResponse, Error> {
  let entry_id = path.into_inner();

  let mut profile = own_profile(&db, &auth).await?;
  subdoc::remove_entry(&mut profile.education, &entry_id)
    .map_err(education_error)?;
  db.profile.save_education(auth.user_id, &profile.education).await?;

  Ok(HttpResponse::Ok().json(profile))
}

#[derive(Debug, Clone, Default)]
pub struct ProfileService {
}

impl super::Service for ProfileService {
  fn load_app_config(&mut self, _config: &AppConfig, _prefix: &str) -> Result<()> {
    Ok(())
  }

  fn api_config(&self, web: &mut web::ServiceConfig) {
    web
      .data(self.clone())
      .service(own)
      .service(upsert)
      .service(list)
      .service(by_handle_or_id)
      .service(add_experience)
      .service(update_experience)
      .service(delete_experience)
      .service(add_education)
      .service(update_education)
      .service(delete_education);
  }
}

pub fn new_factory() -> ProfileService {
  Default::default()
}
