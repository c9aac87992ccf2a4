use serde_json::Value as JsonValue;

use tokio_postgres::Row;

use crate::error::*;
use crate::forms::ProfileForm;
use crate::models::*;

use crate::db::*;

#[derive(Clone)]
pub struct ProfileService {
  // get one profile
  profile_by_user: VersionedStatement,
  profile_by_handle: VersionedStatement,
  profile_by_handle_or_user: VersionedStatement,

  // get all profiles
  profiles_all: VersionedStatement,

  // create / update
  insert_profile: VersionedStatement,
  update_profile: VersionedStatement,

  // persist embedded lists
  save_experience: VersionedStatement,
  save_education: VersionedStatement,
}

static PROFILE_DETAILS_SELECT: &'static str = r#"
SELECT p.id, p.handle, p.company, p.location, p.status, p.bio,
  p.skills, p.online, p.experience, p.education, p.created_at,
  u.id, u.username, u.fullname, u.email, u.avatar
FROM profiles p INNER JOIN users u ON p.user_id = u.id
"#;

fn profile_details_from_row(row: &Row) -> Result<ProfileDetails> {
  let skills: JsonValue = row.get(6);
  let online: JsonValue = row.get(7);
  let experience: JsonValue = row.get(8);
  let education: JsonValue = row.get(9);

  Ok(ProfileDetails {
    id: row.get(0),
    handle: row.get(1),
    company: row.get(2),
    location: row.get(3),
    status: row.get(4),
    bio: row.get(5),
    skills: serde_json::from_value(skills)?,
    online: serde_json::from_value(online)?,
    experience: serde_json::from_value(experience)?,
    education: serde_json::from_value(education)?,
    created_at: row.get(10),
    user: UserPublic {
      id: row.get(11),
      username: row.get(12),
      fullname: row.get(13),
      email: row.get(14),
      avatar: row.get(15),
    },
  })
}

fn profile_details_from_opt_row(row: &Option<Row>) -> Result<Option<ProfileDetails>> {
  match row {
    Some(ref row) => Ok(Some(profile_details_from_row(row)?)),
    None => Ok(None),
  }
}

impl ProfileService {
  pub fn new(cl: SharedClient) -> Result<ProfileService> {
    // Build profile_by_* queries
    let profile_by_user = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE p.user_id = $1"#, PROFILE_DETAILS_SELECT))?;
    let profile_by_handle = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE p.handle = $1"#, PROFILE_DETAILS_SELECT))?;
    // Public lookup: a handle, or a numeric owner id.
    let profile_by_handle_or_user = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE p.handle = $1 OR p.user_id = $2"#, PROFILE_DETAILS_SELECT))?;

    let profiles_all = VersionedStatement::new(cl.clone(),
        &format!(r#"{} ORDER BY p.id DESC"#, PROFILE_DETAILS_SELECT))?;

    // experience/education start as empty lists (schema default).
    let insert_profile = VersionedStatement::new(cl.clone(),
        r#"INSERT INTO profiles(user_id, handle, company, location, status, bio, skills, online)
        VALUES($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id"#)?;

    // Scalar fields left out of the submission keep their stored value;
    // skills and online are replaced wholesale every time.
    let update_profile = VersionedStatement::new(cl.clone(),
        r#"UPDATE profiles SET company = COALESCE($2, company),
        location = COALESCE($3, location), status = $4,
        bio = COALESCE($5, bio), skills = $6, online = $7
        WHERE user_id = $1"#)?;

    let save_experience = VersionedStatement::new(cl.clone(),
        r#"UPDATE profiles SET experience = $2 WHERE user_id = $1"#)?;
    let save_education = VersionedStatement::new(cl.clone(),
        r#"UPDATE profiles SET education = $2 WHERE user_id = $1"#)?;

    Ok(ProfileService {
      profile_by_user,
      profile_by_handle,
      profile_by_handle_or_user,

      profiles_all,

      insert_profile,
      update_profile,

      save_experience,
      save_education,
    })
  }

  pub async fn prepare(&self) -> Result<()> {
    self.profile_by_user.prepare().await?;
    self.profile_by_handle.prepare().await?;
    self.profile_by_handle_or_user.prepare().await?;

    self.profiles_all.prepare().await?;

    self.insert_profile.prepare().await?;
    self.update_profile.prepare().await?;

    self.save_experience.prepare().await?;
    self.save_education.prepare().await?;
    Ok(())
  }

  pub async fn get_by_user(&self, user_id: i32) -> Result<Option<ProfileDetails>> {
    let row = self.profile_by_user.query_opt(&[&user_id]).await?;
    profile_details_from_opt_row(&row)
  }

  pub async fn get_by_handle(&self, handle: &str) -> Result<Option<ProfileDetails>> {
    let row = self.profile_by_handle.query_opt(&[&handle]).await?;
    profile_details_from_opt_row(&row)
  }

  pub async fn get_by_handle_or_user(&self, handle: &str, user_id: i32) -> Result<Option<ProfileDetails>> {
    let row = self.profile_by_handle_or_user.query_opt(&[&handle, &user_id]).await?;
    profile_details_from_opt_row(&row)
  }

  pub async fn get_all(&self) -> Result<Vec<ProfileDetails>> {
    let rows = self.profiles_all.query(&[]).await?;
    rows.iter().map(profile_details_from_row).collect()
  }

  pub async fn insert(&self, user_id: i32, handle: &str, form: &ProfileForm) -> Result<Option<i32>> {
    let skills = serde_json::to_value(form.split_skills())?;
    let online = serde_json::to_value(form.online_links())?;
    Ok(self.insert_profile.query_opt(&[
        &user_id, &handle, &form.company, &form.location,
        &form.status, &form.bio, &skills, &online,
      ]).await?.map(|row| row.get(0))
    )
  }

  pub async fn update(&self, user_id: i32, form: &ProfileForm) -> Result<u64> {
    let skills = serde_json::to_value(form.split_skills())?;
    let online = serde_json::to_value(form.online_links())?;
    Ok(self.update_profile.execute(&[
        &user_id, &form.company, &form.location,
        &form.status, &form.bio, &skills, &online,
    ]).await?)
  }

  pub async fn save_experience(&self, user_id: i32, experience: &[ExperienceEntry]) -> Result<u64> {
    let experience = serde_json::to_value(experience)?;
    Ok(self.save_experience.execute(&[&user_id, &experience]).await?)
  }

  pub async fn save_education(&self, user_id: i32, education: &[EducationEntry]) -> Result<u64> {
    let education = serde_json::to_value(education)?;
    Ok(self.save_education.execute(&[&user_id, &education]).await?)
  }
}
