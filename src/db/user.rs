use crate::error::*;
use crate::forms::NewUser;
use crate::models::*;

use crate::auth::pass;

use crate::db::*;
use crate::db::util::*;

use tokio_postgres::Row;

#[derive(Clone)]
pub struct UserService {
  // gets
  user_by_id: VersionedStatement,
  user_by_email: VersionedStatement,
  user_by_username: VersionedStatement,
  user_by_username_or_email: VersionedStatement,

  // register
  insert_user: VersionedStatement,

  // login rehash
  update_password: VersionedStatement,
}

lazy_static! {
  static ref USER_COLUMNS: ColumnMappers = {
    ColumnMappers {
      table_name: "users",
      columns: vec![
        primary("id"),
        column("username"),
        column("fullname"),
        column("email"),
        column("password"),
        column("gender"),
        column("avatar"),
        generated("created_at"),
      ],
    }
  };
}

fn user_from_row(row: &Row) -> User {
  User {
    id: row.get(0),
    username: row.get(1),
    fullname: row.get(2),
    email: row.get(3),
    password: row.get(4),
    gender: row.get(5),
    avatar: row.get(6),
    created_at: row.get(7),
  }
}

fn user_from_opt_row(row: &Option<Row>) -> Option<User> {
  if let Some(ref row) = row {
    Some(user_from_row(row))
  } else {
    None
  }
}

impl UserService {
  pub fn new(cl: SharedClient) -> Result<UserService> {
    let select = USER_COLUMNS.build_select_query();
    // Build user_by_* queries
    let user_by_id = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE id = $1"#, select))?;
    let user_by_email = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE email = $1"#, select))?;
    let user_by_username = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE username = $1"#, select))?;
    // Login accepts either identifier in one lookup.
    let user_by_username_or_email = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE username = $1 OR email = $1"#, select))?;

    let insert_user = VersionedStatement::new(cl.clone(),
        &format!(r#"{} RETURNING {}"#,
        USER_COLUMNS.build_insert_query(), USER_COLUMNS.get_columns()))?;

    let update_password = VersionedStatement::new(cl.clone(),
        r#"UPDATE users SET password = $2 WHERE id = $1"#)?;

    Ok(UserService {
      user_by_id,
      user_by_email,
      user_by_username,
      user_by_username_or_email,
      insert_user,
      update_password,
    })
  }

  pub async fn prepare(&self) -> Result<()> {
    self.user_by_id.prepare().await?;
    self.user_by_email.prepare().await?;
    self.user_by_username.prepare().await?;
    self.user_by_username_or_email.prepare().await?;

    self.insert_user.prepare().await?;
    self.update_password.prepare().await?;

    Ok(())
  }

  pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
    let row = self.user_by_id.query_opt(&[&id]).await?;
    Ok(user_from_opt_row(&row))
  }

  pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
    let row = self.user_by_email.query_opt(&[&email]).await?;
    Ok(user_from_opt_row(&row))
  }

  pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
    let row = self.user_by_username.query_opt(&[&username]).await?;
    Ok(user_from_opt_row(&row))
  }

  pub async fn get_by_username_or_email(&self, name: &str) -> Result<Option<User>> {
    let row = self.user_by_username_or_email.query_opt(&[&name]).await?;
    Ok(user_from_opt_row(&row))
  }

  /// Insert a registration.  The unique constraints on username and
  /// email are the real duplicate guard; handler pre-checks only shape
  /// the error message.
  pub async fn insert(&self, user: &NewUser) -> Result<User> {
    let row = self.insert_user.query_one(&[
        &user.username, &user.fullname, &user.email,
        &user.password, &user.gender, &user.avatar,
    ]).await?;
    Ok(user_from_row(&row))
  }

  /// Rehash the password with the current scheme and store it.
  pub async fn update_password(&self, user_id: i32, password: &str) -> Result<u64> {
    let hashed = pass::hash_password(password)?;
    Ok(self.update_password.execute(&[&user_id, &hashed]).await?)
  }
}
