use serde::{Deserialize, Serialize};

use crate::models::{Gender, User, DEFAULT_AVATAR};

/// Registration submission.  Every field is optional at the wire level;
/// the validation gate reports what is missing.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisterUser {
  pub username: Option<String>,
  pub fullname: Option<String>,
  pub email: Option<String>,
  pub password: Option<String>,
  pub gender: Option<String>,
}

/// Insert-ready user record, produced after validation and hashing.
#[derive(Debug)]
pub struct NewUser {
  pub username: String,
  pub fullname: String,
  pub email: String,
  /// PHC hash, never the clear text.
  pub password: String,
  pub gender: Gender,
  pub avatar: String,
}

impl RegisterUser {
  pub fn into_new_user(self, password_hash: String) -> NewUser {
    NewUser {
      username: self.username.unwrap_or_default(),
      fullname: self.fullname.unwrap_or_default(),
      email: self.email.unwrap_or_default(),
      password: password_hash,
      gender: Gender::normalize(self.gender.as_deref()),
      avatar: DEFAULT_AVATAR.to_string(),
    }
  }
}

/// Login submission.  `username` also accepts the account email.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginUser {
  pub username: Option<String>,
  pub password: Option<String>,
}

/// Login success body; the token is ready for the Authorization header.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
  pub success: bool,
  pub token: String,
}

/// Shape returned by `GET /api/users/current`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
  pub id: i32,
  pub username: String,
  pub fullname: String,
  pub email: String,
  pub avatar: String,
}

impl From<User> for CurrentUser {
  fn from(user: User) -> Self {
    CurrentUser {
      id: user.id,
      username: user.username,
      fullname: user.fullname,
      email: user.email,
      avatar: user.avatar,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn into_new_user_normalizes_gender_and_avatar() {
    let form = RegisterUser {
      username: Some("amal".to_string()),
      fullname: Some("Amal Perera".to_string()),
      email: Some("amal@example.com".to_string()),
      password: Some("hunter2hunter2".to_string()),
      gender: Some("Male".to_string()),
    };
    let user = form.into_new_user("$phc$hash".to_string());
    assert_eq!(user.gender, Gender::M);
    assert_eq!(user.avatar, DEFAULT_AVATAR);
    assert_eq!(user.password, "$phc$hash");
  }
}
