use chrono::NaiveDateTime;

use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

/// Used when registration does not go through the avatar service.
pub const DEFAULT_AVATAR: &str = "http://www.gravatar.com/avatar/?d=mm";

/// Gender marker on the user record, stored as a postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSql, FromSql)]
#[postgres(name = "gender")]
pub enum Gender {
  #[postgres(name = "M")]
  M,
  #[postgres(name = "F")]
  F,
  #[postgres(name = "N")]
  N,
}

impl Gender {
  /// Normalize free-form client input: "male"/"female" in any casing map
  /// to M/F, anything else (including absent) to N.
  pub fn normalize(raw: Option<&str>) -> Gender {
    match raw {
      Some(gender) => match gender.to_lowercase().as_str() {
        "male" => Gender::M,
        "female" => Gender::F,
        _ => Gender::N,
      },
      None => Gender::N,
    }
  }
}

impl Default for Gender {
  fn default() -> Self {
    Gender::N
  }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
  pub id: i32,
  pub username: String,
  pub fullname: String,
  pub email: String,
  // Stored as a PHC hash; never serialized out.
  #[serde(skip_serializing)]
  pub password: String,
  pub gender: Gender,
  pub avatar: String,
  pub created_at: NaiveDateTime,
}

/// Public owner projection joined onto profiles, posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPublic {
  pub id: i32,
  pub username: String,
  pub fullname: String,
  pub email: String,
  pub avatar: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_maps_known_values() {
    assert_eq!(Gender::normalize(Some("male")), Gender::M);
    assert_eq!(Gender::normalize(Some("Female")), Gender::F);
    assert_eq!(Gender::normalize(Some("MALE")), Gender::M);
  }

  #[test]
  fn normalize_defaults_to_n() {
    assert_eq!(Gender::normalize(None), Gender::N);
    assert_eq!(Gender::normalize(Some("")), Gender::N);
    assert_eq!(Gender::normalize(Some("other")), Gender::N);
  }

  #[test]
  fn password_is_never_serialized() {
    let user = User {
      id: 1,
      username: "amal".to_string(),
      fullname: "Amal Perera".to_string(),
      email: "amal@example.com".to_string(),
      password: "$argon2$secret".to_string(),
      gender: Gender::N,
      avatar: DEFAULT_AVATAR.to_string(),
      created_at: chrono::NaiveDateTime::from_timestamp(1_500_000_000, 0),
    };
    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("password"));
    assert!(!json.contains("argon2"));
  }
}
