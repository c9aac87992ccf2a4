use serde::{Deserialize, Serialize};

use chrono::{Duration, Utc};

use jsonwebtoken::{
  encode, Header, EncodingKey,
  decode, DecodingKey,
  Validation
};

use crate::error::*;
use crate::models::User;

/// Tokens expire one hour after issue.
const TOKEN_TTL_SECS: i64 = 3600;

/// The authenticated caller, decoded from the bearer token.
#[derive(Debug, Default, Clone)]
pub struct AuthData {
  pub user_id: i32,
  pub username: String,
  pub avatar: String,
  pub token: String,
}

/// Token claims: an identity snapshot plus expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  pub id: i32,
  pub username: String,
  pub avatar: String,
  pub exp: i64,
}

pub trait GenerateJwt {
  fn generate_jwt(&self) -> Result<String>;
}

pub trait DecodeJwt {
  fn decode_jwt(&self) -> Result<AuthData>;
}

impl GenerateJwt for User {
  fn generate_jwt(&self) -> Result<String> {
    let claims = Claims {
      id: self.id,
      username: self.username.clone(),
      avatar: self.avatar.clone(),
      exp: (Utc::now() + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
    };

    let header = Header::default();
    let secret = &EncodingKey::from_secret(get_secret().as_ref());
    let token = encode(&header, &claims, secret)?;

    Ok(token)
  }
}

impl DecodeJwt for String {
  fn decode_jwt(&self) -> Result<AuthData> {
    let secret = get_secret();
    let secret_key = DecodingKey::from_secret(secret.as_ref());
    let token = decode::<Claims>(&self, &secret_key, &Validation::default())?;
    Ok(AuthData {
      user_id: token.claims.id,
      username: token.claims.username,
      avatar: token.claims.avatar,
      token: self.to_string(),
    })
  }
}

fn get_secret() -> String {
  dotenv::var("JWT_SECRET")
    .expect("Missing JWT_SECRET environment variable.")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Gender;

  fn test_user() -> User {
    User {
      id: 7,
      username: "amal".to_string(),
      fullname: "Amal Perera".to_string(),
      email: "amal@example.com".to_string(),
      password: "$phc$hash".to_string(),
      gender: Gender::N,
      avatar: "http://www.gravatar.com/avatar/?d=mm".to_string(),
      created_at: chrono::NaiveDateTime::from_timestamp(1_500_000_000, 0),
    }
  }

  #[test]
  fn round_trip_preserves_identity_snapshot() {
    std::env::set_var("JWT_SECRET", "test-secret");

    let token = test_user().generate_jwt().unwrap();
    let auth = token.decode_jwt().unwrap();

    assert_eq!(auth.user_id, 7);
    assert_eq!(auth.username, "amal");
    assert_eq!(auth.avatar, "http://www.gravatar.com/avatar/?d=mm");
    assert_eq!(auth.token, token);
  }

  #[test]
  fn tampered_token_is_rejected() {
    std::env::set_var("JWT_SECRET", "test-secret");

    let mut token = test_user().generate_jwt().unwrap();
    token.push('x');
    assert!(token.decode_jwt().is_err());
  }
}
