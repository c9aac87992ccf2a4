use libreauth::pass::{Algorithm, HashBuilder, Hasher};

use crate::error::*;

pub const PWD_ALGORITHM: Algorithm = Algorithm::Argon2;
pub const PWD_SCHEME_VERSION: usize = 1;

// If the Hasher changes, make sure to increment PWD_SCHEME_VERSION
lazy_static! {
  pub static ref HASHER: Hasher = {
    HashBuilder::new()
      .algorithm(PWD_ALGORITHM)
      .version(PWD_SCHEME_VERSION)
      .finalize()
      .unwrap()
  };
}

/// Result of checking a clear-text password against the stored PHC
/// string.  `needs_update` means the hash predates the current scheme
/// and should be regenerated while the clear text is at hand.
#[derive(Debug)]
pub struct CheckedPass {
  pub is_valid: bool,
  pub needs_update: bool,
}

pub fn check_password(stored: &str, password: &str) -> Result<CheckedPass> {
  let checker = HashBuilder::from_phc(stored)?;
  let is_valid = checker.is_valid(password);
  Ok(CheckedPass {
    is_valid,
    needs_update: is_valid && checker.needs_update(Some(PWD_SCHEME_VERSION)),
  })
}

pub fn hash_password(password: &str) -> Result<String> {
  Ok(HASHER.hash(password)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_check_round_trip() {
    let hash = hash_password("correct horse battery").unwrap();
    assert_ne!(hash, "correct horse battery");

    let checked = check_password(&hash, "correct horse battery").unwrap();
    assert!(checked.is_valid);
    assert!(!checked.needs_update);
  }

  #[test]
  fn wrong_password_is_invalid() {
    let hash = hash_password("correct horse battery").unwrap();
    let checked = check_password(&hash, "wrong horse").unwrap();
    assert!(!checked.is_valid);
  }
}
