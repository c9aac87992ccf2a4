use crate::forms::LoginUser;

use super::*;

/// Login only needs both fields present; credential checks happen
/// against the store.
pub fn validate_login(form: &LoginUser) -> Validation {
  let mut v = Validation::new();

  if is_empty(form.username.as_deref()) {
    v.add("username", "Username should not be empty");
  }
  if is_empty(form.password.as_deref()) {
    v.add("password", "Password should not be empty");
  }

  v
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn both_fields_required() {
    let v = validate_login(&LoginUser::default());
    assert!(v.errors.contains_key("username"));
    assert!(v.errors.contains_key("password"));
  }

  #[test]
  fn complete_form_passes() {
    let form = LoginUser {
      username: Some("amal".to_string()),
      password: Some("hunter2hunter2".to_string()),
    };
    assert!(validate_login(&form).is_valid());
  }
}
