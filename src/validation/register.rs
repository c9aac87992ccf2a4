use crate::forms::RegisterUser;

use super::*;

/// Registration rules: length bounds on every credential field, email
/// shape, non-empty gender.  The gender value itself is normalized
/// later; any non-empty string passes here.
pub fn validate_register(form: &RegisterUser) -> Validation {
  let mut v = Validation::new();

  let username = form.username.as_deref();
  let fullname = form.fullname.as_deref();
  let email = form.email.as_deref();
  let password = form.password.as_deref();

  if !len_between(username, 3, 30) {
    v.add("username", "Username must be between 3 and 30 characters long");
  }
  if !len_between(fullname, 3, 100) {
    v.add("fullname", "Fullname must be between 3 and 100 characters long");
  }
  if !len_between(email, 6, 100) {
    v.add("email", "Email must be between 6 and 100 characters long");
  }
  if !len_between(password, 8, 100) {
    v.add("password", "Password must be between 8 and 100 characters long");
  }

  if is_empty(username) {
    v.add("username", "Username should not be empty");
  }
  if is_empty(fullname) {
    v.add("fullname", "Fullname should not be empty");
  }
  if !is_email(email.unwrap_or("")) {
    v.add("email", "Email is invalid");
  }
  if is_empty(email) {
    v.add("email", "Email should not be empty");
  }
  if is_empty(password) {
    v.add("password", "Password should not be empty");
  }
  if is_empty(form.gender.as_deref()) {
    v.add("gender", "Gender should not be empty");
  }

  v
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_form() -> RegisterUser {
    RegisterUser {
      username: Some("amal".to_string()),
      fullname: Some("Amal Perera".to_string()),
      email: Some("amal@example.com".to_string()),
      password: Some("longenough".to_string()),
      gender: Some("male".to_string()),
    }
  }

  #[test]
  fn accepts_a_complete_form() {
    assert!(validate_register(&valid_form()).is_valid());
  }

  #[test]
  fn rejects_short_username() {
    let mut form = valid_form();
    form.username = Some("ab".to_string());
    let v = validate_register(&form);
    assert!(!v.is_valid());
    assert!(v.errors.contains_key("username"));
  }

  #[test]
  fn rejects_bad_email_shape() {
    let mut form = valid_form();
    form.email = Some("not-an-email".to_string());
    let v = validate_register(&form);
    assert_eq!(v.errors.get("email").map(String::as_str), Some("Email is invalid"));
  }

  #[test]
  fn empty_beats_length_message() {
    let mut form = valid_form();
    form.password = None;
    let v = validate_register(&form);
    assert_eq!(
      v.errors.get("password").map(String::as_str),
      Some("Password should not be empty")
    );
  }

  #[test]
  fn missing_gender_is_reported() {
    let mut form = valid_form();
    form.gender = None;
    let v = validate_register(&form);
    assert!(v.errors.contains_key("gender"));
  }

  #[test]
  fn password_boundaries() {
    let mut form = valid_form();
    form.password = Some("x".repeat(8));
    assert!(validate_register(&form).is_valid());
    form.password = Some("x".repeat(7));
    assert!(!validate_register(&form).is_valid());
    form.password = Some("x".repeat(101));
    assert!(!validate_register(&form).is_valid());
  }
}
