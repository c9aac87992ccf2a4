use crate::forms::ProfileForm;

use super::*;

const LINK_FIELDS: [&str; 4] = ["twitter", "linkedin", "github", "portfolio"];

/// Profile submission rules.  Skills are one comma-separated string;
/// blank segments (including leading or trailing commas) are rejected
/// before the split happens downstream.
pub fn validate_profile(form: &ProfileForm) -> Validation {
  let mut v = Validation::new();

  let handle = form.handle.as_deref();
  let status = form.status.as_deref();
  let skills = form.skills.as_deref();

  if !len_between(handle, 3, 30) {
    v.add("handle", "Handle must be between 3 and 30 characters long");
  }
  if is_empty(handle) {
    v.add("handle", "Handle should not be empty");
  }

  if !len_between(status, 2, 100) {
    v.add("status", "Status must be between 2 and 100 characters long");
  }
  if is_empty(status) {
    v.add("status", "Status should not be empty");
  }

  if has_blank_segment(skills.unwrap_or(""), ',') {
    v.add(
      "skills",
      "One or more skill is empty. Also check for any leading or trailing commas.",
    );
  }
  if is_empty(skills) {
    v.add("skills", "Skills should not be empty");
  }

  let links = [
    form.twitter.as_deref(),
    form.linkedin.as_deref(),
    form.github.as_deref(),
    form.portfolio.as_deref(),
  ];
  for (field, value) in LINK_FIELDS.iter().zip(links.iter()) {
    if let Some(link) = *value {
      if !is_empty(Some(link)) && !is_url(link) {
        v.add(field, format!("URL for '{}' is not valid", field));
      }
    }
  }

  v
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_form() -> ProfileForm {
    ProfileForm {
      handle: Some("amal".to_string()),
      status: Some("Engineer".to_string()),
      skills: Some("rust,sql".to_string()),
      ..Default::default()
    }
  }

  #[test]
  fn accepts_minimal_form() {
    assert!(validate_profile(&valid_form()).is_valid());
  }

  #[test]
  fn trailing_comma_in_skills_is_an_error() {
    let mut form = valid_form();
    form.skills = Some("rust,sql,".to_string());
    let v = validate_profile(&form);
    assert!(v.errors.get("skills").map_or(false, |m| m.contains("leading or trailing")));
  }

  #[test]
  fn missing_skills_is_an_error() {
    let mut form = valid_form();
    form.skills = None;
    let v = validate_profile(&form);
    assert_eq!(
      v.errors.get("skills").map(String::as_str),
      Some("Skills should not be empty")
    );
  }

  #[test]
  fn status_length_bounds() {
    let mut form = valid_form();
    form.status = Some("x".to_string());
    assert!(!validate_profile(&form).is_valid());
    form.status = Some("xx".to_string());
    assert!(validate_profile(&form).is_valid());
  }

  #[test]
  fn bad_link_is_reported_under_its_field() {
    let mut form = valid_form();
    form.github = Some("not a url".to_string());
    let v = validate_profile(&form);
    assert_eq!(
      v.errors.get("github").map(String::as_str),
      Some("URL for 'github' is not valid")
    );
  }

  #[test]
  fn good_links_pass() {
    let mut form = valid_form();
    form.twitter = Some("https://twitter.com/someone".to_string());
    form.portfolio = Some("example.dev".to_string());
    assert!(validate_profile(&form).is_valid());
  }
}
