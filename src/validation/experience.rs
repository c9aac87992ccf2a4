use crate::forms::ExperienceForm;

use super::*;

/// Experience entry rules: title/company required and capped, from-date
/// required, optional fields capped.
pub fn validate_experience(form: &ExperienceForm) -> Validation {
  let mut v = Validation::new();

  let title = form.title.as_deref();
  let company = form.company.as_deref();

  if !len_at_most(title, 100) {
    v.add("title", "Job title must be less than 100 characters long");
  }
  if !len_at_most(company, 100) {
    v.add("company", "Company must be less than 100 characters long");
  }
  if !len_at_most(form.location.as_deref(), 100) {
    v.add("location", "Location must be less than 100 characters long");
  }
  if !len_at_most(form.description.as_deref(), 1000) {
    v.add("description", "Description must be less than 1000 characters long");
  }

  if is_empty(title) {
    v.add("title", "Title should not be empty");
  }
  if is_empty(company) {
    v.add("company", "Company should not be empty");
  }
  if form.from.is_none() {
    v.add("from", "From Date should not be empty");
  }

  v
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_form() -> ExperienceForm {
    ExperienceForm {
      title: Some("Engineer".to_string()),
      company: Some("Initech".to_string()),
      from: Some("2019-04-01".parse().unwrap()),
      ..Default::default()
    }
  }

  #[test]
  fn accepts_minimal_form() {
    assert!(validate_experience(&valid_form()).is_valid());
  }

  #[test]
  fn from_date_is_required() {
    let mut form = valid_form();
    form.from = None;
    let v = validate_experience(&form);
    assert_eq!(
      v.errors.get("from").map(String::as_str),
      Some("From Date should not be empty")
    );
  }

  #[test]
  fn title_and_company_required() {
    let v = validate_experience(&ExperienceForm::default());
    assert!(v.errors.contains_key("title"));
    assert!(v.errors.contains_key("company"));
    assert!(v.errors.contains_key("from"));
  }

  #[test]
  fn long_description_is_capped() {
    let mut form = valid_form();
    form.description = Some("x".repeat(1001));
    assert!(!validate_experience(&form).is_valid());
    form.description = Some("x".repeat(1000));
    assert!(validate_experience(&form).is_valid());
  }
}
