use crate::forms::EducationForm;

use super::*;

/// Education entry rules: school/degree/field required and capped,
/// from-date required, optional fields capped.
pub fn validate_education(form: &EducationForm) -> Validation {
  let mut v = Validation::new();

  let school = form.school.as_deref();
  let degree = form.degree.as_deref();
  let field = form.field.as_deref();

  if !len_at_most(school, 100) {
    v.add("school", "School must be less than 100 characters long");
  }
  if !len_at_most(degree, 100) {
    v.add("degree", "Degree must be less than 100 characters long");
  }
  if !len_at_most(field, 100) {
    v.add("field", "Field of study must be less than 100 characters long");
  }
  if !len_at_most(form.location.as_deref(), 100) {
    v.add("location", "Location must be less than 100 characters long");
  }
  if !len_at_most(form.description.as_deref(), 1000) {
    v.add("description", "Description must be less than 1000 characters long");
  }

  if is_empty(school) {
    v.add("school", "School should not be empty");
  }
  if is_empty(degree) {
    v.add("degree", "Degree should not be empty");
  }
  if is_empty(field) {
    v.add("field", "Field should not be empty");
  }
  if form.from.is_none() {
    v.add("from", "From Date should not be empty");
  }

  v
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_form() -> EducationForm {
    EducationForm {
      school: Some("State University".to_string()),
      degree: Some("BSc".to_string()),
      field: Some("Computer Science".to_string()),
      from: Some("2015-09-01".parse().unwrap()),
      ..Default::default()
    }
  }

  #[test]
  fn accepts_minimal_form() {
    assert!(validate_education(&valid_form()).is_valid());
  }

  #[test]
  fn all_required_fields_reported_when_blank() {
    let v = validate_education(&EducationForm::default());
    for field in ["school", "degree", "field", "from"].iter() {
      assert!(v.errors.contains_key(*field), "missing error for {}", field);
    }
  }

  #[test]
  fn caps_apply_to_optional_fields() {
    let mut form = valid_form();
    form.location = Some("x".repeat(101));
    assert!(!validate_education(&form).is_valid());
    form.location = Some("x".repeat(100));
    assert!(validate_education(&form).is_valid());
  }
}
