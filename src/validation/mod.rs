//! Input checking for the API entities.  Every validator is a pure
//! function from a submitted form to a field->message map; nothing here
//! rejects a request by itself — handlers check the result and
//! short-circuit with a 400 before touching the store.

use std::collections::BTreeMap;

use serde_json::json;

use crate::error::Error;

mod register;
mod login;
mod post;
mod profile;
mod experience;
mod education;

pub use self::{
  register::*,
  login::*,
  post::*,
  profile::*,
  experience::*,
  education::*,
};

/// Field errors keyed by field name.  Later messages for the same field
/// overwrite earlier ones, so emptiness checks win over length checks.
#[derive(Debug, Default, PartialEq)]
pub struct Validation {
  pub errors: BTreeMap<String, String>,
}

impl Validation {
  pub fn new() -> Validation {
    Default::default()
  }

  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    self.errors.insert(field.to_string(), message.into());
  }

  pub fn is_valid(&self) -> bool {
    self.errors.is_empty()
  }

  /// Handler-side short-circuit: invalid input becomes a 400 carrying
  /// the error map as body.
  pub fn into_result(self) -> crate::error::Result<()> {
    if self.is_valid() {
      Ok(())
    } else {
      Err(Error::BadRequest(json!(self.errors)))
    }
  }
}

/// Absent counts as empty, as does whitespace-only content.
pub(crate) fn is_empty(value: Option<&str>) -> bool {
  match value {
    Some(s) => s.trim().is_empty(),
    None => true,
  }
}

pub(crate) fn len_between(value: Option<&str>, min: usize, max: usize) -> bool {
  let len = value.map(|s| s.chars().count()).unwrap_or(0);
  len >= min && len <= max
}

pub(crate) fn len_at_most(value: Option<&str>, max: usize) -> bool {
  value.map(|s| s.chars().count()).unwrap_or(0) <= max
}

/// Splitting on the delimiter must not yield a blank segment; catches
/// leading, trailing and doubled delimiters.
pub(crate) fn has_blank_segment(value: &str, delimiter: char) -> bool {
  value.split(delimiter).any(|segment| segment.trim().is_empty())
}

/// Minimal shape check: one '@', non-empty local part, dotted domain.
pub(crate) fn is_email(value: &str) -> bool {
  let mut parts = value.splitn(2, '@');
  match (parts.next(), parts.next()) {
    (Some(local), Some(domain)) => {
      !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
    },
    _ => false,
  }
}

/// Accepts absolute http(s) URLs and bare dotted hosts ("example.com").
pub(crate) fn is_url(value: &str) -> bool {
  if value.is_empty() || value.contains(char::is_whitespace) {
    return false;
  }
  let rest = value
    .strip_prefix("https://")
    .or_else(|| value.strip_prefix("http://"))
    .unwrap_or(value);
  let host = rest
    .split(|c: char| c == '/' || c == '?' || c == '#')
    .next()
    .unwrap_or("");
  !host.is_empty() && host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_handles_absent_and_whitespace() {
    assert!(is_empty(None));
    assert!(is_empty(Some("")));
    assert!(is_empty(Some("   ")));
    assert!(!is_empty(Some("x")));
  }

  #[test]
  fn blank_segment_detection() {
    assert!(has_blank_segment("a,,b", ','));
    assert!(has_blank_segment(",a,b", ','));
    assert!(has_blank_segment("a,b,", ','));
    assert!(has_blank_segment("a, ,b", ','));
    assert!(!has_blank_segment("a,b,c", ','));
  }

  #[test]
  fn email_shape() {
    assert!(is_email("user@example.com"));
    assert!(is_email("a.b@sub.example.org"));
    assert!(!is_email("userexample.com"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("user@nodot"));
    assert!(!is_email("user@.com"));
  }

  #[test]
  fn url_shape() {
    assert!(is_url("https://github.com/someone"));
    assert!(is_url("http://example.com"));
    assert!(is_url("example.com/path?x=1"));
    assert!(!is_url("not a url"));
    assert!(!is_url("http://nodot"));
    assert!(!is_url(""));
  }

  #[test]
  fn validation_reports_validity() {
    let mut v = Validation::new();
    assert!(v.is_valid());
    v.add("field", "broken");
    assert!(!v.is_valid());
    assert!(v.into_result().is_err());
  }
}
