use super::*;

/// Post text bounds.
pub fn validate_post_text(text: Option<&str>) -> Validation {
  validate_text(text, "Post", 20, 5000)
}

/// Comment text bounds.
pub fn validate_comment_text(text: Option<&str>) -> Validation {
  validate_text(text, "Comment", 6, 500)
}

fn validate_text(text: Option<&str>, tag: &str, min: usize, max: usize) -> Validation {
  let mut v = Validation::new();

  if !len_between(text, min, max) {
    v.add(
      "text",
      format!("{} text must be between {} and {} characters long", tag, min, max),
    );
  }
  if is_empty(text) {
    v.add("text", format!("{} text should not be empty", tag));
  }

  v
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn post_boundary_at_twenty_characters() {
    let twenty = "x".repeat(20);
    assert!(validate_post_text(Some(&twenty)).is_valid());

    let nineteen = "x".repeat(19);
    let v = validate_post_text(Some(&nineteen));
    assert!(!v.is_valid());
    assert!(v.errors.get("text").map_or(false, |m| m.contains("between 20 and 5000")));
  }

  #[test]
  fn post_upper_bound() {
    let max = "x".repeat(5000);
    assert!(validate_post_text(Some(&max)).is_valid());
    let over = "x".repeat(5001);
    assert!(!validate_post_text(Some(&over)).is_valid());
  }

  #[test]
  fn comment_boundaries() {
    assert!(validate_comment_text(Some("abcdef")).is_valid());
    assert!(!validate_comment_text(Some("abcde")).is_valid());
    let max = "x".repeat(500);
    assert!(validate_comment_text(Some(&max)).is_valid());
    let over = "x".repeat(501);
    assert!(!validate_comment_text(Some(&over)).is_valid());
  }

  #[test]
  fn missing_text_reports_empty_message() {
    let v = validate_post_text(None);
    assert_eq!(
      v.errors.get("text").map(String::as_str),
      Some("Post text should not be empty")
    );
  }
}
