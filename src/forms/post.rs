use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::models::CommentEntry;

/// New post submission.  `name` and `avatar` are optional display
/// snapshots supplied by the client.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CreatePost {
  pub text: Option<String>,
  pub name: Option<String>,
  pub avatar: Option<String>,
}

/// Partial update; only the text can change.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdatePost {
  pub text: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateComment {
  pub text: Option<String>,
  pub name: Option<String>,
  pub avatar: Option<String>,
}

impl CreateComment {
  /// Build the entry to append; the caller becomes the owner.
  pub fn into_entry(self, user: i32) -> CommentEntry {
    let now = crate::util::now();
    CommentEntry {
      id: Uuid::new_v4().to_string(),
      user,
      text: self.text.unwrap_or_default(),
      name: self.name,
      avatar: self.avatar,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Partial update; only the text can change.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateComment {
  pub text: Option<String>,
}

impl UpdateComment {
  /// In-place patch; always stamps `updated_at`.
  pub fn apply(self, entry: &mut CommentEntry) {
    if let Some(text) = self.text {
      entry.text = text;
    }
    entry.updated_at = crate::util::now();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn comment_entry_records_owner_and_fresh_id() {
    let form = CreateComment {
      text: Some("sounds about right".to_string()),
      ..Default::default()
    };
    let entry = form.into_entry(42);
    assert_eq!(entry.user, 42);
    assert_eq!(entry.text, "sounds about right");
    assert!(!entry.id.is_empty());
    assert_eq!(entry.created_at, entry.updated_at);
  }

  #[test]
  fn comment_entry_ids_are_unique() {
    let a = CreateComment::default().into_entry(1);
    let b = CreateComment::default().into_entry(1);
    assert_ne!(a.id, b.id);
  }

  #[test]
  fn update_comment_patches_text_and_stamps_updated_at() {
    let mut entry = CreateComment {
      text: Some("first draft".to_string()),
      name: Some("Amal".to_string()),
      ..Default::default()
    }
    .into_entry(9);
    let id = entry.id.clone();
    let created_at = entry.created_at;

    let patch = UpdateComment {
      text: Some("second draft".to_string()),
    };
    patch.apply(&mut entry);

    assert_eq!(entry.text, "second draft");
    assert!(entry.updated_at >= created_at);
    // Everything not in the patch stays put.
    assert_eq!(entry.id, id);
    assert_eq!(entry.user, 9);
    assert_eq!(entry.name.as_deref(), Some("Amal"));
    assert_eq!(entry.created_at, created_at);
  }

  #[test]
  fn update_comment_without_text_still_advances_updated_at() {
    let mut entry = CreateComment {
      text: Some("stays the same".to_string()),
      ..Default::default()
    }
    .into_entry(9);

    UpdateComment::default().apply(&mut entry);
    assert_eq!(entry.text, "stays the same");
    assert!(entry.updated_at >= entry.created_at);
  }
}
