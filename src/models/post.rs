use chrono::NaiveDateTime;

use serde::{Deserialize, Serialize};

use crate::models::UserPublic;
use crate::subdoc::{KeyedEntry, OwnedEntry};

/// One like record.  The list holds at most one per user per post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Like {
  pub user: i32,
}

impl OwnedEntry for Like {
  fn owner(&self) -> i32 {
    self.user
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentEntry {
  pub id: String,
  pub user: i32,
  pub text: String,
  pub name: Option<String>,
  pub avatar: Option<String>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl KeyedEntry for CommentEntry {
  fn entry_id(&self) -> &str {
    &self.id
  }
}

impl OwnedEntry for CommentEntry {
  fn owner(&self) -> i32 {
    self.user
  }
}

/// A post document with the author's public fields populated.  Likes and
/// comments are embedded newest-first.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PostDetails {
  pub id: i32,
  pub user: UserPublic,
  pub text: String,
  pub name: Option<String>,
  pub avatar: Option<String>,
  pub likes: Vec<Like>,
  pub comments: Vec<CommentEntry>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl PostDetails {
  pub fn owned_by(&self, user_id: i32) -> bool {
    self.user.id == user_id
  }
}
