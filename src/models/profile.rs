use chrono::{NaiveDate, NaiveDateTime};

use serde::{Deserialize, Serialize};

use crate::models::UserPublic;
use crate::subdoc::KeyedEntry;

/// Fixed set of optional profile links.  The whole object is replaced on
/// every profile submission.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnlineLinks {
  pub twitter: Option<String>,
  pub linkedin: Option<String>,
  pub github: Option<String>,
  pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
  pub id: String,
  pub title: String,
  pub company: String,
  pub location: Option<String>,
  pub from: NaiveDate,
  pub to: Option<NaiveDate>,
  pub current: bool,
  pub description: Option<String>,
}

impl KeyedEntry for ExperienceEntry {
  fn entry_id(&self) -> &str {
    &self.id
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
  pub id: String,
  pub school: String,
  pub degree: String,
  pub field: String,
  pub location: Option<String>,
  pub from: NaiveDate,
  pub to: Option<NaiveDate>,
  pub current: bool,
  pub description: Option<String>,
}

impl KeyedEntry for EducationEntry {
  fn entry_id(&self) -> &str {
    &self.id
  }
}

/// A profile document with the owner's public fields populated.
/// Experience and education are embedded newest-first.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileDetails {
  pub id: i32,
  pub user: UserPublic,
  pub handle: String,
  pub company: Option<String>,
  pub location: Option<String>,
  pub status: String,
  pub skills: Vec<String>,
  pub bio: Option<String>,
  pub online: OnlineLinks,
  pub experience: Vec<ExperienceEntry>,
  pub education: Vec<EducationEntry>,
  pub created_at: NaiveDateTime,
}
