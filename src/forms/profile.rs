use chrono::NaiveDate;

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::models::{EducationEntry, ExperienceEntry, OnlineLinks};

/// Create-or-update profile submission.  The stored handle is always the
/// caller's username; the submitted one is checked for shape only.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileForm {
  pub handle: Option<String>,
  pub company: Option<String>,
  pub location: Option<String>,
  pub status: Option<String>,
  pub skills: Option<String>,
  pub bio: Option<String>,
  pub twitter: Option<String>,
  pub linkedin: Option<String>,
  pub github: Option<String>,
  pub portfolio: Option<String>,
}

impl ProfileForm {
  /// Skills arrive as one comma-separated string and are stored split
  /// and trimmed.
  pub fn split_skills(&self) -> Vec<String> {
    match &self.skills {
      Some(skills) => skills.split(',').map(|s| s.trim().to_string()).collect(),
      None => Vec::new(),
    }
  }

  /// The link set is rebuilt from every submission; links left out are
  /// dropped.
  pub fn online_links(&self) -> OnlineLinks {
    OnlineLinks {
      twitter: self.twitter.clone(),
      linkedin: self.linkedin.clone(),
      github: self.github.clone(),
      portfolio: self.portfolio.clone(),
    }
  }
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ExperienceForm {
  pub title: Option<String>,
  pub company: Option<String>,
  pub location: Option<String>,
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub current: Option<bool>,
  pub description: Option<String>,
}

impl ExperienceForm {
  /// Build the entry to append.  Validation has run by now, so the
  /// required fields are present.  `current` defaults to true exactly
  /// when no end date was given and the flag was not supplied.
  pub fn into_entry(self) -> ExperienceEntry {
    let current = self.current.unwrap_or(self.to.is_none());
    ExperienceEntry {
      id: Uuid::new_v4().to_string(),
      title: self.title.unwrap_or_default(),
      company: self.company.unwrap_or_default(),
      location: self.location,
      from: self.from.unwrap_or_else(crate::util::today),
      to: self.to,
      current,
      description: self.description,
    }
  }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateExperience {
  pub title: Option<String>,
  pub company: Option<String>,
  pub location: Option<String>,
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub current: Option<bool>,
  pub description: Option<String>,
}

impl UpdateExperience {
  pub fn apply(&self, entry: &mut ExperienceEntry) {
    if let Some(title) = &self.title {
      entry.title = title.clone();
    }
    if let Some(company) = &self.company {
      entry.company = company.clone();
    }
    if let Some(location) = &self.location {
      entry.location = Some(location.clone());
    }
    if let Some(from) = self.from {
      entry.from = from;
    }
    if let Some(to) = self.to {
      entry.to = Some(to);
      // An end date was just supplied; unless the caller also sent the
      // flag, the entry stops being current.
      if self.current.is_none() {
        entry.current = false;
      }
    }
    if let Some(current) = self.current {
      entry.current = current;
    }
    if let Some(description) = &self.description {
      entry.description = Some(description.clone());
    }
  }
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EducationForm {
  pub school: Option<String>,
  pub degree: Option<String>,
  pub field: Option<String>,
  pub location: Option<String>,
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub current: Option<bool>,
  pub description: Option<String>,
}

impl EducationForm {
  /// Same `current` defaulting as experience entries.
  pub fn into_entry(self) -> EducationEntry {
    let current = self.current.unwrap_or(self.to.is_none());
    EducationEntry {
      id: Uuid::new_v4().to_string(),
      school: self.school.unwrap_or_default(),
      degree: self.degree.unwrap_or_default(),
      field: self.field.unwrap_or_default(),
      location: self.location,
      from: self.from.unwrap_or_else(crate::util::today),
      to: self.to,
      current,
      description: self.description,
    }
  }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateEducation {
  pub school: Option<String>,
  pub degree: Option<String>,
  pub field: Option<String>,
  pub location: Option<String>,
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub current: Option<bool>,
  pub description: Option<String>,
}

impl UpdateEducation {
  pub fn apply(&self, entry: &mut EducationEntry) {
    if let Some(school) = &self.school {
      entry.school = school.clone();
    }
    if let Some(degree) = &self.degree {
      entry.degree = degree.clone();
    }
    if let Some(field) = &self.field {
      entry.field = field.clone();
    }
    if let Some(location) = &self.location {
      entry.location = Some(location.clone());
    }
    if let Some(from) = self.from {
      entry.from = from;
    }
    if let Some(to) = self.to {
      entry.to = Some(to);
      if self.current.is_none() {
        entry.current = false;
      }
    }
    if let Some(current) = self.current {
      entry.current = current;
    }
    if let Some(description) = &self.description {
      entry.description = Some(description.clone());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  #[test]
  fn split_skills_trims_segments() {
    let form = ProfileForm {
      skills: Some("rust, sql ,  http".to_string()),
      ..Default::default()
    };
    assert_eq!(form.split_skills(), ["rust", "sql", "http"]);
  }

  #[test]
  fn experience_current_defaults_true_without_end_date() {
    let form = ExperienceForm {
      title: Some("Engineer".to_string()),
      company: Some("Initech".to_string()),
      from: Some(date("2019-04-01")),
      ..Default::default()
    };
    let entry = form.into_entry();
    assert!(entry.current);
    assert!(!entry.id.is_empty());
  }

  #[test]
  fn experience_current_defaults_false_with_end_date() {
    let form = ExperienceForm {
      title: Some("Engineer".to_string()),
      company: Some("Initech".to_string()),
      from: Some(date("2019-04-01")),
      to: Some(date("2020-04-01")),
      ..Default::default()
    };
    assert!(!form.into_entry().current);
  }

  #[test]
  fn experience_current_explicit_flag_wins() {
    let form = ExperienceForm {
      title: Some("Engineer".to_string()),
      company: Some("Initech".to_string()),
      from: Some(date("2019-04-01")),
      to: Some(date("2020-04-01")),
      current: Some(true),
      ..Default::default()
    };
    assert!(form.into_entry().current);
  }

  #[test]
  fn update_experience_patches_only_supplied_fields() {
    let mut entry = ExperienceForm {
      title: Some("Engineer".to_string()),
      company: Some("Initech".to_string()),
      from: Some(date("2019-04-01")),
      ..Default::default()
    }
    .into_entry();
    let id = entry.id.clone();

    let patch = UpdateExperience {
      title: Some("Senior Engineer".to_string()),
      ..Default::default()
    };
    patch.apply(&mut entry);

    assert_eq!(entry.title, "Senior Engineer");
    assert_eq!(entry.company, "Initech");
    assert_eq!(entry.from, date("2019-04-01"));
    assert_eq!(entry.id, id);
    assert!(entry.current);
  }

  #[test]
  fn update_experience_end_date_clears_current() {
    let mut entry = ExperienceForm {
      title: Some("Engineer".to_string()),
      company: Some("Initech".to_string()),
      from: Some(date("2019-04-01")),
      ..Default::default()
    }
    .into_entry();
    assert!(entry.current);

    let patch = UpdateExperience {
      to: Some(date("2021-01-31")),
      ..Default::default()
    };
    patch.apply(&mut entry);

    assert_eq!(entry.to, Some(date("2021-01-31")));
    assert!(!entry.current);
  }

  #[test]
  fn education_current_defaulting_matches_experience() {
    let open = EducationForm {
      school: Some("State University".to_string()),
      degree: Some("BSc".to_string()),
      field: Some("CS".to_string()),
      from: Some(date("2015-09-01")),
      ..Default::default()
    };
    assert!(open.into_entry().current);

    let finished = EducationForm {
      school: Some("State University".to_string()),
      degree: Some("BSc".to_string()),
      field: Some("CS".to_string()),
      from: Some(date("2015-09-01")),
      to: Some(date("2019-06-30")),
      ..Default::default()
    };
    assert!(!finished.into_entry().current);
  }
}
