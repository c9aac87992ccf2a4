//! Operations on the ordered entry lists embedded in a parent document:
//! post comments and likes, profile experience and education.
//!
//! Every mutation is pure and in-memory.  Callers load the parent
//! document, apply an operation here and persist the whole list back, so
//! the ordering contract (newest entry first, order-preserving removal
//! and replacement) only has to be right in one place.

/// An embedded entry addressable by its identifier.  Identifiers are
/// unique within the parent's list, assigned at creation and never
/// reused.
pub trait KeyedEntry {
  fn entry_id(&self) -> &str;
}

/// An embedded entry that records the user who created it.  Ownership is
/// fixed at creation.
pub trait OwnedEntry {
  fn owner(&self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdocError {
  /// No entry with the requested id.
  NotFound,
  /// The entry exists but belongs to another user.
  Forbidden,
}

/// Outcome of a [`toggle`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
  Added,
  Removed,
}

/// Insert a new entry at the front of the list.  Lists are kept
/// most-recent-first; default read order falls out of insert order.
pub fn push_front<T>(list: &mut Vec<T>, item: T) {
  list.insert(0, item);
}

/// Toggle the caller's entry: remove it when present, otherwise build a
/// fresh one and insert it at the front.  Calling twice with the same
/// caller restores the original list.
pub fn toggle<T, F>(list: &mut Vec<T>, caller: i32, make: F) -> Toggled
where
  T: OwnedEntry,
  F: FnOnce() -> T,
{
  match list.iter().position(|entry| entry.owner() == caller) {
    Some(idx) => {
      list.remove(idx);
      Toggled::Removed
    },
    None => {
      push_front(list, make());
      Toggled::Added
    },
  }
}

/// Locate an entry by id.  Exact string equality; the first match in
/// list order wins.
pub fn find_entry<T: KeyedEntry>(list: &[T], entry_id: &str) -> Result<usize, SubdocError> {
  list.iter()
    .position(|entry| entry.entry_id() == entry_id)
    .ok_or(SubdocError::NotFound)
}

/// Locate an entry by id and verify the caller owns it.  The list is
/// never touched; failures leave no trace.
pub fn find_owned<T>(list: &[T], entry_id: &str, caller: i32) -> Result<usize, SubdocError>
where
  T: KeyedEntry + OwnedEntry,
{
  let idx = find_entry(list, entry_id)?;
  if list[idx].owner() != caller {
    return Err(SubdocError::Forbidden);
  }
  Ok(idx)
}

/// Remove an entry by id, preserving the relative order of the rest.
pub fn remove_entry<T: KeyedEntry>(list: &mut Vec<T>, entry_id: &str) -> Result<T, SubdocError> {
  let idx = find_entry(list, entry_id)?;
  Ok(list.remove(idx))
}

/// Remove the caller's entry by id.  Entries owned by another user are
/// reported as Forbidden and never removed.
pub fn remove_owned<T>(list: &mut Vec<T>, entry_id: &str, caller: i32) -> Result<T, SubdocError>
where
  T: KeyedEntry + OwnedEntry,
{
  let idx = find_owned(list, entry_id, caller)?;
  Ok(list.remove(idx))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, PartialEq)]
  struct Entry {
    id: String,
    user: i32,
  }

  impl Entry {
    fn new(id: &str, user: i32) -> Entry {
      Entry {
        id: id.to_string(),
        user,
      }
    }
  }

  impl KeyedEntry for Entry {
    fn entry_id(&self) -> &str {
      &self.id
    }
  }

  impl OwnedEntry for Entry {
    fn owner(&self) -> i32 {
      self.user
    }
  }

  fn ids(list: &[Entry]) -> Vec<&str> {
    list.iter().map(|e| e.id.as_str()).collect()
  }

  #[test]
  fn push_front_keeps_newest_first() {
    let mut list = Vec::new();
    push_front(&mut list, Entry::new("a", 1));
    push_front(&mut list, Entry::new("b", 1));
    push_front(&mut list, Entry::new("c", 2));
    assert_eq!(ids(&list), ["c", "b", "a"]);
  }

  #[test]
  fn toggle_adds_then_removes() {
    let mut list = vec![Entry::new("a", 1)];

    assert_eq!(toggle(&mut list, 2, || Entry::new("b", 2)), Toggled::Added);
    assert_eq!(list.len(), 2);
    // New entry lands at the front.
    assert_eq!(list[0].user, 2);

    assert_eq!(toggle(&mut list, 2, || Entry::new("c", 2)), Toggled::Removed);
    assert_eq!(list.len(), 1);
    assert!(list.iter().all(|e| e.user != 2));
  }

  #[test]
  fn toggle_twice_is_an_involution() {
    let original = vec![Entry::new("a", 1), Entry::new("b", 3)];
    let mut list = original.clone();

    toggle(&mut list, 2, || Entry::new("x", 2));
    toggle(&mut list, 2, || Entry::new("y", 2));

    assert_eq!(list, original);
  }

  #[test]
  fn toggle_on_empty_list() {
    let mut list: Vec<Entry> = Vec::new();
    assert_eq!(toggle(&mut list, 7, || Entry::new("a", 7)), Toggled::Added);
    assert_eq!(list.len(), 1);
    assert_eq!(toggle(&mut list, 7, || Entry::new("b", 7)), Toggled::Removed);
    assert!(list.is_empty());
  }

  #[test]
  fn find_entry_is_exact_and_first_match_wins() {
    let list = vec![
      Entry::new("aa", 1),
      Entry::new("ab", 2),
      Entry::new("ab", 3),
    ];
    assert_eq!(find_entry(&list, "ab"), Ok(1));
    assert_eq!(find_entry(&list, "a"), Err(SubdocError::NotFound));
    assert_eq!(find_entry(&list, "AB"), Err(SubdocError::NotFound));
  }

  #[test]
  fn find_owned_rejects_other_users() {
    let list = vec![Entry::new("a", 1), Entry::new("b", 2)];
    assert_eq!(find_owned(&list, "b", 2), Ok(1));
    assert_eq!(find_owned(&list, "b", 1), Err(SubdocError::Forbidden));
    assert_eq!(find_owned(&list, "z", 1), Err(SubdocError::NotFound));
  }

  #[test]
  fn remove_entry_preserves_order_of_rest() {
    let mut list = vec![
      Entry::new("a", 1),
      Entry::new("b", 1),
      Entry::new("c", 1),
    ];
    let removed = remove_entry(&mut list, "b").unwrap();
    assert_eq!(removed.id, "b");
    assert_eq!(ids(&list), ["a", "c"]);
  }

  #[test]
  fn remove_entry_twice_reports_not_found() {
    let mut list = vec![Entry::new("a", 1), Entry::new("b", 1)];
    assert!(remove_entry(&mut list, "a").is_ok());
    assert_eq!(remove_entry(&mut list, "a"), Err(SubdocError::NotFound));
    assert_eq!(ids(&list), ["b"]);
  }

  #[test]
  fn remove_owned_by_non_owner_never_mutates() {
    let original = vec![Entry::new("a", 1), Entry::new("b", 2)];
    let mut list = original.clone();

    assert_eq!(
      remove_owned(&mut list, "a", 2),
      Err(SubdocError::Forbidden)
    );
    assert_eq!(list, original);

    assert_eq!(
      remove_owned(&mut list, "missing", 2),
      Err(SubdocError::NotFound)
    );
    assert_eq!(list, original);
  }

  #[test]
  fn remove_owned_removes_exactly_the_callers_entry() {
    let mut list = vec![
      Entry::new("a", 1),
      Entry::new("b", 2),
      Entry::new("c", 1),
    ];
    let removed = remove_owned(&mut list, "b", 2).unwrap();
    assert_eq!(removed.user, 2);
    assert_eq!(ids(&list), ["a", "c"]);
  }
}
