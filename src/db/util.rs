use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnNote {
  /// Serial primary key: selected, never inserted.
  Primary,
  /// Database-defaulted column (timestamps): selected, never inserted.
  Generated,
  None,
}

#[derive(Debug, Clone)]
pub struct ColumnMapper {
  pub name: String,
  pub column: String,
  pub note: ColumnNote,
}

pub fn column(name: &'static str) -> ColumnMapper {
  ColumnMapper {
    name: name.to_string(),
    column: name.to_string(),
    note: ColumnNote::None,
  }
}

pub fn primary(name: &'static str) -> ColumnMapper {
  ColumnMapper {
    name: name.to_string(),
    column: name.to_string(),
    note: ColumnNote::Primary,
  }
}

pub fn generated(name: &'static str) -> ColumnMapper {
  ColumnMapper {
    name: name.to_string(),
    column: name.to_string(),
    note: ColumnNote::Generated,
  }
}

#[derive(Debug, Default, Clone)]
pub struct ColumnMappers {
  pub table_name: &'static str,
  pub columns: Vec<ColumnMapper>,
}

impl ColumnMappers {
  pub fn get_columns(&self) -> String {
    self.columns.iter()
      .map(|col| col.column.clone())
      .collect::<Vec<String>>().join(", ")
  }

  /// `SELECT <all columns> FROM <table>`
  pub fn build_select_query(&self) -> String {
    let mut buf = Vec::new();
    let mut first = true;
    write!(buf, "SELECT ").unwrap();
    for col in self.columns.iter() {
      if first {
        write!(buf, "{}", col.column).unwrap();
        first = false;
      } else {
        write!(buf, ", {}", col.column).unwrap();
      }
    }
    write!(buf, " FROM {}", self.table_name).unwrap();
    String::from_utf8_lossy(&buf).to_string()
  }

  /// `INSERT INTO <table>(...) VALUES($1..$n)` over the writable
  /// columns; primary keys and generated columns are left to the
  /// database.
  pub fn build_insert_query(&self) -> String {
    let mut buf = Vec::new();
    let mut idx = 0;
    let mut values = Vec::new();
    write!(buf, "INSERT INTO {}(", self.table_name).unwrap();
    for col in self.columns.iter() {
      if col.note != ColumnNote::None {
        continue;
      }
      if idx > 0 {
        write!(buf, ",").unwrap();
      }
      idx += 1;
      values.push(format!("${}", idx));
      write!(buf, "{}", col.column).unwrap();
    }
    write!(buf, ") VALUES({})", values.join(", ")).unwrap();
    String::from_utf8_lossy(&buf).to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mappers() -> ColumnMappers {
    ColumnMappers {
      table_name: "things",
      columns: vec![
        primary("id"),
        column("label"),
        column("body"),
        generated("created_at"),
      ],
    }
  }

  #[test]
  fn select_covers_all_columns() {
    assert_eq!(
      mappers().build_select_query(),
      "SELECT id, label, body, created_at FROM things"
    );
  }

  #[test]
  fn insert_skips_primary_and_generated() {
    assert_eq!(
      mappers().build_insert_query(),
      "INSERT INTO things(label,body) VALUES($1, $2)"
    );
  }
}
