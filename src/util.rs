// chrono helpers shared by models, forms and services.

pub fn now() -> chrono::NaiveDateTime {
  chrono::Utc::now().naive_utc()
}

pub fn today() -> chrono::NaiveDate {
  now().date()
}
