#[macro_use]
extern crate lazy_static;

extern crate postgres_types;

pub mod error;
pub use error::Error;

mod util;

pub mod app;

pub mod auth;

pub mod middleware;

pub mod subdoc;

pub mod validation;

pub mod forms;

pub mod models;

pub mod services;

pub mod db;
