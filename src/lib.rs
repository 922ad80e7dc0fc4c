#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod definition;
pub mod error;
pub mod instruction;
pub mod lexer;
pub mod line;
pub mod policy;
pub mod report;
pub mod scanner;

pub use error::{Error, Result};
