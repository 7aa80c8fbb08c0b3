//! Command-line front end: loads JSON documents from a directory, resolves
//! one calendar and prints its events as JSON.

pub mod error;
pub mod loader;
pub mod output;
