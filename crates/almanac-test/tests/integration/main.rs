//! End-to-end tests over the fixture catalog.

mod chronology;
mod helpers;
mod properties;
mod resolution;
mod scenarios;
