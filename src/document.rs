//! The greeting document: per-page display text and the chill-zone track
//! records, read from a JSON file once per process.
//!
//! The document is content authored for the recipient; it is read-only and
//! every consumer shares the same cached copy.

mod load;
mod schema;

pub use load::{DocumentError, load, read};
pub use schema::*;

#[cfg(test)]
mod tests;
