//! Table gateways over the music schema.
//!
//! # Responsibility
//! - Define typed insert/update/delete/select contracts per table.
//! - Keep SQL text inside the persistence boundary, next to each row type.
//!
//! # Invariants
//! - Inserts use insert-or-replace: an id collision overwrites the whole row.
//! - Update/delete report affected-row counts instead of not-found errors.
//! - Storage errors are passed to callers without retries or rewriting.

pub mod music_repo;
pub mod table;
