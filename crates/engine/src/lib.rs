//! Veduta listing engine.
//!
//! Serves paginated, filtered, sorted views over a large post dataset and
//! reports result cardinality either exactly or as a fast estimate. Two
//! pagination strategies share the same filter/sort semantics: offset
//! windows (V1) and cursor continuation (V2). Transport, schema migration,
//! and seeding live outside this crate; the engine consumes already
//! validated parameters and a [`store::QueryExecutor`].

pub mod config;
pub mod db;
pub mod error;
pub mod listing;
pub mod models;
pub mod store;
