//! Data models.

pub mod post;
