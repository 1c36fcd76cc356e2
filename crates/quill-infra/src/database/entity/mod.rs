//! SeaORM entities and their conversions to/from domain types.

pub mod author;
pub mod blog_post;
