//! Catalog home view contract

use serde::Serialize;

pub const INDEX: &str = "index";

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub title: String,
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}
