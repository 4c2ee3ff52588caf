//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorView};
pub use book::{Book, BookView};
pub use book_instance::{BookInstance, BookInstanceStatus, BookInstanceView};
pub use genre::{Genre, GenreView};
