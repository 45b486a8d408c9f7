//! Notes Module
//!
//! Per-user notes: list, create and delete.

pub mod db;
pub mod handlers;

pub use db::Note;
pub use handlers::{create_note, delete_note, list_notes};
