//! Domain types and pure logic for certificate generation.
//!
//! Nothing in this crate performs I/O: it holds the extracted-field record,
//! the error taxonomy, prompt formatting, and the image-size heuristic.

pub mod certificate;
pub mod error;
pub mod image_size;
pub mod prompt;
pub mod types;
