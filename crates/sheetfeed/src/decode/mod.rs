//! Decoding pipeline: character scanner to rows, header indexing on top

pub mod header;
pub mod parser;
