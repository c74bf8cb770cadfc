//! # input_core
//!
//! Value layer for native text controls (`<input>`, `<textarea>`), kept free
//! of any DOM type so hosts can key it by their own node ids.
//!
//! Values follow the browser's sanitization rules: single-line controls drop
//! line breaks, multi-line controls store LF-only newlines.

mod id;
mod store;
mod text;

pub use id::InputId;
pub use store::{InputValueStore, LineMode};
pub use text::{filter_single_line, normalize_newlines};
