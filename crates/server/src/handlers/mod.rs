//! HTTP request handlers.

pub mod common;
pub mod images;
pub mod items;

pub use common::*;
pub use images::*;
pub use items::*;
