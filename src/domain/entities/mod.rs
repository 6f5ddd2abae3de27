//! Core business entities.
//!
//! Entities are plain data structures mirroring persisted state:
//!
//! - [`Link`] - a short-ID to URL mapping
//! - [`Click`] - a single recorded redirect with classified client metadata
//!
//! `New*` variants carry creation input before the store assigns ids.

mod click;
mod link;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
