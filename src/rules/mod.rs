//! Rule implementations for relang.
//!
//! Each rule exposes pure handlers over immutable inputs plus a
//! `check_*_issues` function that drives them over a [`crate::core::CheckContext`].
//!
//! ## Module Structure
//!
//! - `default_language`: resource files that override the default language

pub mod default_language;
