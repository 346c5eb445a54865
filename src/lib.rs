//! relang - default language checker for WinForms resource files
//!
//! relang is a CLI tool and library that finds C# types whose companion
//! `.resx` file still carries the `$this.Language` metadata entry, and
//! removes that entry so the form falls back to the default language.
//!
//! ## Module Structure
//!
//! - `actions`: Deferred fixes that rewrite resource files
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Core analysis engine (file scan, declaration scan, context)
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Detection rules

pub mod actions;
pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
