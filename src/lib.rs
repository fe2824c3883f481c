//! diagsieve Library
//!
//! This crate reclassifies TypeScript compiler diagnostics with per-file
//! rules declared as git attributes, and reports which rules are no longer
//! needed.
//!
//! The pipeline is:
//!
//! 1. [`diagnostics::source`] reads diagnostics (stdin, file or compiler run)
//! 2. [`providers`] resolves [`filters::ProjectFilters`] for the files involved
//! 3. [`filters::Filterer`] classifies each diagnostic and keeps a
//!    [`filters::Summary`]
//! 4. [`cli::output`] renders what survived and the summary

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filters;
pub mod providers;
pub mod utils;

pub use error::SieveError;
