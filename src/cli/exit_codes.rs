//! Exit codes for the CLI
//!
//! Standard exit codes used by diagsieve for CI/CD integration.
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Every diagnostic was ignored, or `--exit-code0` |
//! | 1 | `DIAGNOSTICS_RAISED` | Diagnostics raised | At least one diagnostic survived filtering |
//! | 2 | `ERROR` | Runtime error | Bad attribute value, git missing, unreadable input |
//!
//! # Usage
//!
//! ```rust,ignore
//! use diagsieve::cli::exit_codes;
//!
//! std::process::exit(exit_codes::DIAGNOSTICS_RAISED);
//! ```

/// Success - nothing survived filtering, or the operation completed.
///
/// Used when:
/// - No diagnostic remains after filtering
/// - `--exit-code0` was given, whatever happened
/// - `rules` and `init` completed normally
pub const SUCCESS: i32 = 0;

/// At least one diagnostic was raised after filtering.
pub const DIAGNOSTICS_RAISED: i32 = 1;

/// Runtime or configuration error.
///
/// Used when:
/// - An attribute has an unrecognized value
/// - The configuration file is invalid
/// - git or the compiler cannot be run
/// - `init` would overwrite an existing file without `--force`
pub const ERROR: i32 = 2;
