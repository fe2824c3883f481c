//! Utility modules for diagsieve

pub mod command;
pub mod paths;
