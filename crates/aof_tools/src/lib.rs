//! # AoF Tools
//!
//! Command-line tools for faction data:
//! - Data validators
//! - Unit and option listings
//! - Point calculators and profile viewers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod commands;
pub mod pick;
pub mod report;
pub mod validate;
