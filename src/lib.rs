//! Stream Checker Library
//!
//! Looks up a movie or TV show on TMDB and reports which of the user's
//! streaming services carry it in their region.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;

pub use error::{Error, ErrorKind, Result};
