//! Core lookup logic.

pub mod finder;
