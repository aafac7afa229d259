//! External service clients.

pub mod tmdb;
