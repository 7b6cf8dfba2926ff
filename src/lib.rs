//! tubedeck library
//!
//! This module exposes the cache, CLI, data, and marquee modules for use in
//! integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod marquee;
