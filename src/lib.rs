//! Daily mood journal. One entry per calendar day, kept in an asynchronous key/value store, and
//! the mood series used to chart how the days went.
//!

pub mod analysis;
pub mod cli;
pub mod fs;
pub mod journal;
pub mod profile;
pub mod storage;
pub mod utils;
