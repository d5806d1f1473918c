#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod error;

/// An `i64`-keyed map using open addressing with triangular probing.
///
/// This module provides `LongMap` together with its entry API and iterators.
pub mod long_map;

mod slot_table;

#[cfg(any(test, feature = "stats"))]
pub mod stats;

pub use config::Config;
pub use error::Error;
pub use long_map::Entry;
pub use long_map::LongMap;
