//! # Infrastructure Layer
//!
//! Adapters for everything outside the process: carrier APIs and the
//! runtime cache.

pub mod cache;
pub mod carriers;
