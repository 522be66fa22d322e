//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (IP extraction behind reverse proxies)
//! - Millisecond-precision clock helpers
//! - Expiring LRU store for bounded in-memory state

pub mod client;
pub mod clock;
pub mod store;
