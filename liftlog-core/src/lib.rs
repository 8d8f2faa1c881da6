//! Core engine for a resistance-training log: entity repositories, atomic
//! plan membership management, and derived statistics, all running against an
//! injected SQLite pool.

pub mod db;
pub mod error;
pub mod goals;
pub mod plans;
pub mod stats;
