//! Top-level commands

pub mod link;
