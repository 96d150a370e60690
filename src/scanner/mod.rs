//! Source tree scanning: ignore filtering and enumeration

mod filter;
mod walker;

pub use filter::IgnoreFilter;
pub use walker::collect_files;
