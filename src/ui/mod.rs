//! User-facing output

mod terminal;
mod recording;

pub use terminal::ConsoleSink;
pub use recording::RecordingSink;
