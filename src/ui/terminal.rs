//! Colored terminal sink

use crate::types::{LogEvent, LogLevel, LogSink};
use console::style;

/// Prints events to stdout as `› Level: message`
///
/// Verbose events are dropped unless the sink was built with `verbose = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    verbose: bool,
}

impl ConsoleSink {
    /// Create a new console sink
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Render an event, or `None` if it is filtered out.
    pub fn render(&self, event: &LogEvent) -> Option<String> {
        let line = match event.level {
            LogLevel::Verbose if !self.verbose => return None,
            LogLevel::Verbose | LogLevel::Info => format!(
                "{} Info: {}",
                style("›").blue().bold(),
                style(&event.message).blue().bold()
            ),
            LogLevel::Warn => format!(
                "{} Warn: {}",
                style("›").yellow().bold(),
                style(&event.message).yellow().bold()
            ),
            LogLevel::Error => format!(
                "{} Error: {}",
                style("›").red().bold(),
                style(&event.message).red().bold()
            ),
        };
        Some(line)
    }
}

impl LogSink for ConsoleSink {
    fn emit(&self, event: LogEvent) {
        if let Some(line) = self.render(&event) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: String) -> String {
        console::strip_ansi_codes(&line).into_owned()
    }

    #[test]
    fn test_verbose_dropped_unless_enabled() {
        let quiet = ConsoleSink::new(false);
        assert!(quiet.render(&LogEvent::verbose("Ignoring: a.txt")).is_none());

        let loud = ConsoleSink::new(true);
        let line = loud
            .render(&LogEvent::verbose("Ignoring: a.txt"))
            .expect("verbose sink renders verbose events");
        assert_eq!(plain(line), "› Info: Ignoring: a.txt");
    }

    #[test]
    fn test_levels_render_with_label() {
        let sink = ConsoleSink::new(false);
        let warn = sink.render(&LogEvent::warn("careful")).expect("warn renders");
        let error = sink.render(&LogEvent::error("boom")).expect("error renders");

        assert_eq!(plain(warn), "› Warn: careful");
        assert_eq!(plain(error), "› Error: boom");
    }
}
