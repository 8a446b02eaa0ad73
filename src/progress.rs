/// Receives progress updates from long-running builder/sorter passes.
/// The core search engine never calls this.
pub trait ProgressSink {
    /// `done` out of `total` index points processed so far.
    fn report(&mut self, done: u64, total: u64);
}

/// Does nothing. The default sink, matching the reference tool's
/// `progress_quiet`.
#[derive(Default)]
pub struct QuietProgress;

impl ProgressSink for QuietProgress {
    fn report(&mut self, _done: u64, _total: u64) {}
}

/// Logs progress at `debug` level every time the done/total ratio
/// crosses another percentage point. Cheap enough to leave enabled
/// without an explicit feature gate, unlike a terminal progress bar.
#[derive(Default)]
pub struct LoggingProgress {
    last_percent: u64,
}

impl ProgressSink for LoggingProgress {
    fn report(&mut self, done: u64, total: u64) {
        if total == 0 {
            return;
        }
        let percent = done.saturating_mul(100) / total;
        if percent != self.last_percent {
            log::debug!("indexed {done}/{total} ({percent}%)");
            self.last_percent = percent;
        }
    }
}

#[cfg(feature = "progress")]
pub use terminal::TerminalProgress;

#[cfg(feature = "progress")]
mod terminal {
    use super::ProgressSink;
    use indicatif::{ProgressBar, ProgressStyle};

    /// Renders a terminal progress bar via `indicatif`. Gated behind
    /// the `progress` feature so the core library does not force a
    /// terminal-UI dependency on non-interactive consumers.
    pub struct TerminalProgress {
        bar: ProgressBar,
    }

    impl TerminalProgress {
        pub fn new(total: u64) -> Self {
            let bar = ProgressBar::new(total);
            if let Ok(style) =
                ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ({percent}%)")
            {
                bar.set_style(style);
            }
            TerminalProgress { bar }
        }
    }

    impl ProgressSink for TerminalProgress {
        fn report(&mut self, done: u64, total: u64) {
            self.bar.set_length(total);
            self.bar.set_position(done);
        }
    }
}
