//! Progress display for the pre-destruction countdown

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Last visible window to cancel with Ctrl-C before the disk is touched
pub struct Countdown {
    pb: ProgressBar,
    tick: Duration,
}

impl Countdown {
    /// Create a countdown of `seconds` one-second ticks
    pub fn new(seconds: u64) -> Self {
        Self::with_tick(seconds, Duration::from_secs(1))
    }

    fn with_tick(seconds: u64, tick: Duration) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.red/white}] {pos}/{len}s")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(seconds);
        pb.set_style(style);
        pb.set_message("Installing in");

        Self { pb, tick }
    }

    /// Line announcing the countdown, printed before the bar starts
    pub fn announcement(&self) -> String {
        format!(
            "Ok, will begin installing in {} seconds. Press Ctrl-C to cancel.",
            self.pb.length().unwrap_or(0)
        )
    }

    /// Block until the countdown has elapsed; cannot be interrupted from here
    pub fn run(&self) {
        let total = self.pb.length().unwrap_or(0);
        for _ in 0..total {
            thread::sleep(self.tick);
            self.pb.inc(1);
        }
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_zero_countdown_returns_immediately() {
        let started = Instant::now();
        Countdown::new(0).run();
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_announcement_names_the_delay() {
        assert_eq!(
            Countdown::new(10).announcement(),
            "Ok, will begin installing in 10 seconds. Press Ctrl-C to cancel."
        );
    }

    #[test]
    fn test_countdown_ticks_every_step() {
        let countdown = Countdown::with_tick(3, Duration::from_millis(5));
        let started = Instant::now();
        countdown.run();

        assert!(started.elapsed() >= Duration::from_millis(15));
        assert_eq!(countdown.pb.position(), 3);
    }
}
