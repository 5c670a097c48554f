//! World clock seam and in-memory implementation.
//!
//! The shared world runs on a fractional hour in `[0, 24)`. The
//! coordinator reads the hour to gate the toggle-to-resting transition
//! and writes it exactly once per night skip. The clock is behind a
//! trait so the host environment can plug in whatever drives its
//! day/night cycle; tests and the bundled engine use [`LocalClock`].

/// Errors that can occur when constructing a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The requested hour is outside the valid `[0, 24)` range.
    #[error("world hour out of range [0, 24): {hour}")]
    HourOutOfRange {
        /// The rejected hour value.
        hour: f64,
    },
}

/// Read/write access to the shared world hour.
///
/// Implementations must keep the hour inside `[0, 24)`. `set_hour` is
/// called only by the night-skip action, with a value the configuration
/// loader has already confined to that range.
pub trait WorldClock {
    /// Return the current world hour in `[0, 24)`.
    fn hour(&self) -> f64;

    /// Set the world hour.
    fn set_hour(&mut self, hour: f64);
}

/// In-memory world clock holding a single hour value.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalClock {
    /// Current world hour, always in `[0, 24)`.
    hour: f64,
}

impl LocalClock {
    /// Create a clock at the given hour.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::HourOutOfRange`] if `hour` is not in
    /// `[0, 24)` (non-finite values are rejected too).
    pub fn new(hour: f64) -> Result<Self, ClockError> {
        if (0.0..24.0).contains(&hour) {
            Ok(Self { hour })
        } else {
            Err(ClockError::HourOutOfRange { hour })
        }
    }

    /// Create a clock at midnight.
    pub const fn midnight() -> Self {
        Self { hour: 0.0 }
    }
}

impl WorldClock for LocalClock {
    fn hour(&self) -> f64 {
        self.hour
    }

    fn set_hour(&mut self, hour: f64) {
        if hour.is_finite() {
            self.hour = hour.rem_euclid(24.0);
        } else {
            tracing::warn!(hour, "ignoring non-finite world hour");
        }
    }
}

/// True when `hour` falls in the daytime window `[day_start, night_start)`.
///
/// The window is half-open: `night_start` itself already counts as
/// night, `day_start` itself is still day. Entering the resting state is
/// blocked during this window; everything outside it is night.
pub fn is_daytime(hour: f64, day_start: f64, night_start: f64) -> bool {
    hour >= day_start && hour < night_start
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assert_hour(clock: &LocalClock, expected: f64) {
        assert!(
            (clock.hour() - expected).abs() < f64::EPSILON,
            "expected hour {expected}, got {}",
            clock.hour()
        );
    }

    #[test]
    fn new_accepts_valid_hours() {
        assert_hour(&LocalClock::new(0.0).unwrap(), 0.0);
        assert_hour(&LocalClock::new(23.5).unwrap(), 23.5);
        assert_hour(&LocalClock::midnight(), 0.0);
    }

    #[test]
    fn new_rejects_out_of_range_hours() {
        assert!(LocalClock::new(24.0).is_err());
        assert!(LocalClock::new(-0.5).is_err());
        assert!(LocalClock::new(f64::NAN).is_err());
    }

    #[test]
    fn set_hour_wraps_into_day() {
        let mut clock = LocalClock::midnight();
        clock.set_hour(25.0);
        assert_hour(&clock, 1.0);
        clock.set_hour(-1.0);
        assert_hour(&clock, 23.0);
        clock.set_hour(8.0);
        assert_hour(&clock, 8.0);
    }

    #[test]
    fn set_hour_ignores_non_finite_values() {
        let mut clock = LocalClock::new(5.0).unwrap();
        clock.set_hour(f64::NAN);
        assert_hour(&clock, 5.0);
        clock.set_hour(f64::INFINITY);
        assert_hour(&clock, 5.0);
    }

    #[test]
    fn daytime_window_is_half_open() {
        // Blocked window [8, 20): 8 is day, 20 is already night.
        assert!(is_daytime(8.0, 8.0, 20.0));
        assert!(is_daytime(12.0, 8.0, 20.0));
        assert!(is_daytime(19.99, 8.0, 20.0));
        assert!(!is_daytime(20.0, 8.0, 20.0));
        assert!(!is_daytime(23.0, 8.0, 20.0));
        assert!(!is_daytime(0.0, 8.0, 20.0));
        assert!(!is_daytime(7.99, 8.0, 20.0));
    }
}
