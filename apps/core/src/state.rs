//! Process-wide mutable state shared by all handlers.

use std::sync::{Arc, RwLock};

/// Value the cell holds before any weather query ran.
pub const INITIAL_WEATHER_LOCATION: &str = "Initial value, XX";

/// The location of the most recent weather report, read by the weather card demo.
///
/// Shared by every in-flight event. Concurrent writers race and the last write
/// wins; nothing orders them.
#[derive(Debug, Clone)]
pub struct LastWeatherLocation {
    inner: Arc<RwLock<String>>,
}

impl Default for LastWeatherLocation {
    fn default() -> Self {
        Self::new(INITIAL_WEATHER_LOCATION)
    }
}

impl LastWeatherLocation {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub fn get(&self) -> String {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, location: impl Into<String>) {
        let location = location.into();
        match self.inner.write() {
            Ok(mut guard) => *guard = location,
            Err(poisoned) => *poisoned.into_inner() = location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_placeholder() {
        assert_eq!(LastWeatherLocation::default().get(), "Initial value, XX");
    }

    #[test]
    fn test_last_write_wins_across_clones() {
        let cell = LastWeatherLocation::default();
        let other = cell.clone();
        cell.set("Kurashiki, JP");
        other.set("Tokyo, JP");
        assert_eq!(cell.get(), "Tokyo, JP");
    }

    #[test]
    fn test_concurrent_writers_leave_one_of_their_values() {
        let cell = LastWeatherLocation::default();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cell = cell.clone();
                std::thread::spawn(move || cell.set(format!("City {}, C{}", i, i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let last = cell.get();
        assert!(last.starts_with("City "), "unexpected value {}", last);
    }
}
