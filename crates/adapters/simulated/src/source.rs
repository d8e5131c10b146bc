//! Scripted reading source — replays a fixed list of raw readings.

use std::sync::Mutex;

use smarthome_domain::error::HardwareError;
use smarthome_domain::hardware::ReadingSource;

/// A simulated sensor feed that cycles through `readings` in order.
pub struct ScriptedSource {
    readings: Vec<String>,
    next: Mutex<usize>,
}

impl ScriptedSource {
    pub fn new<I, S>(readings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            readings: readings.into_iter().map(Into::into).collect(),
            next: Mutex::new(0),
        }
    }

    fn lock_next(&self) -> std::sync::MutexGuard<'_, usize> {
        self.next
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ReadingSource for ScriptedSource {
    fn read(&self) -> Result<String, HardwareError> {
        if self.readings.is_empty() {
            return Err(HardwareError::Unavailable(
                "no scripted readings".to_string(),
            ));
        }
        let mut next = self.lock_next();
        let reading = self.readings[*next % self.readings.len()].clone();
        *next = (*next + 1) % self.readings.len();
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_replay_readings_in_order_and_wrap() {
        let source = ScriptedSource::new(["20.5", "21.0"]);
        let values: Vec<_> = (0..3).map(|_| source.read().unwrap()).collect();
        assert_eq!(values, ["20.5", "21.0", "20.5"]);
    }

    #[test]
    fn should_be_unavailable_without_readings() {
        let source = ScriptedSource::new(Vec::<String>::new());
        assert!(matches!(
            source.read(),
            Err(HardwareError::Unavailable(_))
        ));
    }
}
