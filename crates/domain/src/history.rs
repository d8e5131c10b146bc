//! Queries over the reading logs sensors keep.
//!
//! Readings are raw strings. The comparisons below parse them as numbers only
//! when they need to, and pair readings of two series whenever their
//! timestamps lie strictly less than a delta apart.

use serde::Serialize;

use crate::device::Device;
use crate::error::ValidationError;
use crate::time::{TimeDelta, TimeWindow, Timestamp, same_instant};
use crate::type_id::ComponentTypeId;

/// Functionality of the sensors compared by [`max_instant_difference`].
pub const TEMPERATURE_SENSOR: &str = "TemperatureSensor";

/// Functionality of the sensors summed by [`peak_power_consumption`].
pub const POWER_SENSOR: &str = "PowerConsumptionSensor";

/// A reading together with the sensor that logged it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedReading {
    pub sensor: String,
    pub type_id: ComponentTypeId,
    pub value: String,
    pub recorded_at: Timestamp,
}

impl LoggedReading {
    fn numeric(&self) -> Result<f64, ValidationError> {
        self.value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::InvalidNumber {
                field: "reading",
                value: self.value.clone(),
            })
    }
}

/// Readings logged by `device` inside `window`, oldest first.
#[must_use]
pub fn device_readings(device: &Device, window: &TimeWindow) -> Vec<LoggedReading> {
    let mut readings: Vec<_> = device
        .sensors()
        .flat_map(|sensor| {
            sensor
                .log()
                .iter()
                .filter(|reading| window.contains(reading.recorded_at))
                .map(|reading| LoggedReading {
                    sensor: sensor.name().to_string(),
                    type_id: sensor.type_id().clone(),
                    value: reading.value.clone(),
                    recorded_at: reading.recorded_at,
                })
        })
        .collect();
    readings.sort_by_key(|reading| reading.recorded_at);
    readings
}

/// [`device_readings`] restricted to sensors of one type.
#[must_use]
pub fn readings_of_type(
    device: &Device,
    type_id: &str,
    window: &TimeWindow,
) -> Vec<LoggedReading> {
    let mut readings = device_readings(device, window);
    readings.retain(|reading| reading.type_id.matches(type_id));
    readings
}

/// Largest value found by a windowed comparison and when it happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    pub value: f64,
    pub at: Timestamp,
}

/// Outcome of [`max_instant_difference`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InstantDifference {
    /// One of the series logged nothing inside the window.
    NoReadings,
    /// Both series have readings but none pair up within the delta.
    NoMatchWithinDelta,
    /// Largest absolute difference, timestamped with the indoor reading.
    Max(Peak),
}

/// Largest absolute difference between paired outdoor and indoor readings.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDelta`] for a non-positive delta and
/// [`ValidationError::InvalidNumber`] when a paired reading is not numeric.
pub fn max_instant_difference(
    outdoor: &[LoggedReading],
    indoor: &[LoggedReading],
    delta: TimeDelta,
) -> Result<InstantDifference, ValidationError> {
    check_delta(delta)?;
    if outdoor.is_empty() || indoor.is_empty() {
        return Ok(InstantDifference::NoReadings);
    }
    let mut best: Option<Peak> = None;
    for inside in indoor {
        for outside in outdoor {
            if !same_instant(inside.recorded_at, outside.recorded_at, delta) {
                continue;
            }
            let value = (inside.numeric()? - outside.numeric()?).abs();
            if best.is_none_or(|peak| value > peak.value) {
                best = Some(Peak {
                    value,
                    at: inside.recorded_at,
                });
            }
        }
    }
    Ok(best.map_or(InstantDifference::NoMatchWithinDelta, InstantDifference::Max))
}

/// Outcome of [`peak_power_consumption`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PowerPeak {
    /// The grid meter logged nothing inside the window.
    NoGridReadings,
    /// No power source fed energy back; largest grid reading alone.
    GridOnly(Peak),
    /// Sources fed energy back, but never within the delta of a grid reading.
    NoMatchWithinDelta,
    /// Largest grid reading plus the source output paired with it.
    Max(Peak),
}

/// Peak consumption: each grid reading plus the magnitude of every negative
/// source reading within `delta` of it.
///
/// Non-negative source readings are consumers, not sources, and are ignored.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDelta`] for a non-positive delta and
/// [`ValidationError::InvalidNumber`] when a reading is not numeric.
pub fn peak_power_consumption(
    grid: &[LoggedReading],
    sources: &[LoggedReading],
    delta: TimeDelta,
) -> Result<PowerPeak, ValidationError> {
    check_delta(delta)?;
    let mut grid_values = Vec::with_capacity(grid.len());
    for reading in grid {
        grid_values.push((reading.recorded_at, reading.numeric()?));
    }
    let mut feeds = Vec::new();
    for reading in sources {
        let value = reading.numeric()?;
        if value < 0.0 {
            feeds.push((reading.recorded_at, value.abs()));
        }
    }

    if grid_values.is_empty() {
        return Ok(PowerPeak::NoGridReadings);
    }
    if feeds.is_empty() {
        let peak = grid_values
            .iter()
            .fold(None::<Peak>, |best, &(at, value)| match best {
                Some(peak) if peak.value > value => Some(peak),
                _ => Some(Peak { value, at }),
            });
        return Ok(peak.map_or(PowerPeak::NoGridReadings, PowerPeak::GridOnly));
    }

    let mut matched = false;
    let mut best: Option<Peak> = None;
    for &(at, value) in &grid_values {
        let mut total = value;
        for &(feed_at, feed) in &feeds {
            if same_instant(at, feed_at, delta) {
                total += feed;
                matched = true;
            }
        }
        if best.is_none_or(|peak| total > peak.value) {
            best = Some(Peak { value: total, at });
        }
    }
    Ok(match best {
        Some(peak) if matched => PowerPeak::Max(peak),
        _ => PowerPeak::NoMatchWithinDelta,
    })
}

fn check_delta(delta: TimeDelta) -> Result<(), ValidationError> {
    if delta <= TimeDelta::zero() {
        return Err(ValidationError::InvalidDelta);
    }
    Ok(())
}
