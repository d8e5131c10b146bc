//! Storage port — persistence of the house hierarchy.

use std::future::Future;

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::House;

/// Stores snapshots of a [`House`].
///
/// The core never decides when to persist on its own; services call
/// [`save`](Self::save) after each successful mutation.
pub trait HouseRepository {
    /// Replace the stored snapshot with `house`.
    fn save(&self, house: &House) -> impl Future<Output = Result<(), SmartHomeError>> + Send;

    /// The last saved snapshot, if any.
    fn load(&self) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send;
}
