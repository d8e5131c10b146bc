//! Home service — use-cases over the house hierarchy.
//!
//! The house lives behind an async [`RwLock`]: every mutation holds the write
//! guard for its whole check-then-insert sequence, and every rollup is taken
//! under a read guard so it sees one consistent snapshot. Results are handed
//! out as owned summaries so no borrow of the house escapes the lock.
//!
//! Mutations are applied to a copy of the house. The copy replaces the live
//! house only after the repository has saved it, so a failed save leaves
//! memory matching the last saved snapshot.

use serde::Serialize;
use tokio::sync::RwLock;

use smarthome_domain::component::{ActuatorCommand, CommandOutcome, Component, Reading};
use smarthome_domain::device::Device;
use smarthome_domain::error::{CreateError, NotFoundError, SmartHomeError, ValidationError};
use smarthome_domain::factory::ComponentSpec;
use smarthome_domain::functionality::FunctionalityMap;
use smarthome_domain::hardware::{CommandSink, SharedReadingSource};
use smarthome_domain::history::{
    self, InstantDifference, LoggedReading, POWER_SENSOR, PowerPeak, TEMPERATURE_SENSOR,
};
use smarthome_domain::house::House;
use smarthome_domain::id::{ComponentId, DeviceId, RoomId};
use smarthome_domain::location::Location;
use smarthome_domain::room::{Room, RoomDimensions};
use smarthome_domain::settings::RangeSettings;
use smarthome_domain::time::{TimeDelta, TimeWindow};
use smarthome_domain::type_id::ComponentKind;

use crate::context::HomeContext;
use crate::ports::HouseRepository;

/// Owned view of a room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub floor: i32,
    pub dimensions: RoomDimensions,
    pub outdoor: bool,
    pub devices: usize,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id(),
            name: room.name().to_string(),
            floor: room.floor(),
            dimensions: room.dimensions(),
            outdoor: room.is_outdoor(),
            devices: room.devices().len(),
        }
    }
}

/// Owned view of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSummary {
    pub id: DeviceId,
    pub name: String,
    pub model: String,
    pub room: String,
    pub active: bool,
    pub functionalities: Vec<String>,
}

impl From<&Device> for DeviceSummary {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id(),
            name: device.name().to_string(),
            model: device.model().to_string(),
            room: device.room().to_string(),
            active: device.is_active(),
            functionalities: device
                .functionalities()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Owned view of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    pub id: ComponentId,
    pub name: String,
    pub type_id: String,
    pub kind: ComponentKind,
}

impl From<&Component> for ComponentSummary {
    fn from(component: &Component) -> Self {
        Self {
            id: component.id(),
            name: component.name().to_string(),
            type_id: component.type_id().to_string(),
            kind: component.kind(),
        }
    }
}

/// Devices sharing one functionality tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionalityGroup {
    pub tag: String,
    pub devices: Vec<DeviceSummary>,
}

fn groups(map: &FunctionalityMap<'_>) -> Vec<FunctionalityGroup> {
    map.iter()
        .map(|(tag, devices)| FunctionalityGroup {
            tag: tag.to_string(),
            devices: devices.iter().map(|device| DeviceSummary::from(*device)).collect(),
        })
        .collect()
}

/// Application service for building and querying one house.
pub struct HomeService<R> {
    context: HomeContext,
    house: RwLock<House>,
    repo: R,
}

impl<R: HouseRepository + Send + Sync> HomeService<R> {
    /// Create a service around `house`, persisting through `repo`.
    pub fn new(context: HomeContext, house: House, repo: R) -> Self {
        Self {
            context,
            house: RwLock::new(house),
            repo,
        }
    }

    /// Resume from the repository's last snapshot, or start from `fallback`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn restore(
        context: HomeContext,
        repo: R,
        fallback: House,
    ) -> Result<Self, SmartHomeError> {
        let house = match repo.load().await? {
            Some(house) => {
                tracing::info!(house = house.name(), "restored house snapshot");
                house
            }
            None => fallback,
        };
        Ok(Self::new(context, house, repo))
    }

    #[must_use]
    pub fn context(&self) -> &HomeContext {
        &self.context
    }

    /// Apply `change` to a copy of the house and keep the copy once saved.
    async fn commit<T>(
        &self,
        change: impl FnOnce(&mut House) -> Result<T, SmartHomeError>,
    ) -> Result<T, SmartHomeError> {
        let mut house = self.house.write().await;
        let mut draft = house.clone();
        let output = change(&mut draft)?;
        self.repo.save(&draft).await?;
        *house = draft;
        Ok(output)
    }

    /// Set or replace the location of the house.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    #[tracing::instrument(skip(self, location), fields(city = location.city()))]
    pub async fn set_location(&self, location: Location) -> Result<Location, SmartHomeError> {
        self.commit(|house| {
            house.configure_location(location.clone());
            Ok(location)
        })
        .await
    }

    /// Where the house stands, if configured.
    pub async fn location(&self) -> Option<Location> {
        self.house.read().await.location().cloned()
    }

    /// Add a room to the house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DuplicateName`] if the house already has a
    /// room with this name, or a storage error from the repository.
    #[tracing::instrument(skip(self, room), fields(room_name = %room.name()))]
    pub async fn add_room(&self, room: Room) -> Result<RoomSummary, SmartHomeError> {
        self.commit(|house| Ok(RoomSummary::from(&*house.add_room(room)?)))
            .await
    }

    /// Place a new device in `room`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room,
    /// [`SmartHomeError::DuplicateName`] if the room already has a device with
    /// this name, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn add_device(
        &self,
        room: &str,
        name: &str,
        model: &str,
    ) -> Result<DeviceSummary, SmartHomeError> {
        self.commit(|house| {
            Ok(DeviceSummary::from(
                &*house.room_mut(room)?.add_device(name, model)?,
            ))
        })
        .await
    }

    /// Create a sensor and add it to a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Create`] when `type_id` is not a creatable
    /// sensor type or construction fails, [`SmartHomeError::DuplicateName`]
    /// for a name the device already uses, [`SmartHomeError::NotFound`] for an
    /// unknown room or device, or a storage error from the repository.
    #[tracing::instrument(skip(self, source))]
    pub async fn add_sensor(
        &self,
        room: &str,
        device: &str,
        type_id: &str,
        name: &str,
        source: Option<SharedReadingSource>,
    ) -> Result<ComponentSummary, SmartHomeError> {
        let mut spec = ComponentSpec::new(type_id, name);
        if let Some(source) = source {
            spec = spec.source(source);
        }
        self.add_component(room, device, ComponentKind::Sensor, spec)
            .await
    }

    /// Create an actuator and add it to a device.
    ///
    /// # Errors
    ///
    /// Same as [`add_sensor`](Self::add_sensor), for actuator types.
    #[tracing::instrument(skip(self))]
    pub async fn add_actuator(
        &self,
        room: &str,
        device: &str,
        type_id: &str,
        name: &str,
        settings: Option<RangeSettings>,
    ) -> Result<ComponentSummary, SmartHomeError> {
        let mut spec = ComponentSpec::new(type_id, name);
        if let Some(settings) = settings {
            spec = spec.settings(settings);
        }
        self.add_component(room, device, ComponentKind::Actuator, spec)
            .await
    }

    async fn add_component(
        &self,
        room: &str,
        device: &str,
        kind: ComponentKind,
        spec: ComponentSpec,
    ) -> Result<ComponentSummary, SmartHomeError> {
        if self.context.registry().kind_of(spec.type_id()) != Some(kind) {
            return Err(CreateError::UnknownType(spec.type_id().to_string()).into());
        }
        let factory = self.context.factory();
        self.commit(|house| {
            let component = house
                .device_mut(room, device)?
                .add_component(factory, spec)?;
            Ok(ComponentSummary::from(&*component))
        })
        .await
    }

    /// Mark a device inactive.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room or device, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_device(
        &self,
        room: &str,
        device: &str,
    ) -> Result<DeviceSummary, SmartHomeError> {
        self.commit(|house| {
            let device = house.device_mut(room, device)?;
            device.deactivate();
            Ok(DeviceSummary::from(&*device))
        })
        .await
    }

    /// Take a reading from a sensor and log it.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if there is no such sensor,
    /// [`SmartHomeError::Hardware`] if the reading fails, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn read_sensor(
        &self,
        room: &str,
        device: &str,
        sensor: &str,
    ) -> Result<Reading, SmartHomeError> {
        self.commit(|house| {
            let reading = house
                .device_mut(room, device)?
                .component_mut(sensor)
                .and_then(Component::as_sensor_mut)
                .ok_or_else(|| NotFoundError {
                    entity: "sensor",
                    id: sensor.to_string(),
                })?
                .read()?;
            Ok(reading)
        })
        .await
    }

    /// Send `command` to an actuator through `sink`.
    ///
    /// The snapshot is saved unless the hardware refused the command. When the
    /// save fails the in-memory actuator keeps its previous value even though
    /// the sink already received the command.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if there is no such actuator,
    /// [`SmartHomeError::Validation`] if the command does not fit it, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, sink))]
    pub async fn command_actuator(
        &self,
        room: &str,
        device: &str,
        actuator: &str,
        command: ActuatorCommand,
        sink: &dyn CommandSink,
    ) -> Result<CommandOutcome, SmartHomeError> {
        let mut house = self.house.write().await;
        let mut draft = house.clone();
        let outcome = draft
            .device_mut(room, device)?
            .component_mut(actuator)
            .and_then(Component::as_actuator_mut)
            .ok_or_else(|| NotFoundError {
                entity: "actuator",
                id: actuator.to_string(),
            })?
            .execute(sink, &command)?;
        match outcome {
            CommandOutcome::Rejected => tracing::warn!("hardware refused command"),
            CommandOutcome::Applied | CommandOutcome::Rounded(_) => {
                self.repo.save(&draft).await?;
                *house = draft;
            }
        }
        Ok(outcome)
    }

    /// Give a tunable actuator new limits; its value resets to the new lower limit.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if there is no such actuator,
    /// [`SmartHomeError::Validation`] if the settings do not fit it, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn rebind_actuator_settings(
        &self,
        room: &str,
        device: &str,
        actuator: &str,
        settings: RangeSettings,
    ) -> Result<(), SmartHomeError> {
        self.commit(|house| {
            house
                .device_mut(room, device)?
                .component_mut(actuator)
                .and_then(Component::as_actuator_mut)
                .ok_or_else(|| NotFoundError {
                    entity: "actuator",
                    id: actuator.to_string(),
                })?
                .rebind_settings(settings)?;
            Ok(())
        })
        .await
    }

    /// Rooms in insertion order.
    pub async fn list_rooms(&self) -> Vec<RoomSummary> {
        let house = self.house.read().await;
        house.rooms().iter().map(RoomSummary::from).collect()
    }

    /// Devices of `room` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room.
    pub async fn list_devices(&self, room: &str) -> Result<Vec<DeviceSummary>, SmartHomeError> {
        let house = self.house.read().await;
        Ok(house
            .room(room)?
            .devices()
            .iter()
            .map(DeviceSummary::from)
            .collect())
    }

    /// Components of a device in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room or device.
    pub async fn list_components(
        &self,
        room: &str,
        device: &str,
    ) -> Result<Vec<ComponentSummary>, SmartHomeError> {
        let house = self.house.read().await;
        Ok(house
            .device(room, device)?
            .components()
            .iter()
            .map(ComponentSummary::from)
            .collect())
    }

    /// House-wide rollup of devices by functionality.
    #[tracing::instrument(skip(self))]
    pub async fn devices_by_functionality(&self) -> Vec<FunctionalityGroup> {
        let house = self.house.read().await;
        groups(&house.functionalities())
    }

    /// Rollup of the devices in one room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room.
    #[tracing::instrument(skip(self))]
    pub async fn room_functionalities(
        &self,
        room: &str,
    ) -> Result<Vec<FunctionalityGroup>, SmartHomeError> {
        let house = self.house.read().await;
        Ok(groups(&house.room(room)?.functionalities()))
    }

    /// Readings logged by a device's sensors inside `window`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room or device.
    #[tracing::instrument(skip(self))]
    pub async fn device_readings(
        &self,
        room: &str,
        device: &str,
        window: TimeWindow,
    ) -> Result<Vec<LoggedReading>, SmartHomeError> {
        let house = self.house.read().await;
        Ok(history::device_readings(house.device(room, device)?, &window))
    }

    /// Largest temperature difference between an outdoor and an indoor device,
    /// pairing readings logged less than `delta` apart.
    ///
    /// Both locations are given as `(room, device)`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room or device,
    /// [`ValidationError::DeviceLocation`] when `outdoor` is not in an outdoor
    /// room or `indoor` is, and other validation errors for a non-positive
    /// delta or a non-numeric reading.
    #[tracing::instrument(skip(self))]
    pub async fn max_temperature_difference(
        &self,
        outdoor: (&str, &str),
        indoor: (&str, &str),
        window: TimeWindow,
        delta: TimeDelta,
    ) -> Result<InstantDifference, SmartHomeError> {
        let house = self.house.read().await;
        if !house.room(outdoor.0)?.is_outdoor() {
            return Err(ValidationError::DeviceLocation {
                expected: "outdoor",
            }
            .into());
        }
        if house.room(indoor.0)?.is_outdoor() {
            return Err(ValidationError::DeviceLocation { expected: "indoor" }.into());
        }
        let outside = history::readings_of_type(
            house.device(outdoor.0, outdoor.1)?,
            TEMPERATURE_SENSOR,
            &window,
        );
        let inside = history::readings_of_type(
            house.device(indoor.0, indoor.1)?,
            TEMPERATURE_SENSOR,
            &window,
        );
        Ok(history::max_instant_difference(&outside, &inside, delta)?)
    }

    /// Peak consumption of the house as seen by the grid meter at
    /// `(room, device)`, plus whatever other devices fed back at that instant.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown room or device and
    /// validation errors for a non-positive delta or a non-numeric reading.
    #[tracing::instrument(skip(self))]
    pub async fn peak_power_consumption(
        &self,
        grid_meter: (&str, &str),
        window: TimeWindow,
        delta: TimeDelta,
    ) -> Result<PowerPeak, SmartHomeError> {
        let house = self.house.read().await;
        let meter = house.device(grid_meter.0, grid_meter.1)?;
        let grid = history::readings_of_type(meter, POWER_SENSOR, &window);
        let sources: Vec<_> = house
            .devices()
            .filter(|device| device.id() != meter.id())
            .flat_map(|device| history::readings_of_type(device, POWER_SENSOR, &window))
            .collect();
        Ok(history::peak_power_consumption(&grid, &sources, delta)?)
    }
}
