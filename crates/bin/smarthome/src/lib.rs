//! # smarthome — composition root
//!
//! Wires the domain, the application service and the simulated adapters
//! together, builds the configured house and reports on it.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Load the type registry from the catalogue file
//! - Construct the house service with an in-memory repository
//! - Populate rooms, devices and components from configuration
//! - Produce a serializable report of the result
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod catalogue_file;
pub mod config;

use std::sync::Arc;

use serde::Serialize;
use smarthome_adapter_simulated::{MemoryHouseRepository, ScriptedSource};
use smarthome_app::context::HomeContext;
use smarthome_app::services::home_service::{
    ComponentSummary, DeviceSummary, FunctionalityGroup, HomeService, RoomSummary,
};
use smarthome_domain::component::Reading;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::hardware::SharedReadingSource;
use smarthome_domain::house::House;
use smarthome_domain::location::Location;
use smarthome_domain::registry::CatalogueSource;
use smarthome_domain::room::{Room, RoomDimensions};

use crate::config::{DeviceConfig, HouseConfig, RoomConfig};

/// Service type assembled by this binary.
pub type Service = HomeService<MemoryHouseRepository>;

/// Everything the binary prints after building the house.
#[derive(Debug, Serialize)]
pub struct Report {
    pub house: String,
    pub location: Option<Location>,
    pub registered_types: Vec<String>,
    pub rooms: Vec<RoomReport>,
    pub functionalities: Vec<FunctionalityGroup>,
}

#[derive(Debug, Serialize)]
pub struct RoomReport {
    #[serde(flatten)]
    pub room: RoomSummary,
    pub devices: Vec<DeviceReport>,
}

#[derive(Debug, Serialize)]
pub struct DeviceReport {
    #[serde(flatten)]
    pub device: DeviceSummary,
    pub components: Vec<ComponentSummary>,
    pub readings: Vec<SensorReading>,
}

/// First reading taken from a sensor with a simulated feed.
#[derive(Debug, Serialize)]
pub struct SensorReading {
    pub sensor: String,
    #[serde(flatten)]
    pub reading: Reading,
}

/// Load the registry from `catalogue` and populate a house from `config`.
///
/// # Errors
///
/// Fails on the first catalogue, validation, or creation error.
pub async fn bootstrap(
    config: &HouseConfig,
    catalogue: &dyn CatalogueSource,
) -> Result<Service, SmartHomeError> {
    let context = HomeContext::bootstrap(catalogue)?;
    let house = House::new(config.name.as_str())?;
    let service = HomeService::new(context, house, MemoryHouseRepository::default());

    if let Some(location) = &config.location {
        service.set_location(location.location()?).await?;
    }
    for room in &config.rooms {
        populate_room(&service, room).await?;
    }
    Ok(service)
}

async fn populate_room(service: &Service, config: &RoomConfig) -> Result<(), SmartHomeError> {
    let room = Room::builder()
        .name(config.name.as_str())
        .floor(config.floor)
        .outdoor(config.outdoor)
        .dimensions(RoomDimensions::new(
            config.width,
            config.length,
            config.height,
        )?)
        .build()?;
    service.add_room(room).await?;

    for device in &config.devices {
        populate_device(service, &config.name, device).await?;
    }
    Ok(())
}

async fn populate_device(
    service: &Service,
    room: &str,
    config: &DeviceConfig,
) -> Result<(), SmartHomeError> {
    service.add_device(room, &config.name, &config.model).await?;

    for sensor in &config.sensors {
        let source = (!sensor.readings.is_empty()).then(|| {
            Arc::new(ScriptedSource::new(sensor.readings.iter().cloned())) as SharedReadingSource
        });
        service
            .add_sensor(room, &config.name, &sensor.type_id, &sensor.name, source)
            .await?;
    }
    for actuator in &config.actuators {
        service
            .add_actuator(
                room,
                &config.name,
                &actuator.type_id,
                &actuator.name,
                actuator.settings()?,
            )
            .await?;
    }
    Ok(())
}

/// Build the house described by `config` and report on it.
///
/// Sensors configured with readings are sampled once.
///
/// # Errors
///
/// Fails on the first catalogue, validation, creation, or hardware error.
pub async fn run(
    config: &HouseConfig,
    catalogue: &dyn CatalogueSource,
) -> Result<Report, SmartHomeError> {
    let service = bootstrap(config, catalogue).await?;

    let mut rooms = Vec::new();
    for room in service.list_rooms().await {
        let mut devices = Vec::new();
        for device in service.list_devices(&room.name).await? {
            let components = service.list_components(&room.name, &device.name).await?;
            let readings = sample_readings(&service, &room.name, &device.name, config).await?;
            devices.push(DeviceReport {
                device,
                components,
                readings,
            });
        }
        rooms.push(RoomReport { room, devices });
    }

    let registered_types = service
        .context()
        .registry()
        .list_registered_types()
        .map(ToString::to_string)
        .collect();

    Ok(Report {
        house: config.name.clone(),
        location: service.location().await,
        registered_types,
        rooms,
        functionalities: service.devices_by_functionality().await,
    })
}

async fn sample_readings(
    service: &Service,
    room: &str,
    device: &str,
    config: &HouseConfig,
) -> Result<Vec<SensorReading>, SmartHomeError> {
    let sensors = config
        .rooms
        .iter()
        .filter(|r| r.name == room)
        .flat_map(|r| r.devices.iter())
        .filter(|d| d.name == device)
        .flat_map(|d| d.sensors.iter())
        .filter(|s| !s.readings.is_empty());

    let mut readings = Vec::new();
    for sensor in sensors {
        let reading = service.read_sensor(room, device, &sensor.name).await?;
        tracing::debug!(room, device, sensor = %sensor.name, value = %reading.value, "sampled sensor");
        readings.push(SensorReading {
            sensor: sensor.name.clone(),
            reading,
        });
    }
    Ok(readings)
}
