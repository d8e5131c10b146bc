//! End-to-end tests for the full smarthome stack.
//!
//! Each test wires the real registry, factory, service and simulated adapters
//! from a TOML configuration, exactly as the binary does, without touching
//! the working directory.

use smarthome::config::Config;
use smarthome::{bootstrap, run};
use smarthome_adapter_simulated::{RecordedCommand, RecordingSink};
use smarthome_domain::catalogue::builtin_catalogue;
use smarthome_domain::component::{ActuatorCommand, CommandOutcome};
use smarthome_domain::error::{ConfigError, CreateError, SmartHomeError};
use smarthome_domain::registry::TypeCatalogue;

const HOUSE: &str = r#"
    [house]
    name = 'Test House'

    [house.location]
    door = '10'
    street = 'Rua de Santa Catarina'
    city = 'Porto'
    postal_code = '4000-447'
    country = 'Portugal'
    latitude = 41.149
    longitude = -8.606

    [[house.rooms]]
    name = 'Kitchen'
    floor = 0
    width = 4.0
    length = 3.0
    height = 2.5

    [[house.rooms.devices]]
    name = 'Fridge'
    model = 'FR-2'
    sensors = [{ type = 'TemperatureSensor', name = 'Inside', readings = ['4.5', '4.0'] }]
    actuators = [{ type = 'DecimalValueActuator', name = 'Thermostat', lower = '2.0', upper = '8.0', precision = '0.5' }]

    [[house.rooms.devices]]
    name = 'Lamp'
    actuators = [{ type = 'SwitchActuator', name = 'Power' }]

    [[house.rooms]]
    name = 'Bedroom'
    floor = 1
    width = 3.0
    length = 3.0
    height = 2.5

    [[house.rooms.devices]]
    name = 'Thermometer'
    sensors = [{ type = 'TemperatureSensor', name = 'Air' }, { type = 'HumiditySensor', name = 'Humidity' }]
"#;

fn config() -> Config {
    Config::from_toml(HOUSE).unwrap()
}

#[tokio::test]
async fn should_build_configured_house() {
    let config = config();
    let report = run(&config.house, &builtin_catalogue()).await.unwrap();

    assert_eq!(report.house, "Test House");
    let rooms: Vec<_> = report.rooms.iter().map(|r| r.room.name.as_str()).collect();
    assert_eq!(rooms, ["Kitchen", "Bedroom"]);

    let kitchen = &report.rooms[0];
    let devices: Vec<_> = kitchen
        .devices
        .iter()
        .map(|d| d.device.name.as_str())
        .collect();
    assert_eq!(devices, ["Fridge", "Lamp"]);
    assert_eq!(kitchen.devices[0].components.len(), 2);
}

#[tokio::test]
async fn should_sample_sensors_with_readings() {
    let config = config();
    let report = run(&config.house, &builtin_catalogue()).await.unwrap();

    let fridge = &report.rooms[0].devices[0];
    assert_eq!(fridge.readings.len(), 1);
    assert_eq!(fridge.readings[0].sensor, "Inside");
    assert_eq!(fridge.readings[0].reading.value, "4.5");

    let thermometer = &report.rooms[1].devices[0];
    assert!(thermometer.readings.is_empty());
}

#[tokio::test]
async fn should_group_devices_by_functionality_across_rooms() {
    let config = config();
    let report = run(&config.house, &builtin_catalogue()).await.unwrap();

    let temperature = report
        .functionalities
        .iter()
        .find(|group| group.tag == "TemperatureSensor")
        .unwrap();
    let names: Vec<_> = temperature.devices.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Fridge", "Thermometer"]);

    let humidity = report
        .functionalities
        .iter()
        .find(|group| group.tag == "HumiditySensor")
        .unwrap();
    assert_eq!(humidity.devices.len(), 1);
}

#[tokio::test]
async fn should_serialize_report_as_json() {
    let config = config();
    let report = run(&config.house, &builtin_catalogue()).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["house"], "Test House");
    assert_eq!(json["location"]["city"], "Porto");
    assert_eq!(json["rooms"][0]["outdoor"], false);
    assert_eq!(json["rooms"][0]["name"], "Kitchen");
    assert_eq!(json["rooms"][0]["devices"][0]["readings"][0]["value"], "4.5");
}

#[tokio::test]
async fn should_reject_type_missing_from_catalogue() {
    let config = config();
    let catalogue = TypeCatalogue {
        sensor: vec!["TemperatureSensor".to_string()],
        actuator: vec!["SwitchActuator".to_string()],
    };

    let err = run(&config.house, &catalogue).await.unwrap_err();

    assert!(matches!(
        err,
        SmartHomeError::Create(CreateError::UnknownType(ref t)) if t == "DecimalValueActuator"
    ));
}

#[tokio::test]
async fn should_fail_when_catalogue_file_missing() {
    let config = config();
    let catalogue = smarthome::catalogue_file::FileCatalogue::new("no/such/catalogue.toml");

    let err = run(&config.house, &catalogue).await.unwrap_err();

    assert!(matches!(
        err,
        SmartHomeError::Config(ConfigError::Unavailable(_))
    ));
}

#[tokio::test]
async fn should_reject_duplicate_device_names() {
    let toml = r#"
        [[house.rooms]]
        name = 'Hall'
        width = 2.0
        length = 5.0
        height = 2.5

        [[house.rooms.devices]]
        name = 'Lamp'

        [[house.rooms.devices]]
        name = 'LAMP'
    "#;
    let config = Config::from_toml(toml).unwrap();

    let err = run(&config.house, &builtin_catalogue()).await.unwrap_err();

    assert!(matches!(err, SmartHomeError::DuplicateName(_)));
}

#[tokio::test]
async fn should_drive_configured_thermostat() {
    let config = config();
    let service = bootstrap(&config.house, &builtin_catalogue()).await.unwrap();
    let sink = RecordingSink::default();

    let outcome = service
        .command_actuator(
            "Kitchen",
            "Fridge",
            "Thermostat",
            ActuatorCommand::Decimal("5.37".to_string()),
            &sink,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, CommandOutcome::Rounded(_)));
    assert_eq!(sink.commands(), [RecordedCommand::Decimal(5.4)]);
}
