//! Room — a named space on a floor of the house that holds devices.

use serde::{Deserialize, Serialize};

use crate::collection::{Named, UniqueCollection};
use crate::device::Device;
use crate::error::{NotFoundError, SmartHomeError, ValidationError};
use crate::functionality::{self, FunctionalityMap};
use crate::id::RoomId;

/// Room measurements in metres, each strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    width: f64,
    length: f64,
    height: f64,
}

impl RoomDimensions {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDimension`] naming the first value
    /// that is not a positive, finite number.
    pub fn new(width: f64, length: f64, height: f64) -> Result<Self, ValidationError> {
        for (field, value) in [("width", width), ("length", length), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidDimension { field });
            }
        }
        Ok(Self {
            width,
            length,
            height,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// A room and the devices placed in it.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    name: String,
    floor: i32,
    dimensions: RoomDimensions,
    outdoor: bool,
    devices: UniqueCollection<Device>,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> RoomId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn floor(&self) -> i32 {
        self.floor
    }

    #[must_use]
    pub fn dimensions(&self) -> RoomDimensions {
        self.dimensions
    }

    /// Whether the room is outside the building envelope (garden, terrace).
    #[must_use]
    pub fn is_outdoor(&self) -> bool {
        self.outdoor
    }

    /// Place a new device in this room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DuplicateName`] if a device with this name is
    /// already in the room and [`SmartHomeError::Validation`] for a blank name.
    pub fn add_device(&mut self, name: &str, model: &str) -> Result<&mut Device, SmartHomeError> {
        let room = self.name.clone();
        let device = self.devices.try_add(name, || {
            Device::builder().name(name).model(model).room(room).build()
        })?;
        tracing::debug!(room = %self.name, device = name, "device added");
        Ok(device)
    }

    #[must_use]
    pub fn devices(&self) -> &UniqueCollection<Device> {
        &self.devices
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no device in this room has this name.
    pub fn device(&self, name: &str) -> Result<&Device, NotFoundError> {
        self.devices.get(name)
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no device in this room has this name.
    pub fn device_mut(&mut self, name: &str) -> Result<&mut Device, NotFoundError> {
        self.devices.get_mut(name)
    }

    /// Devices of this room grouped by functionality.
    #[must_use]
    pub fn functionalities(&self) -> FunctionalityMap<'_> {
        functionality::aggregate(&self.devices)
    }
}

impl Named for Room {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    floor: i32,
    dimensions: Option<RoomDimensions>,
    outdoor: bool,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    #[must_use]
    pub fn dimensions(mut self, dimensions: RoomDimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    #[must_use]
    pub fn outdoor(mut self, outdoor: bool) -> Self {
        self.outdoor = outdoor;
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if `name` is missing or blank and
    /// [`ValidationError::InvalidDimension`] if no dimensions were given.
    pub fn build(self) -> Result<Room, ValidationError> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let dimensions = self
            .dimensions
            .ok_or(ValidationError::InvalidDimension { field: "width" })?;
        Ok(Room {
            id: self.id.unwrap_or_default(),
            name,
            floor: self.floor,
            dimensions,
            outdoor: self.outdoor,
            devices: UniqueCollection::new("device"),
        })
    }
}
