//! House — the root of the device hierarchy.

use crate::collection::UniqueCollection;
use crate::device::Device;
use crate::error::{NotFoundError, SmartHomeError, ValidationError};
use crate::functionality::FunctionalityMap;
use crate::id::HouseId;
use crate::location::Location;
use crate::room::Room;

/// A house and its rooms.
#[derive(Debug, Clone)]
pub struct House {
    id: HouseId,
    name: String,
    location: Option<Location>,
    rooms: UniqueCollection<Room>,
}

impl House {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            id: HouseId::new(),
            name,
            location: None,
            rooms: UniqueCollection::new("room"),
        })
    }

    #[must_use]
    pub fn id(&self) -> HouseId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Set or replace where the house stands.
    pub fn configure_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::DuplicateName`] if a room with this name exists.
    pub fn add_room(&mut self, room: Room) -> Result<&mut Room, SmartHomeError> {
        let name = room.name().to_string();
        Ok(self
            .rooms
            .try_add(&name, || Ok::<_, ValidationError>(room))?)
    }

    #[must_use]
    pub fn rooms(&self) -> &UniqueCollection<Room> {
        &self.rooms
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no room has this name.
    pub fn room(&self, name: &str) -> Result<&Room, NotFoundError> {
        self.rooms.get(name)
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no room has this name.
    pub fn room_mut(&mut self, name: &str) -> Result<&mut Room, NotFoundError> {
        self.rooms.get_mut(name)
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown room or device.
    pub fn device(&self, room: &str, device: &str) -> Result<&Device, NotFoundError> {
        self.room(room)?.device(device)
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown room or device.
    pub fn device_mut(&mut self, room: &str, device: &str) -> Result<&mut Device, NotFoundError> {
        self.room_mut(room)?.device_mut(device)
    }

    /// Every device of the house, room by room.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.rooms.iter().flat_map(|room| room.devices().iter())
    }

    /// House-wide rollup: each room's map merged in room order.
    #[must_use]
    pub fn functionalities(&self) -> FunctionalityMap<'_> {
        let mut map = FunctionalityMap::default();
        for room in &self.rooms {
            map.merge(room.functionalities());
        }
        map
    }
}
