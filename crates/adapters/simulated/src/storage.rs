//! In-memory house repository.

use std::future::Future;
use std::sync::Mutex;

use smarthome_app::ports::HouseRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::house::House;

/// Keeps the most recently saved [`House`] snapshot in process memory.
#[derive(Default)]
pub struct MemoryHouseRepository {
    snapshot: Mutex<Option<House>>,
}

impl MemoryHouseRepository {
    fn lock_snapshot(&self) -> std::sync::MutexGuard<'_, Option<House>> {
        self.snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl HouseRepository for MemoryHouseRepository {
    fn save(&self, house: &House) -> impl Future<Output = Result<(), SmartHomeError>> + Send {
        *self.lock_snapshot() = Some(house.clone());
        async { Ok(()) }
    }

    fn load(&self) -> impl Future<Output = Result<Option<House>, SmartHomeError>> + Send {
        let house = self.lock_snapshot().clone();
        async { Ok(house) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_load_nothing_before_first_save() {
        let repo = MemoryHouseRepository::default();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_load_last_saved_snapshot() {
        let repo = MemoryHouseRepository::default();
        repo.save(&House::new("First").unwrap()).await.unwrap();
        repo.save(&House::new("Second").unwrap()).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.name(), "Second");
    }
}
