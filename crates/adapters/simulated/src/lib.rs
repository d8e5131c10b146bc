//! # smarthome-adapter-simulated
//!
//! Simulated collaborators for running the smart-home core without hardware
//! or a database.
//!
//! ## Provided collaborators
//!
//! | Type | Implements | Behaviour |
//! |------|------------|-----------|
//! | [`ScriptedSource`] | `ReadingSource` | Replays a fixed list of readings, wrapping around |
//! | [`RecordingSink`] | `CommandSink` | Records every command; can be told to refuse them |
//! | [`MemoryHouseRepository`] | `HouseRepository` | Keeps the last saved house snapshot in memory |
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-app` (port traits) and `smarthome-domain` only.

mod sink;
mod source;
mod storage;

pub use sink::{RecordedCommand, RecordingSink};
pub use source::ScriptedSource;
pub use storage::MemoryHouseRepository;
