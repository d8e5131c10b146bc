//! # smarthome-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Bootstrap the session [`context::HomeContext`]: type registry loaded once,
//!   component factory with the built-in constructors bound
//! - Define **port traits** that adapters must implement:
//!   - `HouseRepository` — save and load house snapshots
//! - Provide the `HomeService` use-case layer that guards the house hierarchy
//!   so concurrent callers see atomic adds and consistent rollups
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only (plus `tokio::sync` for locking).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod context;
pub mod ports;
pub mod services;
