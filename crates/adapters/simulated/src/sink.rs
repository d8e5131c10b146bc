//! Recording command sink — remembers what actuators were told to do.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use smarthome_domain::hardware::CommandSink;

/// One command received by a [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordedCommand {
    Switch(bool),
    Integer(i64),
    Decimal(f64),
}

/// A simulated actuator bus that records every command it receives.
///
/// Commands are recorded whether or not the sink accepts them.
pub struct RecordingSink {
    accept: AtomicBool,
    commands: Mutex<Vec<RecordedCommand>>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            accept: AtomicBool::new(true),
            commands: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingSink {
    /// Make subsequent commands succeed (`true`) or be refused (`false`).
    pub fn set_accepting(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Every command received so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |g| g.clone())
    }

    fn record(&self, command: RecordedCommand) -> bool {
        self.commands
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(command);
        let accepted = self.accept.load(Ordering::SeqCst);
        if !accepted {
            tracing::debug!(?command, "simulated hardware refused command");
        }
        accepted
    }
}

impl CommandSink for RecordingSink {
    fn send_switch(&self, on: bool) -> bool {
        self.record(RecordedCommand::Switch(on))
    }

    fn send_integer(&self, value: i64) -> bool {
        self.record(RecordedCommand::Integer(value))
    }

    fn send_decimal(&self, value: f64) -> bool {
        self.record(RecordedCommand::Decimal(value))
    }
}
