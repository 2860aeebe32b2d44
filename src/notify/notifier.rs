//! The notifier trait and test-room routing.

use crate::settings::Settings;

/// Sends one finished message to one chat room.
///
/// Transmission is out of scope; production wires in a real chat client,
/// tests record the calls.
pub trait Notifier {
    /// Sends `message` to `room_id`.
    fn send(&self, message: &str, room_id: &str) -> crate::error::EngineResult<()>;
}

/// Resolves the room a message actually goes to.
///
/// While test mode is on, every message is rerouted to the test room so a
/// misconfigured cycle cannot spam workers.
#[derive(Debug, Clone, Copy)]
pub struct RoomSelector<'a> {
    settings: &'a Settings,
}

impl<'a> RoomSelector<'a> {
    /// Creates a selector over the given settings.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// The room to send to: `wanted`, or the test room in test mode.
    pub fn resolve(&self, wanted: &'a str) -> &'a str {
        if self.settings.test_mode {
            &self.settings.test_room_id
        } else {
            wanted
        }
    }
}
