//! Chat notification boundary: the transport trait and message
//! composition from sheet-stored templates.

mod message;
mod notifier;

pub use message::{template_keys, AddressStyle, MessageComposer};
pub use notifier::{Notifier, RoomSelector};
