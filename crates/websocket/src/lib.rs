pub mod manager;
pub mod messages;

pub use manager::{Connection, ConnectionManager, WsSender};
pub use messages::{ClientMessage, ServerMessage};
