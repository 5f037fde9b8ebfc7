//! Line protocol, wire payloads and two-endpoint sessions for gambit.

pub mod command;
pub mod engine;
pub mod error;
pub mod session;
pub mod wire;

pub use command::{Command, LinkOption, PositionSource, parse_command};
pub use engine::{LinkConfig, LinkEngine};
pub use error::LinkError;
pub use session::{LocalSide, Session};
pub use wire::Payload;
