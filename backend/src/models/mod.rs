//! Domain models for the elevator simulator

pub mod building;
pub mod button;
pub mod direction;
pub mod door;
pub mod event;
pub mod request_set;

/// Floor numbers are signed so basements can be configured.
pub type FloorNumber = i32;

// Re-exports
pub use building::{Building, BuildingError};
pub use button::Button;
pub use direction::Direction;
pub use door::{Door, DoorState, DoorTransition};
pub use event::{Event, EventLog, RequestSource};
pub use request_set::RequestSet;
