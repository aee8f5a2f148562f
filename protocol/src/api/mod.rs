//! Request payloads organized by resource:
//! - `event`: event creation and partial updates
//! - `collection`: collection creation and partial updates
//! - `photo`: event-scoped photo registration
//! - `studio`: studio settings (always sent as a full object)

pub mod collection;
pub mod event;
pub mod photo;
pub mod studio;

pub use collection::*;
pub use event::*;
pub use photo::*;
pub use studio::*;
