pub mod collection;
pub mod event;
pub mod photo;
pub mod studio;

pub use collection::*;
pub use event::*;
pub use photo::*;
pub use studio::*;
