//! Handler implementations

pub mod group;
pub mod null;
pub mod test_handler;

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "console")]
pub use console::ConsoleHandler;
pub use group::GroupHandler;
pub use null::NullHandler;
pub use test_handler::TestHandler;

// Re-export the trait alongside its implementations
pub use crate::core::Handler;
