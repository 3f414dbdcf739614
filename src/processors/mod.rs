//! Processor implementations

pub mod tag;
pub mod thread;
pub mod uid;

pub use tag::TagProcessor;
pub use thread::ThreadProcessor;
pub use uid::UidProcessor;

pub use crate::core::Processor;
