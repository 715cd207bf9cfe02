pub mod container;
pub mod image;
pub mod sequence;

pub use mockdock_common::Result;
