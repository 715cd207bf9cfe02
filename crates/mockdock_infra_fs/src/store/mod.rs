pub mod container;
pub mod error;
pub mod image;
mod snapshot;
