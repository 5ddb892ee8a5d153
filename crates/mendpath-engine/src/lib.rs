pub mod backend;
pub mod capture;
pub mod config;
pub mod error;
pub mod healing;

pub use backend::{Driver, ElementHandle};
pub use error::{DriverError, HealingError};
pub use healing::HealingDriver;

pub use mendpath_common::{Element, ElementPath, Locator, SnapshotTree};
pub use mendpath_core as core;
