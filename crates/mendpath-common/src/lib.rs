pub mod error;
pub mod locator;
pub mod protocol;

pub use error::PathParseError;
pub use locator::{Locator, LocatorKind};
pub use protocol::{Element, ElementPath, IdentifyingAttributes, PathSegment, SnapshotTree};
