pub mod loader;
pub mod policy;
pub mod schema;

pub use loader::{ATTRIBUTES_FILE_ENV, ConfigError, ConfigLoader};
pub use policy::{AttributePolicy, AttributesConfig};
pub use schema::{HealingConfig, MendpathConfig};
