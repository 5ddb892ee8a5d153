use super::policy::AttributesConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MendpathConfig {
    pub healing: HealingConfig,
    pub attributes: AttributesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealingConfig {
    /// Fall back to the golden master when the live page has no match.
    pub enabled: bool,
}

impl Default for HealingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
