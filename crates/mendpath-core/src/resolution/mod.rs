pub mod drift;
pub mod engine;
pub mod lookup;
pub mod result;

pub use drift::DriftKind;
pub use engine::{Healer, resolve};
pub use lookup::Lookup;
pub use result::Relocation;
