pub mod glyphs;
pub mod material;
pub mod particles;
pub mod plugin;
pub mod resize;
pub mod setup;
pub mod sync;
pub mod ui;

pub use material::ParticleDigitMaterialPlugin;
