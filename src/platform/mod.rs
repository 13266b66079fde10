//! Platform abstraction layer
//!
//! Browser-side concerns that sit outside the simulation:
//! - Image manifest and the load counter that gates the first game
//! - Image element creation on wasm32

pub mod assets;

pub use assets::{AssetGate, MANIFEST};
