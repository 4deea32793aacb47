//! memegen meme model
//!
//! Defines the core data contracts shared by every memegen crate:
//! - **Assets:** the locally selected file, the content identifier the
//!   asset store hands back, and the time-limited signed URL for it
//! - **Overlays:** the top and bottom text lines and their positions
//! - **Style:** font size, font family, and fill colour shared by both lines
//!
//! Positions are canvas pixels and are never clamped; text drawn outside
//! the surface is simply not visible.

pub mod asset;
pub mod overlay;
pub mod style;

pub use asset::*;
pub use overlay::*;
pub use style::*;
