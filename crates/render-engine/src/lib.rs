//! memegen render engine
//!
//! Turns a signed URL plus two text overlays into a finished raster and
//! writes it out as PNG.
//!
//! # Pipeline
//!
//! ```text
//! SignedUrl ──► ImageSource::fetch ──► decoded image
//!                                          │
//!                                          ├── resize + clear CanvasSurface
//!                                          ├── draw image at (0, 0)
//! Overlays + TextStyle ──► FontBook ──►    ├── fill top text, stroke top text
//!                                          ├── fill bottom text, stroke bottom text
//!                                          ▼
//!                                    CanvasSurface ──► Exporter ──► meme_with_text.png
//! ```

pub mod compositor;
pub mod export;
pub mod fonts;
pub mod source;
pub mod surface;
pub mod text;

pub use compositor::Compositor;
pub use export::{encode_png, Exporter, DEFAULT_FILE_NAME};
pub use fonts::FontBook;
pub use source::{FileImageSource, HttpImageSource, ImageSource, MockImageSource};
pub use surface::CanvasSurface;
