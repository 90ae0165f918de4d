//! Rasterizing module matrices
//!
//! - `styled`: shaped, colored modules composited over an optional background
//! - `embedded`: modules painted with a darkened user image
//! - `export`: PNG byte streams

/// Alpha compositing and brightness helpers
pub mod composite;
/// Level-H symbol painted with a user image
pub mod embedded;
/// PNG encoding
pub mod export;
/// Finder region predicate
pub mod geometry;
/// Module drawers
pub mod shapes;
/// Shaped and recolored renders
pub mod styled;

pub use embedded::{EmbedOptions, render_embedded, render_embedded_image};
pub use export::to_png;
pub use geometry::is_finder_region;
pub use shapes::ModuleShape;
pub use styled::{RenderStyle, StyledRender, parse_hex_color, render_styled};
