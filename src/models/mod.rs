//! Core data structures

/// Bit-packed matrices
pub mod matrix;
/// Integer points and polygons
pub mod point;
/// Error correction levels and masks
pub mod qr_code;

pub use matrix::{BitMatrix, ModuleMatrix};
pub use point::Point;
pub use qr_code::{ECLevel, MaskPattern, version_size};
