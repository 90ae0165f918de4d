//! Utility functions for image processing
//!
//! - Grayscale conversion (RGB to luminance), sequential and row-parallel

/// RGB to luma conversion
pub mod grayscale;
