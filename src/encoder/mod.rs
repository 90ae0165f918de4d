//! QR code encoding modules
//!
//! This module turns a payload into a finished module matrix:
//! - Data mode selection and bit stream assembly
//! - Reed-Solomon error correction and block interleaving
//! - Function patterns, format and version information
//! - Mask selection by penalty score

/// BCH codes for format and version info
pub mod bch;
/// Bit buffer and codeword padding
pub mod bitstream;
/// Version selection and the end-to-end build
pub mod builder;
/// Function patterns and codeword placement
pub mod function_patterns;
/// Mask evaluation and selection
pub mod mask;
/// Reed-Solomon ECC generation
pub mod reed_solomon;
/// Numeric, alphanumeric and byte segments
pub mod segment;
/// ISO/IEC 18004 tables (ECC codewords/blocks, capacities)
pub mod tables;

pub use builder::{QrBuilder, VersionPolicy};
