//! BCH codes protecting the format and version information

use crate::models::{ECLevel, MaskPattern};

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// Fixed XOR applied so the format word is never all zeros
const FORMAT_MASK: u32 = 0x5412;
/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

/// Remainder of `data << ecc_bits` modulo `generator` (degree `ecc_bits`)
fn bch_remainder(data: u32, generator: u32, ecc_bits: u32) -> u32 {
    let mut rem = data;
    for _ in 0..ecc_bits {
        rem = (rem << 1) ^ ((rem >> (ecc_bits - 1)) * generator);
    }
    rem & ((1 << ecc_bits) - 1)
}

/// 15-bit masked format word for a level and mask
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u32) << 3) | mask.bits() as u32;
    let rem = bch_remainder(data, FORMAT_GENERATOR, 10);
    (((data << 10) | rem) ^ FORMAT_MASK) as u16
}

/// 18-bit version word, only meaningful for versions 7-40
pub fn version_bits(version: u8) -> u32 {
    let data = version as u32;
    (data << 12) | bch_remainder(data, VERSION_GENERATOR, 12)
}
