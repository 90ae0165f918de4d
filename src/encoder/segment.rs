//! Data mode selection and segment encoding
//!
//! The whole payload is encoded as a single segment in the densest mode that
//! can represent every character:
//! - Numeric: digits only, 3 digits per 10 bits
//! - Alphanumeric: `0-9A-Z $%*+-./:`, 2 characters per 11 bits
//! - Byte: UTF-8 bytes, 8 bits each

use super::bitstream::BitBuffer;

const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Digits only
    Numeric,
    /// Upper-case letters, digits and `$%*+-./:` plus space
    Alphanumeric,
    /// Raw bytes
    Byte,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field for a version
    pub fn count_bits(&self, version: u8) -> u8 {
        let band = match version {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
        }
    }

    /// Densest mode that covers every character of `payload`
    pub fn detect(payload: &str) -> Self {
        if payload.bytes().all(|b| b.is_ascii_digit()) {
            Mode::Numeric
        } else if payload.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c)) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }
}

/// One encoded segment, independent of version until the header is written
#[derive(Debug, Clone)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    data: BitBuffer,
}

impl Segment {
    /// Encode `payload` in its detected mode
    pub fn from_payload(payload: &str) -> Self {
        match Mode::detect(payload) {
            Mode::Numeric => Self::numeric(payload),
            Mode::Alphanumeric => Self::alphanumeric(payload),
            Mode::Byte => Self::bytes(payload.as_bytes()),
        }
    }

    fn numeric(digits: &str) -> Self {
        let mut data = BitBuffer::new();
        for chunk in digits.as_bytes().chunks(3) {
            let value = chunk
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
            data.append_bits(value, (chunk.len() * 3 + 1) as u8);
        }
        Self {
            mode: Mode::Numeric,
            char_count: digits.len(),
            data,
        }
    }

    fn alphanumeric(text: &str) -> Self {
        let values: Vec<u32> = text
            .chars()
            .filter_map(|c| ALPHANUMERIC_CHARSET.find(c).map(|i| i as u32))
            .collect();
        let mut data = BitBuffer::new();
        for pair in values.chunks(2) {
            match pair {
                [a, b] => data.append_bits(a * 45 + b, 11),
                [a] => data.append_bits(*a, 6),
                _ => {}
            }
        }
        Self {
            mode: Mode::Alphanumeric,
            char_count: values.len(),
            data,
        }
    }

    fn bytes(bytes: &[u8]) -> Self {
        let mut data = BitBuffer::new();
        for &b in bytes {
            data.append_bits(b as u32, 8);
        }
        Self {
            mode: Mode::Byte,
            char_count: bytes.len(),
            data,
        }
    }

    /// Mode the data was written in
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Total bits including header at `version`, `None` if the count overflows its field
    pub fn total_bits(&self, version: u8) -> Option<usize> {
        let count_bits = self.mode.count_bits(version);
        if self.char_count >= 1 << count_bits {
            return None;
        }
        Some(4 + count_bits as usize + self.data.len())
    }

    /// Write header and data into `out` for `version`
    pub fn write_to(&self, out: &mut BitBuffer, version: u8) {
        out.append_bits(self.mode.indicator(), 4);
        out.append_bits(self.char_count as u32, self.mode.count_bits(version));
        out.extend_from(&self.data);
    }
}
