/// Append-only bit buffer, most significant bit first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True before the first append
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, high bit first
    pub fn append_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 31 && value >> count == 0);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Append all of `other`
    pub fn extend_from(&mut self, other: &BitBuffer) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Pack into bytes; a trailing partial byte is zero-padded
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Terminate and pad a data bit stream to exactly `capacity_bytes` codewords.
///
/// Adds up to four terminator zeros, zero-fills to a byte boundary, then
/// alternates the 0xEC / 0x11 pad codewords.
pub fn finish_data_codewords(mut buffer: BitBuffer, capacity_bytes: usize) -> Vec<u8> {
    let capacity_bits = capacity_bytes * 8;
    debug_assert!(buffer.len() <= capacity_bits);

    let terminator = (capacity_bits - buffer.len()).min(4);
    buffer.append_bits(0, terminator as u8);
    let align = (8 - buffer.len() % 8) % 8;
    buffer.append_bits(0, align as u8);

    let mut bytes = buffer.to_bytes();
    for pad in [0xECu8, 0x11].into_iter().cycle() {
        if bytes.len() >= capacity_bytes {
            break;
        }
        bytes.push(pad);
    }
    bytes
}
