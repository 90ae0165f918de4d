use super::bitstream::{BitBuffer, finish_data_codewords};
use super::function_patterns::SymbolCanvas;
use super::mask::apply_best_mask;
use super::reed_solomon::ReedSolomonEncoder;
use super::segment::Segment;
use super::tables::{ec_block_info, num_data_codewords, num_raw_data_modules};
use crate::error::{EncodingError, QrError, QrResult};
use crate::models::{ECLevel, ModuleMatrix, version_size};

/// How the builder picks a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPolicy {
    /// Smallest version that fits, starting at 1
    Fit,
    /// Smallest version that fits, starting at the given version
    AtLeast(u8),
    /// Exactly this version; fails if the payload does not fit
    Exact(u8),
}

impl VersionPolicy {
    fn range(&self) -> Result<std::ops::RangeInclusive<u8>, EncodingError> {
        let check = |v: u8| {
            if (1..=40).contains(&v) {
                Ok(v)
            } else {
                Err(EncodingError::InvalidVersion(v))
            }
        };
        match *self {
            VersionPolicy::Fit => Ok(1..=40),
            VersionPolicy::AtLeast(v) => Ok(check(v)?..=40),
            VersionPolicy::Exact(v) => Ok(check(v)?..=v),
        }
    }
}

/// Turns a payload into a [`ModuleMatrix`].
///
/// # Example
/// ```
/// use qr_studio::{ECLevel, QrBuilder};
///
/// let matrix = QrBuilder::new(ECLevel::M).build("hello").unwrap();
/// assert_eq!(matrix.version(), 1);
/// assert_eq!(matrix.size(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrBuilder {
    ec_level: ECLevel,
    version: VersionPolicy,
    box_size: u32,
    border: u32,
}

impl QrBuilder {
    /// Builder with version fit, box size 4 and a 4-module border
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            version: VersionPolicy::Fit,
            box_size: 4,
            border: 4,
        }
    }

    /// How the version is chosen. Defaults to [`VersionPolicy::Fit`].
    pub fn version(mut self, policy: VersionPolicy) -> Self {
        self.version = policy;
        self
    }

    /// Pixels per module side
    pub fn box_size(mut self, box_size: u32) -> Self {
        self.box_size = box_size;
        self
    }

    /// Quiet zone width in modules
    pub fn border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Correction level the builder encodes at
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Encode `payload`. Identical inputs always give identical matrices.
    pub fn build(&self, payload: &str) -> QrResult<ModuleMatrix> {
        if payload.is_empty() {
            return Err(EncodingError::EmptyPayload.into());
        }
        if self.box_size == 0 {
            return Err(QrError::invalid("box size must be at least 1 pixel"));
        }

        let segment = Segment::from_payload(payload);
        let (version, capacity) = self.select_version(&segment)?;
        tracing::debug!(
            version,
            level = %self.ec_level,
            mode = ?segment.mode(),
            "selected version"
        );
        self.checked_pixel_size(version)?;

        let mut bits = BitBuffer::new();
        segment.write_to(&mut bits, version);
        let data = finish_data_codewords(bits, capacity);
        let codewords = add_ecc_and_interleave(&data, version, self.ec_level);

        let mut canvas = SymbolCanvas::new(version);
        canvas.place_codewords(&codewords);
        apply_best_mask(&mut canvas, self.ec_level);

        Ok(ModuleMatrix::new(
            canvas.into_modules(),
            version,
            self.box_size,
            self.border,
        ))
    }

    /// Side of the rendered image, rejected when it does not fit in `u32`
    fn checked_pixel_size(&self, version: u8) -> QrResult<u32> {
        self.border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(version_size(version) as u32))
            .and_then(|modules| modules.checked_mul(self.box_size))
            .ok_or_else(|| {
                QrError::invalid(format!(
                    "box size {} with border {} overflows the image size",
                    self.box_size, self.border
                ))
            })
    }

    fn select_version(&self, segment: &Segment) -> Result<(u8, usize), EncodingError> {
        let range = self.version.range()?;
        let last = *range.end();
        let mut needed = 0;
        for version in range {
            let capacity = num_data_codewords(version, self.ec_level);
            match segment.total_bits(version) {
                Some(bits) if bits <= capacity * 8 => return Ok((version, capacity)),
                Some(bits) => needed = bits,
                None => needed = usize::MAX,
            }
        }
        Err(EncodingError::DataTooLong {
            level: self.ec_level,
            bits: needed,
            capacity_bits: num_data_codewords(last, self.ec_level) * 8,
        })
    }
}

/// Split data into blocks, append each block's ECC, then interleave.
fn add_ecc_and_interleave(data: &[u8], version: u8, ec_level: ECLevel) -> Vec<u8> {
    let Some(info) = ec_block_info(version, ec_level) else {
        return data.to_vec();
    };
    let raw_codewords = num_raw_data_modules(version) / 8;
    let num_short = info.num_blocks - raw_codewords % info.num_blocks;
    let short_len = raw_codewords / info.num_blocks;
    let short_data_len = short_len - info.ecc_per_block;

    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let mut blocks: Vec<(Vec<u8>, Vec<u8>)> = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = short_data_len + usize::from(i >= num_short);
        let block = data[offset..offset + len].to_vec();
        offset += len;
        let ecc = rs.encode(&block);
        blocks.push((block, ecc));
    }

    let mut result = Vec::with_capacity(raw_codewords);
    for i in 0..=short_data_len {
        for (block, _) in &blocks {
            if let Some(&b) = block.get(i) {
                result.push(b);
            }
        }
    }
    for i in 0..info.ecc_per_block {
        for (_, ecc) in &blocks {
            result.push(ecc[i]);
        }
    }
    result
}
