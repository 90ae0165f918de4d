/// Compact bit matrix for storing binary data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Finished QR symbol: `size × size` modules plus the raster geometry it was
/// built for.
///
/// Two coordinate spaces are exposed. Symbol coordinates run over `0..size`.
/// Bordered coordinates run over `0..bordered_size()` and include the quiet
/// zone, which is always off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    modules: BitMatrix,
    version: u8,
    box_size: u32,
    border: u32,
}

impl ModuleMatrix {
    pub(crate) fn new(modules: BitMatrix, version: u8, box_size: u32, border: u32) -> Self {
        Self {
            modules,
            version,
            box_size,
            border,
        }
    }

    /// Symbol side length in modules (`17 + 4 * version`)
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Side length in modules including the quiet zone on both sides
    pub fn bordered_size(&self) -> usize {
        self.size() + 2 * self.border as usize
    }

    /// QR version (1-40)
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Pixels per module side
    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    /// Quiet zone width in modules
    pub fn border(&self) -> u32 {
        self.border
    }

    /// Rendered image side length in pixels
    pub fn pixel_size(&self) -> u32 {
        self.bordered_size() as u32 * self.box_size
    }

    /// Module state in symbol coordinates. Out of range reads as off.
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Module state in bordered coordinates.
    pub fn is_on_bordered(&self, x: usize, y: usize) -> bool {
        let b = self.border as usize;
        if x < b || y < b {
            return false;
        }
        self.modules.get(x - b, y - b)
    }

    /// Map bordered coordinates to symbol coordinates, `None` inside the quiet zone.
    pub fn to_symbol(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        let b = self.border as usize;
        let (sx, sy) = (x.checked_sub(b)?, y.checked_sub(b)?);
        (sx < self.size() && sy < self.size()).then_some((sx, sy))
    }

    /// Count of dark modules in the symbol
    pub fn dark_count(&self) -> usize {
        self.modules.count_ones()
    }

    /// Underlying bit matrix (symbol coordinates)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_ones(), 1);

        matrix.toggle(3, 4);
        assert!(!matrix.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
    }

    #[test]
    fn test_bordered_coordinates() {
        let mut bits = BitMatrix::new(21, 21);
        bits.set(0, 0, true);
        let matrix = ModuleMatrix::new(bits, 1, 4, 4);

        assert_eq!(matrix.bordered_size(), 29);
        assert_eq!(matrix.pixel_size(), 116);
        assert!(matrix.is_on(0, 0));
        assert!(matrix.is_on_bordered(4, 4));
        assert!(!matrix.is_on_bordered(3, 3));
        assert_eq!(matrix.to_symbol(4, 5), Some((0, 1)));
        assert_eq!(matrix.to_symbol(2, 5), None);
        assert_eq!(matrix.to_symbol(25, 5), None);
    }
}
