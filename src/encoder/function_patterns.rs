use super::bch;
use crate::models::{BitMatrix, ECLevel, MaskPattern, version_size};

/// Symbol under construction: module colors plus which modules are reserved
/// for function patterns (true = function module, not data).
pub struct SymbolCanvas {
    modules: BitMatrix,
    function: BitMatrix,
    version: u8,
}

impl SymbolCanvas {
    /// Canvas with every function pattern drawn. Format bits are reserved
    /// but hold placeholder values until `draw_format` runs.
    pub fn new(version: u8) -> Self {
        let size = version_size(version);
        let mut canvas = Self {
            modules: BitMatrix::new(size, size),
            function: BitMatrix::new(size, size),
            version,
        };

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            canvas.set_function(6, i, i % 2 == 0);
            canvas.set_function(i, 6, i % 2 == 0);
        }

        // Finder patterns + separators (9x9 areas clipped to bounds)
        canvas.draw_finder(3, 3);
        canvas.draw_finder(size - 4, 3);
        canvas.draw_finder(3, size - 4);

        // Alignment patterns, skipping the three finder corners
        let align = alignment_pattern_positions(version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !corner {
                    canvas.draw_alignment(cx, cy);
                }
            }
        }

        canvas.draw_format(ECLevel::M, MaskPattern::Pattern0);
        canvas.draw_version();
        canvas
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Symbol version
    pub fn version(&self) -> u8 {
        self.version
    }

    /// True for modules reserved by function patterns
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Current module values
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Finished symbol
    pub fn into_modules(self) -> BitMatrix {
        self.modules
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.function.set(x, y, true);
    }

    fn draw_finder(&mut self, cx: usize, cy: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let (x, y) = (cx as isize + dx, cy as isize + dy);
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let x = (cx as isize + dx) as usize;
                let y = (cy as isize + dy) as usize;
                self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    /// Write both copies of the format information plus the dark module
    pub fn draw_format(&mut self, ec_level: ECLevel, mask: MaskPattern) {
        let bits = bch::format_bits(ec_level, mask);
        let bit = |i: usize| (bits >> i) & 1 != 0;
        let size = self.size();

        // First copy, around the top-left finder
        for i in 0..=5 {
            self.set_function(8, i, bit(i));
        }
        self.set_function(8, 7, bit(6));
        self.set_function(8, 8, bit(7));
        self.set_function(7, 8, bit(8));
        for i in 9..15 {
            self.set_function(14 - i, 8, bit(i));
        }

        // Second copy, split between top-right and bottom-left
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, bit(i));
        }
        self.set_function(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        if self.version < 7 {
            return;
        }
        let bits = bch::version_bits(self.version);
        let size = self.size();
        for i in 0..18 {
            let dark = (bits >> i) & 1 != 0;
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, dark);
            self.set_function(b, a, dark);
        }
    }

    /// Place codeword bits in the two-column zigzag, skipping function modules.
    /// Remainder modules past the last codeword stay light.
    pub fn place_codewords(&mut self, codewords: &[u8]) {
        let size = self.size();
        let total_bits = codewords.len() * 8;
        let mut i = 0usize;
        let mut right = size as isize - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = (right + 1) & 2 == 0;
            for vert in 0..size {
                for j in 0..2 {
                    let x = (right - j) as usize;
                    let y = if upward { size - 1 - vert } else { vert };
                    if !self.is_function(x, y) && i < total_bits {
                        let dark = (codewords[i >> 3] >> (7 - (i & 7))) & 1 != 0;
                        self.modules.set(x, y, dark);
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, total_bits);
    }

    /// XOR the mask over every data module. Applying the same mask twice undoes it.
    pub fn apply_mask(&mut self, mask: MaskPattern) {
        let size = self.size();
        for y in 0..size {
            for x in 0..size {
                if !self.is_function(x, y) && mask.is_masked(y, x) {
                    self.modules.toggle(x, y);
                }
            }
        }
    }
}

/// Alignment pattern centers for a given version.
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    if version <= 1 {
        return Vec::new();
    }
    let num_align = version as usize / 7 + 2;
    let size = version_size(version);
    let step = if version == 32 {
        26
    } else {
        (version as usize * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };

    let mut positions = vec![6usize; num_align];
    for (i, slot) in positions.iter_mut().enumerate().skip(1) {
        *slot = size - 7 - (num_align - 1 - i) * step;
    }
    positions
}
