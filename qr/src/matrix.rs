//! Module grid construction (ISO 18004 Sections 6 and 7.7).
//!
//! ```text
//!     +-------+---+-------+
//!     |#######|   |#######|      ####### = Finder pattern (7x7) + separator
//!     |# ### #| F |# ### #|      F       = Format information (reserved)
//!     |#######|   |#######|      T       = Timing pattern (row 6, col 6)
//!     +-------+---+-------+      A       = Alignment pattern (5x5, v2+)
//!     |  T    |       |          V       = Version information (v7+)
//!     |       |  DATA |A|
//!     +-------+-------+-+
//!     |#######|V|
//!     |#######| |
//!     +-------+-+
//! ```
//!
//! Every module is either part of a function pattern (reserved, never masked)
//! or a data module visited exactly once by [`DataPath`].

use crate::version::Version;

/// A square module grid plus the reservation mask for function patterns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    version: Version,
    size: usize,
    /// true = dark, false = light.
    modules: Vec<Vec<bool>>,
    /// Modules owned by function patterns or format/version information.
    reserved: Vec<Vec<bool>>,
}

impl Matrix {
    /// Allocate an all-light, unreserved grid for `version`.
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            size,
            modules: vec![vec![false; size]; size],
            reserved: vec![vec![false; size]; size],
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Module value at (row, col). true = dark.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules[row][col]
    }

    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved[row][col]
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.modules
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().flatten().filter(|&&m| m).count()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, dark: bool) {
        self.modules[row][col] = dark;
    }

    pub(crate) fn toggle(&mut self, row: usize, col: usize) {
        self.modules[row][col] = !self.modules[row][col];
    }

    fn set_function_module(&mut self, row: usize, col: usize, dark: bool) {
        self.modules[row][col] = dark;
        self.reserved[row][col] = true;
    }

    /// Place finder, timing, alignment patterns and the dark module, and
    /// reserve the format (and version) information areas.
    pub fn place_function_patterns(&mut self) {
        let size = self.size;

        self.place_finder_pattern(0, 0);
        self.place_finder_pattern(0, size - 7);
        self.place_finder_pattern(size - 7, 0);

        self.place_timing_patterns();
        self.place_alignment_patterns();

        // Dark module (always black)
        self.set_function_module(size - 8, 8, true);

        self.reserve_format_area();
        if self.version.has_version_info() {
            self.reserve_version_area();
        }
    }

    /// Place a 7x7 finder pattern with its top-left corner at (row, col),
    /// plus the one-module light separator on the sides facing the symbol.
    ///
    /// ```text
    /// #######
    /// #.....#
    /// #.###.#
    /// #.###.#
    /// #.###.#
    /// #.....#
    /// #######
    /// ```
    fn place_finder_pattern(&mut self, row: usize, col: usize) {
        for dr in -1isize..=7 {
            for dc in -1isize..=7 {
                let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                else {
                    continue;
                };
                if r >= self.size || c >= self.size {
                    continue;
                }

                let in_pattern = (0..=6).contains(&dr) && (0..=6).contains(&dc);
                let is_edge = dr == 0 || dr == 6 || dc == 0 || dc == 6;
                let is_center = (2..=4).contains(&dr) && (2..=4).contains(&dc);
                self.set_function_module(r, c, in_pattern && (is_edge || is_center));
            }
        }
    }

    /// Alternating modules on row 6 and column 6, between the finders.
    fn place_timing_patterns(&mut self) {
        for i in 8..self.size - 8 {
            let is_black = i % 2 == 0;
            self.set_function_module(6, i, is_black);
            self.set_function_module(i, 6, is_black);
        }
    }

    /// 5x5 alignment patterns on the version's grid, except where the grid
    /// point falls inside a finder pattern.
    fn place_alignment_patterns(&mut self) {
        let positions = self.version.alignment_positions();

        for &row in positions {
            for &col in positions {
                if self.in_finder_zone(row, col) {
                    continue;
                }
                self.place_alignment_pattern(row, col);
            }
        }
    }

    fn place_alignment_pattern(&mut self, center_row: usize, center_col: usize) {
        for dr in 0..5 {
            for dc in 0..5 {
                let is_edge = dr == 0 || dr == 4 || dc == 0 || dc == 4;
                let is_center = dr == 2 && dc == 2;
                self.set_function_module(
                    center_row + dr - 2,
                    center_col + dc - 2,
                    is_edge || is_center,
                );
            }
        }
    }

    /// Finder pattern plus separator at one of the three corners.
    fn in_finder_zone(&self, row: usize, col: usize) -> bool {
        let far = self.size - 8;
        (row <= 7 && col <= 7) || (row <= 7 && col >= far) || (row >= far && col <= 7)
    }

    /// Reserve format information area (filled after masking).
    fn reserve_format_area(&mut self) {
        let size = self.size;

        // Around top-left finder pattern, skipping the timing modules
        for i in 0..9 {
            if i != 6 {
                self.reserved[8][i] = true;
                self.reserved[i][8] = true;
            }
        }

        // Along top-right and bottom-left finder patterns
        for i in 0..8 {
            self.reserved[8][size - 1 - i] = true;
            self.reserved[size - 1 - i][8] = true;
        }
    }

    /// Reserve the two 6x3 version information blocks (v7+).
    fn reserve_version_area(&mut self) {
        let size = self.size;
        for i in 0..6 {
            for j in 0..3 {
                self.reserved[i][size - 11 + j] = true;
                self.reserved[size - 11 + j][i] = true;
            }
        }
    }

    /// Zigzag traversal of all data modules.
    pub fn data_path(&self) -> DataPath<'_> {
        DataPath {
            matrix: self,
            right: self.size - 1,
            step: 0,
            upward: true,
            done: false,
        }
    }

    /// Write the codeword bits along the data path, MSB first.
    ///
    /// Modules left over once the codewords run out (remainder bits) are
    /// light. Returns the number of data modules written.
    pub fn place_data(&mut self, codewords: &[u8]) -> usize {
        let path: Vec<(usize, usize)> = self.data_path().collect();
        let total_bits = codewords.len() * 8;

        for (bit_idx, &(row, col)) in path.iter().enumerate() {
            let dark =
                bit_idx < total_bits && (codewords[bit_idx / 8] >> (7 - bit_idx % 8)) & 1 == 1;
            self.modules[row][col] = dark;
        }

        path.len()
    }
}

/// Iterator over data module coordinates in placement order.
///
/// Starts at the bottom-right corner and walks two-column strips, right
/// column first, alternating upward and downward. Column 6 (vertical
/// timing) is skipped by shifting the remaining strips one column left.
pub struct DataPath<'a> {
    matrix: &'a Matrix,
    /// Right column of the current strip.
    right: usize,
    /// Position within the strip, 0..2 * size.
    step: usize,
    upward: bool,
    done: bool,
}

impl Iterator for DataPath<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.matrix.size;

        while !self.done {
            if self.step == 2 * size {
                if self.right < 2 {
                    self.done = true;
                    break;
                }
                self.right -= 2;
                if self.right == 6 {
                    self.right = 5;
                }
                self.upward = !self.upward;
                self.step = 0;
                continue;
            }

            let vert = self.step / 2;
            let col = self.right - self.step % 2;
            let row = if self.upward { size - 1 - vert } else { vert };
            self.step += 1;

            if !self.matrix.is_reserved(row, col) {
                return Some((row, col));
            }
        }

        None
    }
}

/// Allocate the grid, place function patterns and write the codewords.
///
/// The result is unmasked and carries no format information yet.
pub fn build_matrix(codewords: &[u8], version: Version) -> Matrix {
    let mut matrix = Matrix::new(version);
    matrix.place_function_patterns();
    let written = matrix.place_data(codewords);
    debug_assert!(
        written >= codewords.len() * 8,
        "v{} data area too small",
        version
    );
    matrix
}
