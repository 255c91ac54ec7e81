//! Field module - manages the occupancy grid
//!
//! The field is a `width`×`height` grid of [`Cell`] values stored in a flat,
//! row-major vector. Coordinates are `(x, y)` with `x` growing to the right and
//! `y` growing downwards; row 0 is the top row.
//!
//! Out-of-range coordinates are never an error: reads treat them as blocked and
//! writes ignore them.

use crate::types::Cell;

/// The game field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Field {
    /// Create a new empty field
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= i32::from(self.width) || y < 0 || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Get cell at position (x, y), `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// True only for in-bounds, unoccupied cells.
    pub fn is_cell_empty(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(cell) if !cell.occupied)
    }

    /// Color id at (x, y); 0 for empty or out-of-bounds cells.
    pub fn color_at(&self, x: i32, y: i32) -> u8 {
        self.get(x, y).map_or(0, |cell| cell.color_id)
    }

    /// Occupy (x, y) with the given color.
    ///
    /// Returns false without touching the grid when the position is out of bounds
    /// or the color id is 0.
    pub fn set_cell(&mut self, x: i32, y: i32, color_id: u8) -> bool {
        if color_id == 0 {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = Cell::filled(color_id);
                true
            }
            None => false,
        }
    }

    /// Empty (x, y). Returns false when out of bounds.
    pub fn clear_cell(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = Cell::EMPTY;
                true
            }
            None => false,
        }
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Cells of one row, `None` if out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= usize::from(self.height) {
            return None;
        }
        let width = usize::from(self.width);
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_line_complete(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.occupied))
    }

    /// All complete rows, top to bottom
    pub fn find_complete_lines(&self) -> Vec<usize> {
        (0..usize::from(self.height))
            .filter(|&y| self.is_line_complete(y))
            .collect()
    }

    /// Remove a single row: every row above shifts down one, the top row empties.
    ///
    /// Rows below `y` are never touched. Returns false if `y` is out of range.
    pub fn remove_line(&mut self, y: usize) -> bool {
        if y >= usize::from(self.height) {
            return false;
        }

        let width = usize::from(self.width);

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(Cell::EMPTY);
        true
    }

    /// Remove the given rows.
    ///
    /// The list is sorted ascending and deduplicated first. Removing in ascending
    /// order is safe: a removal only shifts rows above it, so every row still to
    /// be processed keeps its index and content.
    pub fn remove_lines(&mut self, rows: &[usize]) -> usize {
        let mut sorted = rows.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        sorted
            .into_iter()
            .filter(|&y| self.remove_line(y))
            .count()
    }

    /// Find and remove every complete row. Returns the number removed.
    pub fn remove_all_complete_lines(&mut self) -> usize {
        let complete = self.find_complete_lines();
        if complete.is_empty() {
            return 0;
        }
        self.remove_lines(&complete)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.occupied).count()
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a row except for the listed columns
    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: i32, gaps: &[i32], color_id: u8) {
        for x in 0..i32::from(self.width) {
            if !gaps.contains(&x) {
                self.set_cell(x, y, color_id);
            }
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(
            crate::types::DEFAULT_FIELD_WIDTH,
            crate::types::DEFAULT_FIELD_HEIGHT,
        )
    }
}
