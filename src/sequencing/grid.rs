/*
Step Grid
=========

The pattern is a rows × columns matrix of on/off cells:

              col 0  1  2  3  4  5  6  7 ...
    row 0   (high) ■  ·  ·  ·  ■  ·  ·  · ...
    row 1          ·  ·  ■  ·  ·  ·  ■  ·
    ...
    row 7    (low) ■  ·  ·  ·  ■  ·  ·  ·

Rows are scale degrees (row 0 is the highest pitch), columns are sixteenth
note steps. The row count is fixed for the life of the grid; the column
count is user-selectable and always clamped to [MIN_COLUMNS, MAX_COLUMNS].

Resizing keeps every cell whose column still exists and zero-fills new
columns, so shrinking 16 → 8 and growing back 8 → 16 loses the second half.

Cells are stored row-major in one Vec<bool>.
*/

use rand::Rng;

pub const ROWS: usize = 8;
pub const MIN_COLUMNS: usize = 4;
pub const MAX_COLUMNS: usize = 32;
pub const DEFAULT_COLUMNS: usize = 16;

/// Clamp a requested column count into the supported range.
pub fn clamp_columns(columns: usize) -> usize {
    columns.clamp(MIN_COLUMNS, MAX_COLUMNS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(ROWS, DEFAULT_COLUMNS)
    }
}

impl Grid {
    /// Empty grid. `columns` is clamped; `rows` is at least 1.
    pub fn new(rows: usize, columns: usize) -> Self {
        let rows = rows.max(1);
        let columns = clamp_columns(columns);
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    /// Cell value; out-of-range reads are `false`.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Set a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, active: bool) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = active;
        }
    }

    /// Flip a cell and return its new value.
    pub fn flip(&mut self, row: usize, col: usize) -> bool {
        let next = !self.get(row, col);
        self.set(row, col, next);
        self.get(row, col)
    }

    /// Change the column count, keeping cells by position.
    pub fn resize_columns(&mut self, columns: usize) {
        let columns = clamp_columns(columns);
        if columns == self.columns {
            return;
        }

        let mut cells = vec![false; self.rows * columns];
        let keep = columns.min(self.columns);
        for row in 0..self.rows {
            let src = row * self.columns;
            let dst = row * columns;
            cells[dst..dst + keep].copy_from_slice(&self.cells[src..src + keep]);
        }

        self.columns = columns;
        self.cells = cells;
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Overwrite every cell with an independent coin flip: probability
    /// `strong` on columns divisible by 4, `other` elsewhere.
    pub fn randomize<R: Rng + ?Sized>(&mut self, strong: f64, other: f64, rng: &mut R) {
        let strong = strong.clamp(0.0, 1.0);
        let other = other.clamp(0.0, 1.0);
        for row in 0..self.rows {
            for col in 0..self.columns {
                let p = if col % 4 == 0 { strong } else { other };
                self.set(row, col, rng.random_bool(p));
            }
        }
    }

    pub fn row(&self, row: usize) -> &[bool] {
        match self.index(row, 0) {
            Some(start) => &self.cells[start..start + self.columns],
            None => &[],
        }
    }

    /// Rows with an active cell in `col`, top to bottom.
    pub fn active_in_column(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).filter(move |&row| self.get(row, col))
    }

    pub fn active_count_in_row(&self, row: usize) -> usize {
        self.row(row).iter().filter(|&&on| on).count()
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }

    /// Fraction of active cells in `col`.
    pub fn column_density(&self, col: usize) -> f32 {
        self.active_in_column(col).count() as f32 / self.rows as f32
    }
}
