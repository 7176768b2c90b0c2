//! Toroidal grid representation for the simulation

use super::Cell;
use crate::error::EngineError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular grid of cells with toroidal wrap-around addressing.
///
/// Coordinates are signed and unbounded: any row/column is reduced into
/// range by full modular arithmetic, so a lookup several periods outside
/// the grid still lands on the correct cell. Dimensions are fixed for the
/// lifetime of the grid.
///
/// Equality compares dimensions and the alive pattern only; ages and
/// immortality flags are decoration and do not affect `==`. The full cell
/// state is observable through [`Grid::cell`].
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        })
    }

    /// Create a grid where each cell is alive with probability 0.25.
    pub fn random(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::random_with(width, height, &mut rand::rng())
    }

    /// Random fill with a caller-supplied generator, for deterministic setups.
    pub fn random_with<R: Rng>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let mut grid = Self::new(width, height)?;
        for cell in &mut grid.cells {
            cell.set_alive(rng.random_bool(0.25));
        }
        Ok(grid)
    }

    /// Create a grid from an explicit row-major boolean matrix.
    ///
    /// The input is deep-copied. Empty or ragged input is rejected as an
    /// invalid dimension.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimension { width, height });
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(EngineError::InvalidDimension { width: 0, height });
        }

        let cells = rows
            .iter()
            .flatten()
            .map(|&alive| Cell::new(alive))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Assemble a grid from already-computed cells. Callers guarantee
    /// `cells.len() == width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reduce a signed coordinate into `[0, extent)` by modular wrap.
    /// Works for values any number of periods out of range.
    fn wrap(value: i64, extent: usize) -> usize {
        let extent = extent as i64;
        (((value % extent) + extent) % extent) as usize
    }

    #[inline]
    fn index(&self, row: i64, col: i64) -> usize {
        Self::wrap(row, self.height) * self.width + Self::wrap(col, self.width)
    }

    /// Whether the cell at the (wrapped) coordinates is alive.
    pub fn get(&self, row: i64, col: i64) -> bool {
        self.cells[self.index(row, col)].is_alive()
    }

    /// The full cell at the (wrapped) coordinates, including age and
    /// immortality.
    pub fn cell(&self, row: i64, col: i64) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Set the alive flag at the (wrapped) coordinates in place.
    /// Flipping the flag resets the cell's age.
    pub fn set(&mut self, row: i64, col: i64, alive: bool) {
        let idx = self.index(row, col);
        self.cells[idx].set_alive(alive);
    }

    /// Toggle the immortality flag at the (wrapped) coordinates.
    pub fn set_immortal(&mut self, row: i64, col: i64, immortal: bool) {
        let idx = self.index(row, col);
        self.cells[idx].set_immortal(immortal);
    }

    /// Count alive cells among the 8 toroidal neighbors, excluding self.
    pub fn count_alive_neighbors(&self, row: i64, col: i64) -> u8 {
        let mut count = 0;
        for dr in [-1, 0, 1] {
            for dc in [-1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if self.get(row + dr, col + dc) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Deep copy of the grid.
    pub fn snapshot(&self) -> Grid {
        self.clone()
    }

    /// True iff no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Total number of living cells.
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.is_alive() == b.is_alive())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.get(row as i64, col as i64) {
                    '█'
                } else {
                    '·'
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 4);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(EngineError::InvalidDimension {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::random(5, 0).is_err());
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[vec![true, false, true], vec![false, true, false]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.living_count(), 3);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = Grid::from_rows(&[vec![true, false], vec![true]]);
        assert!(matches!(result, Err(EngineError::InvalidDimension { .. })));
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_full_modular_wrap() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(0, 0, true);

        // One period out in each direction.
        assert!(grid.get(-2, 0));
        assert!(grid.get(2, 2));
        // Several periods out.
        assert!(grid.get(10, -10));
        assert!(!grid.get(-7, 0), "(-7, 0) wraps to row 1, which is dead");
        assert!(grid.get(-8, -8));
    }

    #[test]
    fn test_set_wraps_too() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(-1, -1, true);
        assert!(grid.get(2, 2));
    }

    #[test]
    fn test_corner_cells_are_toroidal_neighbors() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(2, 3, true);
        assert_eq!(grid.count_alive_neighbors(0, 0), 1);
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = Grid::from_rows(&[
            vec![true, true, true, false, false],
            vec![true, false, true, false, false],
            vec![true, true, true, false, false],
            vec![false, false, false, false, false],
            vec![false, false, false, false, false],
        ])
        .unwrap();
        assert_eq!(grid.count_alive_neighbors(1, 1), 8);
    }

    #[test]
    fn test_is_empty_matches_lookups() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(grid.is_empty());
        grid.set(1, 2, true);
        assert!(!grid.is_empty());
        grid.set(1, 2, false);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_resets_age_on_flip() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(0, 0, true);
        grid.set(0, 0, false);
        grid.set(0, 0, true);
        assert_eq!(grid.cell(0, 0).age(), 0);
    }

    #[test]
    fn test_random_fill_density() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::random_with(100, 100, &mut rng).unwrap();
        let density = grid.living_count() as f64 / 10_000.0;
        assert!(
            (0.20..0.30).contains(&density),
            "fill probability 0.25 badly off: {}",
            density
        );
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut grid = Grid::new(2, 2).unwrap();
        let copy = grid.snapshot();
        grid.set(0, 0, true);
        assert!(!copy.get(0, 0));
    }

    #[test]
    fn test_equality_ignores_decoration() {
        let mut a = Grid::new(2, 2).unwrap();
        let mut b = Grid::new(2, 2).unwrap();
        a.set(0, 1, true);
        b.set(0, 1, true);
        b.set_immortal(1, 0, true);
        assert_eq!(a, b);
        b.set(1, 1, true);
        assert_ne!(a, b);
    }
}
