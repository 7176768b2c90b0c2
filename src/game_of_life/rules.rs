//! Birth/survival rule sets and the generation transition

use super::{Cell, Grid};
use crate::error::EngineError;
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Largest possible neighbor count in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

/// An immutable pair of born/survive neighbor-count sets.
///
/// Two rule sets are equal iff their sets are equal; insertion order is
/// irrelevant. The canonical text form is `B<digits>/S<digits>` with the
/// digits sorted, e.g. `B3/S23` for Conway's Life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    born: BTreeSet<u8>,
    survive: BTreeSet<u8>,
}

impl RuleSet {
    /// Create a rule set, rejecting any neighbor count above
    /// [`MAX_NEIGHBORS`].
    pub fn new<B, S>(born: B, survive: S) -> Result<Self, EngineError>
    where
        B: IntoIterator<Item = u8>,
        S: IntoIterator<Item = u8>,
    {
        let born: BTreeSet<u8> = born.into_iter().collect();
        let survive: BTreeSet<u8> = survive.into_iter().collect();
        if let Some(&count) = born.iter().chain(&survive).find(|&&c| c > MAX_NEIGHBORS) {
            return Err(EngineError::InvalidNeighborCount(count));
        }
        Ok(Self { born, survive })
    }

    /// Build from counts already known to be in range (template catalog).
    pub(crate) fn from_valid(born: &[u8], survive: &[u8]) -> Self {
        debug_assert!(born.iter().chain(survive).all(|&c| c <= MAX_NEIGHBORS));
        Self {
            born: born.iter().copied().collect(),
            survive: survive.iter().copied().collect(),
        }
    }

    pub fn born(&self) -> &BTreeSet<u8> {
        &self.born
    }

    pub fn survive(&self) -> &BTreeSet<u8> {
        &self.survive
    }

    /// A copy with `count` toggled in or out of the born set; the
    /// original is unchanged.
    pub fn with_born(&self, count: u8, enabled: bool) -> Result<Self, EngineError> {
        Self::check_count(count)?;
        let mut born = self.born.clone();
        if enabled {
            born.insert(count);
        } else {
            born.remove(&count);
        }
        Ok(Self {
            born,
            survive: self.survive.clone(),
        })
    }

    /// A copy with `count` toggled in or out of the survive set; the
    /// original is unchanged.
    pub fn with_survive(&self, count: u8, enabled: bool) -> Result<Self, EngineError> {
        Self::check_count(count)?;
        let mut survive = self.survive.clone();
        if enabled {
            survive.insert(count);
        } else {
            survive.remove(&count);
        }
        Ok(Self {
            born: self.born.clone(),
            survive,
        })
    }

    fn check_count(count: u8) -> Result<(), EngineError> {
        if count > MAX_NEIGHBORS {
            return Err(EngineError::InvalidNeighborCount(count));
        }
        Ok(())
    }

    /// Compute the next generation from one consistent snapshot.
    ///
    /// Every cell's neighbor count is taken against `current`, never
    /// against an already-updated cell (synchronous update semantics).
    pub fn next_state(&self, current: &Grid) -> Grid {
        let width = current.width();
        let height = current.height();

        let cells: Vec<Cell> = (0..height)
            .into_par_iter()
            .flat_map(|row| {
                (0..width).into_par_iter().map(move |col| {
                    let neighbors = current.count_alive_neighbors(row as i64, col as i64);
                    self.transition(current.cell(row as i64, col as i64), neighbors)
                })
            })
            .collect();

        Grid::from_parts(width, height, cells)
    }

    /// Transition policy for one cell. Immortal cells never die but
    /// otherwise follow the same rules; age increments only for cells
    /// that remain alive.
    fn transition(&self, mut cell: Cell, neighbors: u8) -> Cell {
        if cell.is_alive() {
            if self.survive.contains(&neighbors) || cell.is_immortal() {
                cell.add_year();
            } else {
                cell.set_alive(false);
            }
        } else if self.born.contains(&neighbors) {
            cell.set_alive(true);
        }
        cell
    }
}

impl Default for RuleSet {
    /// Conway's Life, `B3/S23`.
    fn default() -> Self {
        Self::from_valid(&[3], &[2, 3])
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.born.iter().format(""),
            self.survive.iter().format("")
        )
    }
}

impl FromStr for RuleSet {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn digits(part: &str, tag: char) -> Option<BTreeSet<u8>> {
            let rest = part
                .strip_prefix(tag)
                .or_else(|| part.strip_prefix(tag.to_ascii_lowercase()))?;
            rest.chars()
                .map(|ch| {
                    ch.to_digit(10)
                        .map(|d| d as u8)
                        .filter(|&d| d <= MAX_NEIGHBORS)
                })
                .collect()
        }

        let malformed = || EngineError::InvalidRuleString(s.to_string());
        let (born_part, survive_part) = s.trim().split_once('/').ok_or_else(malformed)?;
        let born = digits(born_part, 'B').ok_or_else(malformed)?;
        let survive = digits(survive_part, 'S').ok_or_else(malformed)?;
        Ok(Self { born, survive })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conway() -> RuleSet {
        RuleSet::default()
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid::new(6, 6).unwrap();
        assert!(conway().next_state(&grid).is_empty());
    }

    #[test]
    fn test_block_is_still_life() {
        let block = Grid::from_rows(&[
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ])
        .unwrap();
        assert_eq!(conway().next_state(&block), block);
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let horizontal = Grid::from_rows(&[
            vec![false, false, false, false, false],
            vec![false, false, false, false, false],
            vec![false, true, true, true, false],
            vec![false, false, false, false, false],
            vec![false, false, false, false, false],
        ])
        .unwrap();
        let vertical = Grid::from_rows(&[
            vec![false, false, false, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, true, false, false],
            vec![false, false, false, false, false],
        ])
        .unwrap();

        let rules = conway();
        let once = rules.next_state(&horizontal);
        assert_eq!(once, vertical);
        assert_eq!(rules.next_state(&once), horizontal);
    }

    #[test]
    fn test_birth_across_toroidal_seam() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(0, 0, true);
        grid.set(0, 3, true);
        grid.set(3, 0, true);

        // (3, 3) touches all three live corners through the wrap.
        let next = conway().next_state(&grid);
        assert!(next.get(3, 3));
    }

    #[test]
    fn test_seeds_rule() {
        let seeds = RuleSet::new([2], []).unwrap();
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(1, 1, true);
        grid.set(1, 2, true);

        let next = seeds.next_state(&grid);
        assert!(!next.get(1, 1), "live cells always die under B2/S");
        assert!(!next.get(1, 2));
        assert!(next.get(0, 1), "dead cell with two neighbors is born");
        assert!(next.get(2, 2));
    }

    #[test]
    fn test_survivors_age_and_births_start_at_zero() {
        let blinker = Grid::from_rows(&[
            vec![false, false, false, false, false],
            vec![false, false, false, false, false],
            vec![false, true, true, true, false],
            vec![false, false, false, false, false],
            vec![false, false, false, false, false],
        ])
        .unwrap();

        let next = conway().next_state(&blinker);
        assert_eq!(next.cell(2, 2).age(), 1, "the pivot survives and ages");
        assert_eq!(next.cell(1, 2).age(), 0, "newly born cells start at zero");
        assert_eq!(next.cell(2, 1).age(), 0, "dead cells carry no age");
    }

    #[test]
    fn test_immortal_cell_survives_hostile_rules() {
        let everything_dies = RuleSet::new([], []).unwrap();
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, true);
        grid.set_immortal(1, 1, true);

        let next = everything_dies.next_state(&grid);
        assert!(next.get(1, 1));
        assert_eq!(next.cell(1, 1).age(), 1, "immortal survivors still age");
    }

    #[test]
    fn test_with_born_is_functional() {
        let original = conway();
        let modified = original.with_born(6, true).unwrap();
        assert!(modified.born().contains(&6));
        assert!(!original.born().contains(&6), "original is unchanged");

        let removed = modified.with_born(6, false).unwrap();
        assert_eq!(removed, original);
    }

    #[test]
    fn test_with_survive_is_functional() {
        let original = conway();
        let modified = original.with_survive(2, false).unwrap();
        assert!(!modified.survive().contains(&2));
        assert!(original.survive().contains(&2));
    }

    #[test]
    fn test_out_of_range_counts_rejected() {
        assert_eq!(
            RuleSet::new([9], []),
            Err(EngineError::InvalidNeighborCount(9))
        );
        assert!(conway().with_born(9, true).is_err());
        assert!(conway().with_survive(255, false).is_err());
    }

    #[test]
    fn test_equality_is_set_based() {
        let a = RuleSet::new([3, 6, 3], [3, 2]).unwrap();
        let b = RuleSet::new([6, 3], [2, 3]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, conway());
    }

    #[test]
    fn test_canonical_string() {
        assert_eq!(conway().to_string(), "B3/S23");
        assert_eq!(RuleSet::new([2], []).unwrap().to_string(), "B2/S");
        assert_eq!(
            RuleSet::new([6, 3], [3, 2]).unwrap().to_string(),
            "B36/S23"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        for text in ["B3/S23", "B2/S", "B36/S23", "B34/S34"] {
            let rules: RuleSet = text.parse().unwrap();
            assert_eq!(rules.to_string(), text);
        }
        let lower: RuleSet = "b3/s23".parse().unwrap();
        assert_eq!(lower, conway());
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for text in ["B3S23", "3/23", "B9/S2", "B3/S2x", "", "B3"] {
            assert!(
                text.parse::<RuleSet>().is_err(),
                "{:?} should not parse",
                text
            );
        }
    }
}
