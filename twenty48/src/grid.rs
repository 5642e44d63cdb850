use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Direction, InvalidTile, Tile};

pub const GRID_SIZE: usize = 4;

/// Probability that a spawned tile is a 2 rather than a 4.
const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// A single row (or, after rotating, column) of the grid.
pub type Line = [Tile; GRID_SIZE];

/// The 4x4 playing surface, in row-major order.
///
/// The grid is [`Copy`], so every saved grid is an independent snapshot.
///
/// Only sliding to the left is implemented directly. The other directions
/// rotate the grid clockwise so that they become a slide to the left, and
/// rotate it back afterwards. See [`Self::slide()`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: [Line; GRID_SIZE],
}

/// What happened while sliding a line or the whole grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Did any tile move or merge?
    pub changed: bool,
    /// Sum of the values of all tiles created by merging.
    pub points: u64,
    /// The largest tile created by merging, or empty if nothing merged.
    pub highest_merge: Tile,
}

impl SlideOutcome {
    fn absorb(&mut self, other: SlideOutcome) {
        self.changed |= other.changed;
        self.points += other.points;
        self.highest_merge = self.highest_merge.max(other.highest_merge);
    }
}

/// Shifts all non-empty tiles towards index 0, keeping their order.
///
/// Returns whether any tile changed its position.
pub fn compress(line: &mut Line) -> bool {
    let mut insert_pos = 0;
    let mut moved = false;
    for idx in 0..GRID_SIZE {
        let tile = line[idx];
        if tile.is_empty() {
            continue;
        }
        if idx != insert_pos {
            line[insert_pos] = tile;
            line[idx] = Tile::EMPTY;
            moved = true;
        }
        insert_pos += 1;
    }
    moved
}

/// Merges equal neighbours in a single pass from index 0 upwards.
///
/// The left tile of a pair is doubled and everything behind the pair moves
/// up by one slot. Scanning continues right after the merged tile, so a tile
/// created by a merge is never merged again in the same pass:
/// `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`.
///
/// Tiles of [`MAX_TILE_VALUE`](crate::MAX_TILE_VALUE) stay as they are.
///
/// Expects a compressed line.
pub fn merge(line: &mut Line) -> SlideOutcome {
    let mut outcome = SlideOutcome::default();
    for j in 0..GRID_SIZE - 1 {
        let tile = line[j];
        if !tile.can_merge() || tile != line[j + 1] {
            continue;
        }
        let merged = tile.doubled();
        line[j] = merged;
        line.copy_within(j + 2.., j + 1);
        line[GRID_SIZE - 1] = Tile::EMPTY;

        outcome.changed = true;
        outcome.points += u64::from(merged.value());
        outcome.highest_merge = outcome.highest_merge.max(merged);
    }
    outcome
}

impl Grid {
    /// Creates a grid from row-major tile values, `0` meaning empty.
    pub fn from_values(values: [[u32; GRID_SIZE]; GRID_SIZE]) -> Result<Self, InvalidTile> {
        let mut grid = Grid::default();
        for (i, row) in values.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                grid.rows[i][j] =
                    Tile::new(value).map_err(|_| InvalidTile::AtPosition { i, j, value })?;
            }
        }
        Ok(grid)
    }

    /// Row-major tile values, `0` meaning empty.
    pub fn values(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        self.rows.map(|row| row.map(Tile::value))
    }

    pub fn rows(&self) -> &[Line; GRID_SIZE] {
        &self.rows
    }

    pub fn get(&self, i: usize, j: usize) -> Tile {
        self.rows[i][j]
    }

    pub fn set(&mut self, i: usize, j: usize, tile: Tile) {
        self.rows[i][j] = tile;
    }

    /// Coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for (i, row) in self.rows.iter().enumerate() {
            for (j, tile) in row.iter().enumerate() {
                if tile.is_empty() {
                    cells.push((i, j));
                }
            }
        }
        cells
    }

    pub fn num_empty(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|tile| tile.is_empty())
            .count()
    }

    /// The largest tile currently on the grid.
    pub fn max_tile(&self) -> Tile {
        self.rows.iter().flatten().copied().max().unwrap_or_default()
    }

    /// Is there an empty cell, or two equal mergeable tiles next to each other?
    ///
    /// If not, no direction can change the grid and the game is lost.
    pub fn can_move(&self) -> bool {
        if self.num_empty() > 0 {
            return true;
        }
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                let tile = self.rows[i][j];
                if !tile.can_merge() {
                    continue;
                }
                if (j + 1 < GRID_SIZE && tile == self.rows[i][j + 1])
                    || (i + 1 < GRID_SIZE && tile == self.rows[i + 1][j])
                {
                    return true;
                }
            }
        }
        false
    }

    /// The grid turned by 90 degrees clockwise.
    #[must_use]
    pub fn rotate_clockwise(&self) -> Grid {
        let mut rotated = Grid::default();
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                rotated.rows[i][j] = self.rows[GRID_SIZE - 1 - j][i];
            }
        }
        rotated
    }

    /// Compresses and merges every row towards column 0.
    pub fn slide_left(&mut self) -> SlideOutcome {
        let mut outcome = SlideOutcome::default();
        for row in self.rows.iter_mut() {
            let moved = compress(row);
            let mut row_outcome = merge(row);
            row_outcome.changed |= moved;
            outcome.absorb(row_outcome);
        }
        outcome
    }

    /// Slides all tiles in the given direction.
    ///
    /// This does not spawn a new tile, that is up to the caller.
    pub fn slide(&mut self, direction: Direction) -> SlideOutcome {
        let (before, after) = direction.quarter_turns();
        self.rotate_in_place(before);
        let outcome = self.slide_left();
        self.rotate_in_place(after);
        outcome
    }

    /// Puts a 2 (90%) or a 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns where the tile was placed, or `None` if the grid is full.
    pub fn spawn_tile(&mut self, rng: &mut StdRng) -> Option<(usize, usize, Tile)> {
        let &(i, j) = self.empty_cells().choose(rng)?;
        let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) {
            2
        } else {
            4
        };
        let tile = Tile::new(value).ok()?;
        self.rows[i][j] = tile;
        Some((i, j, tile))
    }

    fn rotate_in_place(&mut self, quarter_turns: usize) {
        for _ in 0..quarter_turns {
            *self = self.rotate_clockwise();
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{:>6}", tile.to_string())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::SeedableRng;

    use super::*;
    use crate::tile;

    fn line(values: [u32; GRID_SIZE]) -> Line {
        values.map(|v| tile!(v))
    }

    fn grid(values: [[u32; GRID_SIZE]; GRID_SIZE]) -> Grid {
        Grid::from_values(values).unwrap()
    }

    fn mirrored(grid: &Grid) -> Grid {
        let mut rows = *grid.rows();
        for row in rows.iter_mut() {
            row.reverse();
        }
        Grid { rows }
    }

    fn sorted_values(line: &Line) -> Vec<u32> {
        let mut values: Vec<u32> = line.iter().map(|t| t.value()).filter(|&v| v != 0).collect();
        values.sort_unstable();
        values
    }

    quickcheck! {
        fn compress_keeps_values_and_is_idempotent(grid: Grid) -> bool {
            grid.rows().iter().all(|&original| {
                let mut row = original;
                compress(&mut row);
                let first_pass = row;
                let moved_again = compress(&mut row);
                sorted_values(&original) == sorted_values(&row)
                    && !moved_again
                    && row == first_pass
            })
        }

        fn right_is_left_seen_through_rotation(grid: Grid) -> bool {
            let mut left = grid;
            let left_outcome = left.slide(Direction::Left);

            let mut right = grid.rotate_clockwise().rotate_clockwise();
            let right_outcome = right.slide(Direction::Right);

            let mut right_of_mirror = mirrored(&grid);
            right_of_mirror.slide(Direction::Right);

            right == left.rotate_clockwise().rotate_clockwise()
                && right_of_mirror == mirrored(&left)
                && left_outcome == right_outcome
        }

        fn four_rotations_are_identity(grid: Grid) -> bool {
            let mut rotated = grid;
            rotated.rotate_in_place(4);
            rotated == grid
        }

        fn can_move_iff_some_direction_changes_grid(grid: Grid) -> bool {
            if grid.num_empty() == GRID_SIZE * GRID_SIZE {
                // Nothing to slide on a blank grid
                return true;
            }
            let any_change = Direction::ALL.iter().any(|&d| {
                let mut g = grid;
                g.slide(d).changed
            });
            grid.can_move() == any_change
        }
    }

    #[test]
    fn compress_shifts_towards_start() {
        let mut row = line([0, 2, 0, 4]);
        assert!(compress(&mut row));
        assert_eq!(row, line([2, 4, 0, 0]));
        assert!(!compress(&mut row));
    }

    #[test]
    fn merge_two_pairs() {
        let mut row = line([2, 2, 4, 4]);
        let outcome = merge(&mut row);
        assert_eq!(row, line([4, 8, 0, 0]));
        assert_eq!(outcome.points, 12);
        assert_eq!(outcome.highest_merge, tile!(8));
        assert!(outcome.changed);
    }

    #[test]
    fn merged_tiles_do_not_merge_again() {
        let mut row = line([2, 2, 2, 2]);
        let outcome = merge(&mut row);
        assert_eq!(row, line([4, 4, 0, 0]));
        assert_eq!(outcome.points, 8);

        let mut row = line([4, 4, 8, 0]);
        merge(&mut row);
        assert_eq!(row, line([8, 8, 0, 0]));
    }

    #[test]
    fn merge_in_the_middle() {
        let mut row = line([2, 4, 4, 2]);
        let outcome = merge(&mut row);
        assert_eq!(row, line([2, 8, 2, 0]));
        assert_eq!(outcome.points, 8);
    }

    #[test]
    fn no_merge_without_equal_neighbours() {
        let mut row = line([2, 4, 2, 4]);
        assert_eq!(merge(&mut row), SlideOutcome::default());
        assert_eq!(row, line([2, 4, 2, 4]));
    }

    #[test]
    fn merging_stops_at_the_largest_tile() {
        use crate::MAX_TILE_VALUE;

        let mut row = line([MAX_TILE_VALUE / 2, MAX_TILE_VALUE / 2, 0, 0]);
        let outcome = merge(&mut row);
        assert_eq!(row, line([MAX_TILE_VALUE, 0, 0, 0]));
        assert_eq!(outcome.highest_merge, tile!(MAX_TILE_VALUE));

        let mut row = line([MAX_TILE_VALUE, MAX_TILE_VALUE, 2, 2]);
        let outcome = merge(&mut row);
        assert_eq!(row, line([MAX_TILE_VALUE, MAX_TILE_VALUE, 4, 0]));
        assert_eq!(outcome.points, 4);

        let full = grid([[MAX_TILE_VALUE; GRID_SIZE]; GRID_SIZE]);
        assert!(!full.can_move());
        for direction in Direction::ALL {
            let mut g = full;
            assert_eq!(g.slide(direction), SlideOutcome::default());
            assert_eq!(g, full);
        }
        let json = serde_json::to_string(&full).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), full);
    }

    #[test]
    fn points_of_a_full_grid_of_large_merges() {
        let half = crate::MAX_TILE_VALUE / 2;
        let mut g = grid([[half; GRID_SIZE]; GRID_SIZE]);
        let outcome = g.slide(Direction::Left);
        // Two merges per row, each worth the largest tile
        assert_eq!(outcome.points, 8 * u64::from(crate::MAX_TILE_VALUE));
    }

    #[test]
    fn rotation_maps_cells() {
        let g = grid([[1, 2, 4, 8], [0, 0, 0, 0], [0, 0, 0, 0], [16, 0, 0, 32]]);
        let rotated = g.rotate_clockwise();
        assert_eq!(
            rotated.values(),
            [[16, 0, 0, 1], [0, 0, 0, 2], [0, 0, 0, 4], [32, 0, 0, 8]]
        );
    }

    #[test]
    fn slide_in_every_direction() {
        let start = grid([[2, 0, 0, 2], [0, 4, 0, 0], [0, 4, 0, 0], [0, 0, 0, 8]]);

        let mut g = start;
        assert!(g.slide(Direction::Left).changed);
        assert_eq!(g.values(), [[4, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0]]);

        let mut g = start;
        assert!(g.slide(Direction::Right).changed);
        assert_eq!(g.values(), [[0, 0, 0, 4], [0, 0, 0, 4], [0, 0, 0, 4], [0, 0, 0, 8]]);

        let mut g = start;
        let outcome = g.slide(Direction::Up);
        assert_eq!(g.values(), [[2, 8, 0, 2], [0, 0, 0, 8], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(outcome.points, 8);

        let mut g = start;
        g.slide(Direction::Down);
        assert_eq!(g.values(), [[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2], [2, 8, 0, 8]]);
    }

    #[test]
    fn change_in_any_row_counts() {
        // Only the first row can change; the last one is already packed.
        let mut g = grid([[0, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 4, 8, 16]]);
        assert!(g.slide(Direction::Left).changed);
    }

    #[test]
    fn full_grid_without_equal_neighbours_is_stuck() {
        let stuck = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!stuck.can_move());
        for direction in Direction::ALL {
            let mut g = stuck;
            assert!(!g.slide(direction).changed);
            assert_eq!(g, stuck);
        }

        let horizontal_pair = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]]);
        assert!(horizontal_pair.can_move());

        let vertical_pair = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [4, 2, 4, 8]]);
        assert!(vertical_pair.can_move());

        let one_hole = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        assert!(one_hole.can_move());
    }

    #[test]
    fn spawn_fills_an_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        let (i, j, tile) = g.spawn_tile(&mut rng).unwrap();
        assert_eq!((i, j), (2, 2));
        assert!(tile == tile!(2) || tile == tile!(4));
        assert_eq!(g.num_empty(), 0);
        assert_eq!(g.spawn_tile(&mut rng), None);
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            Grid::from_values([[0, 0, 0, 0], [0, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            Err(InvalidTile::AtPosition { i: 1, j: 1, value: 3 })
        );
    }

    #[test]
    fn serializes_as_nested_values() {
        let g = grid([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 4, 0], [0, 0, 0, 0]]);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,4,0],[0,0,0,0]]");
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), g);
    }
}
