use crate::{Direction, Grid, Tile, GRID_SIZE};

impl quickcheck::Arbitrary for Tile {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Empty cells are overrepresented, and values stay small enough that
        // equal neighbours are common.
        let value = *g
            .choose(&[0, 0, 0, 0, 2, 2, 4, 4, 8, 16, 32, 64, 128, 256, 512, 1024])
            .unwrap();
        Tile::new(value).unwrap()
    }
}

impl quickcheck::Arbitrary for Grid {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut grid = Grid::default();
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                grid.set(i, j, Tile::arbitrary(g));
            }
        }
        grid
    }
}

impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
