use serde::{Deserialize, Serialize};

use crate::InvalidTile;

/// The largest tile a 4×4 grid can ever hold.
///
/// Tiles of this value exist but never merge, so a merge can not create
/// anything larger.
pub const MAX_TILE_VALUE: u32 = 1 << 17;

/// The value of a single cell: empty, or a positive power of two.
///
/// Tiles have no identity beyond their value, they are copied around freely.
/// In JSON, a tile is just its number, with `0` for an empty cell.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Tile(pub(crate) u32);

impl Tile {
    pub const EMPTY: Tile = Tile(0);

    /// Creates a tile, checking that the value is `0` or a power of two.
    pub fn new(value: u32) -> Result<Self, InvalidTile> {
        if value == 0 {
            Ok(Self::EMPTY)
        } else if !value.is_power_of_two() {
            Err(InvalidTile::NotPowerOfTwo { value })
        } else if value > MAX_TILE_VALUE {
            Err(InvalidTile::TooLarge { value })
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Can two tiles of this value merge into a larger one?
    pub(crate) fn can_merge(self) -> bool {
        !self.is_empty() && self.0 < MAX_TILE_VALUE
    }

    /// The tile produced by merging two tiles of this value.
    pub(crate) fn doubled(self) -> Self {
        debug_assert!(self.can_merge());
        Self(self.0 * 2)
    }
}

impl TryFrom<u32> for Tile {
    type Error = InvalidTile;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Tile::new(value)
    }
}

impl From<Tile> for u32 {
    fn from(tile: Tile) -> u32 {
        tile.0
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Shorthand for creating tiles in tests and doc examples.
///
/// ```
/// # use twenty48::{tile, Tile};
/// assert_eq!(tile!(8).value(), 8);
/// assert_eq!(tile!(0), Tile::EMPTY);
/// ```
#[macro_export]
macro_rules! tile {
    ($v:expr) => {
        $crate::Tile::new($v).expect("Invalid tile value given to tile! macro")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_empty_and_powers_of_two() {
        assert_eq!(Tile::new(0), Ok(Tile::EMPTY));
        assert_eq!(Tile::new(2048).map(Tile::value), Ok(2048));
        assert_eq!(Tile::new(MAX_TILE_VALUE).map(Tile::value), Ok(MAX_TILE_VALUE));
    }

    #[test]
    fn rejects_other_values() {
        assert_eq!(Tile::new(6), Err(InvalidTile::NotPowerOfTwo { value: 6 }));
        assert_eq!(
            Tile::new(MAX_TILE_VALUE * 2),
            Err(InvalidTile::TooLarge { value: MAX_TILE_VALUE * 2 })
        );
        assert_eq!(
            Tile::new(1 << 31),
            Err(InvalidTile::TooLarge { value: 1 << 31 })
        );
    }

    #[test]
    fn serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&tile!(16)).unwrap(), "16");
        assert_eq!(serde_json::from_str::<Tile>("0").unwrap(), Tile::EMPTY);
        assert!(serde_json::from_str::<Tile>("3").is_err());
    }

    #[test]
    fn doubling() {
        assert_eq!(tile!(2).doubled(), tile!(4));
        assert_eq!(tile!(1024).doubled(), tile!(2048));
        assert_eq!(tile!(MAX_TILE_VALUE / 2).doubled(), tile!(MAX_TILE_VALUE));
    }

    #[test]
    fn largest_tile_does_not_merge() {
        assert!(tile!(MAX_TILE_VALUE / 2).can_merge());
        assert!(!tile!(MAX_TILE_VALUE).can_merge());
        assert!(!Tile::EMPTY.can_merge());
    }
}
