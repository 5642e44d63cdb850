/// The error type for constructing a [`Tile`](crate::Tile) from a raw value,
/// and therefore also for building a [`Grid`](crate::Grid) from raw values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidTile {
    NotPowerOfTwo { value: u32 },
    TooLarge { value: u32 },
    /// Only produced by [`Grid::from_values()`](crate::Grid::from_values), to say where the bad value was.
    AtPosition { i: usize, j: usize, value: u32 },
}

impl std::error::Error for InvalidTile {}

impl std::fmt::Display for InvalidTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTile::NotPowerOfTwo { value } => {
                write!(f, "Tile value {} is neither 0 nor a power of two", value)
            }
            InvalidTile::TooLarge { value } => write!(
                f,
                "Tile value {} is too large, the maximum is {}",
                value,
                crate::MAX_TILE_VALUE
            ),
            InvalidTile::AtPosition { i, j, value } => write!(
                f,
                "Invalid tile value {} at row {}, column {}",
                value, i, j
            ),
        }
    }
}
