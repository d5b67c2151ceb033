/// A single cell of the 2048 grid.
///
/// The value is always 0 (empty) or a power of two ≥ 2.  Tiles are plain
/// values: a merge produces a new tile rather than mutating an existing one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tile {
    value: u32,
}

impl Tile {
    /// The empty cell.
    pub const EMPTY: Tile = Tile { value: 0 };
    /// The common spawn.
    pub const TWO: Tile = Tile { value: 2 };
    /// The rare spawn.
    pub const FOUR: Tile = Tile { value: 4 };
    /// Largest tile a 4×4 board can build (a 4 spawn cascading through all
    /// sixteen cells).
    pub const MAX_VALUE: u32 = 1 << 17;

    /// Build a tile from a raw value, rejecting anything that is neither 0
    /// nor a power of two in `2..=MAX_VALUE`.
    pub fn from_value(value: u32) -> Option<Tile> {
        if value == 0 || ((2..=Tile::MAX_VALUE).contains(&value) && value.is_power_of_two()) {
            Some(Tile { value })
        } else {
            None
        }
    }

    pub fn value(self) -> u32 {
        self.value
    }

    pub fn is_empty(self) -> bool {
        self.value == 0
    }

    /// Value equality.  Two empty tiles compare equal, which is what the
    /// empty-cell search relies on; merges go through [`Tile::can_combine`].
    pub fn equals(a: Tile, b: Tile) -> bool {
        a.value == b.value
    }

    /// Whether `a` and `b` may merge: both occupied and of the same value.
    pub fn can_combine(a: Tile, b: Tile) -> bool {
        !a.is_empty() && a.value == b.value
    }

    /// Merge two equal tiles into one of double the value.
    ///
    /// Callers must check [`Tile::can_combine`] first.
    pub fn combine(a: Tile, b: Tile) -> Tile {
        debug_assert!(
            Tile::can_combine(a, b),
            "combine({}, {}) on tiles that cannot merge",
            a.value,
            b.value
        );
        Tile {
            value: a.value.saturating_mul(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_doubles_value() {
        let merged = Tile::combine(Tile::FOUR, Tile::FOUR);
        assert_eq!(merged.value(), 8);
    }

    #[test]
    fn empty_tiles_are_equal_but_never_combine() {
        assert!(Tile::equals(Tile::EMPTY, Tile::EMPTY));
        assert!(!Tile::can_combine(Tile::EMPTY, Tile::EMPTY));
        assert!(!Tile::can_combine(Tile::TWO, Tile::FOUR));
        assert!(Tile::can_combine(Tile::TWO, Tile::TWO));
    }

    #[test]
    fn from_value_enforces_powers_of_two() {
        assert!(Tile::from_value(0).is_some());
        assert!(Tile::from_value(2048).is_some());
        assert!(Tile::from_value(1).is_none());
        assert!(Tile::from_value(6).is_none());
        assert!(Tile::from_value(Tile::MAX_VALUE).is_some());
        assert!(Tile::from_value(Tile::MAX_VALUE * 2).is_none());
        assert!(Tile::from_value(1 << 31).is_none());
    }
}
