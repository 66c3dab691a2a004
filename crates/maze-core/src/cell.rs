//! The [`Cell`] type: walls, terrain and transient search flags.

use std::ops::{BitAnd, BitOr};

use crate::geom::Pos;

// ---------------------------------------------------------------------------
// TerrainType
// ---------------------------------------------------------------------------

/// Terrain category of a cell. The weight is the cost of *entering* it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainType {
    #[default]
    Stone,
    Grass,
    Sand,
    Lava,
}

impl TerrainType {
    /// All categories, cheapest first.
    pub const ALL: [TerrainType; 4] = [Self::Stone, Self::Grass, Self::Sand, Self::Lava];

    /// Cost of entering a cell of this type.
    #[inline]
    pub const fn weight(self) -> i32 {
        match self {
            Self::Stone => 0,
            Self::Grass => 1,
            Self::Sand => 5,
            Self::Lava => 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Side / Walls
// ---------------------------------------------------------------------------

/// One of the four sides of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side facing this one across a shared wall.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Side of `from` that faces the adjacent cell `to`, or `None` if the two
    /// are not orthogonal neighbours.
    pub fn between(from: Pos, to: Pos) -> Option<Self> {
        match (to.row - from.row, to.col - from.col) {
            (-1, 0) => Some(Self::Top),
            (0, 1) => Some(Self::Right),
            (1, 0) => Some(Self::Bottom),
            (0, -1) => Some(Self::Left),
            _ => None,
        }
    }

    /// Position of the neighbour across this side.
    #[inline]
    pub const fn step(self, p: Pos) -> Pos {
        match self {
            Self::Top => p.shift(-1, 0),
            Self::Right => p.shift(0, 1),
            Self::Bottom => p.shift(1, 0),
            Self::Left => p.shift(0, -1),
        }
    }

    #[inline]
    const fn mask(self) -> Walls {
        match self {
            Self::Top => Walls::TOP,
            Self::Right => Walls::RIGHT,
            Self::Bottom => Walls::BOTTOM,
            Self::Left => Walls::LEFT,
        }
    }
}

/// Bitmask of the walls still standing around a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls(pub u8);

impl Walls {
    pub const TOP: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const BOTTOM: Self = Self(1 << 2);
    pub const LEFT: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the wall on `side` is present.
    #[inline]
    pub const fn has(self, side: Side) -> bool {
        self.contains(side.mask())
    }

    /// Return a copy with the wall on `side` removed.
    #[inline]
    pub const fn without(self, side: Side) -> Self {
        Self(self.0 & !side.mask().0)
    }

    /// Number of walls standing.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for Walls {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Walls {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single maze cell.
///
/// Walls are private: they only change through [`Maze`](crate::Maze) so that
/// both sides of a shared wall are always updated together.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Pos,
    pub(crate) walls: Walls,
    pub terrain: TerrainType,
    /// Expanded by the current search run.
    pub visited: bool,
    /// Part of the current solution path.
    pub on_path: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl Cell {
    /// A fresh cell: all four walls, stone terrain, no flags.
    pub const fn new(pos: Pos) -> Self {
        Self {
            pos,
            walls: Walls::ALL,
            terrain: TerrainType::Stone,
            visited: false,
            on_path: false,
            is_start: false,
            is_end: false,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub const fn has_wall(&self, side: Side) -> bool {
        self.walls.has(side)
    }

    /// Cost of entering this cell.
    #[inline]
    pub const fn weight(&self) -> i32 {
        self.terrain.weight()
    }
}
