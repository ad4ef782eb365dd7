use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// A tile position in doubled axial coordinates.
///
/// Every real move changes `x` by one or two and `y` by zero or two, so the
/// origin is only ever reached as a sum, never as a single step.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

#[macro_export]
macro_rules! coord {
    ($x:expr, $y:expr) => {
        $crate::Coord { x: $x, y: $y }
    };
}

impl Coord {
    pub const ORIGIN: Coord = coord!(0, 0);

    /// the `(0, 0)` sentinel closing a line in a step stream.
    pub fn is_terminator(&self) -> bool {
        *self == Self::ORIGIN
    }

    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        Direction::ALL.into_iter().map(move |d| self + d.delta())
    }
}

impl Add for Coord {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        coord!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl From<[i64; 2]> for Coord {
    fn from([x, y]: [i64; 2]) -> Self {
        coord!(x, y)
    }
}

impl From<Coord> for [i64; 2] {
    fn from(Coord { x, y }: Coord) -> Self {
        [x, y]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
    NorthEast,
    SouthWest,
    NorthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::NorthWest,
        Direction::SouthEast,
    ];

    pub fn delta(self) -> Coord {
        match self {
            Direction::East => coord!(2, 0),
            Direction::West => coord!(-2, 0),
            Direction::NorthEast => coord!(1, 2),
            Direction::SouthWest => coord!(-1, -2),
            Direction::NorthWest => coord!(-1, 2),
            Direction::SouthEast => coord!(1, -2),
        }
    }
}

#[test]
fn test_opposite_directions_cancel() {
    use Direction::*;
    for (a, b) in [(East, West), (NorthEast, SouthWest), (NorthWest, SouthEast)] {
        assert_eq!(a.delta() + b.delta(), Coord::ORIGIN);
    }
}

#[test]
fn test_no_direction_is_terminator() {
    assert!(Direction::ALL.iter().all(|d| !d.delta().is_terminator()));
    assert!(coord!(0, 0).is_terminator());
}

#[test]
fn test_neighbors_are_distinct() {
    let origin = coord!(3, -2);
    let mut neighbors: Vec<_> = origin.neighbors().collect();
    neighbors.sort_by_key(|c| (c.x, c.y));
    neighbors.dedup();
    assert_eq!(neighbors.len(), 6);
    assert!(!neighbors.contains(&origin));
}

#[test]
fn test_serde_as_pair() {
    let parsed: Vec<Coord> = serde_json::from_str("[[2, 0], [0, 0], [-1, -2]]").unwrap();
    assert_eq!(parsed, vec![coord!(2, 0), coord!(0, 0), coord!(-1, -2)]);
    assert_eq!(serde_json::to_string(&coord!(1, -2)).unwrap(), "[1,-2]");
}
