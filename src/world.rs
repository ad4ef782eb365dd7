use crate::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    black: bool,
}

impl Tile {
    pub fn black() -> Self {
        Self { black: true }
    }

    pub fn white() -> Self {
        Self { black: false }
    }

    pub fn is_black(&self) -> bool {
        self.black
    }
}

/// Sparse storage for the black tiles of an unbounded floor.
/// Any coordinate not stored is white.
pub trait World: Default + Clone + Send + Sync + 'static {
    fn get(&self, pos: Coord) -> Tile;
    fn set(&mut self, pos: Coord, tile: Tile);
    fn blacks(&self) -> Vec<Coord>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, pos: Coord) -> bool {
        self.get(pos).is_black()
    }

    fn flip(&mut self, pos: Coord) {
        let tile = if self.contains(pos) {
            Tile::white()
        } else {
            Tile::black()
        };
        self.set(pos, tile)
    }
}

pub use hashed_world::HashedWorld;
mod hashed_world;
