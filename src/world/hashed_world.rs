use std::collections::HashSet;

use metrohash::MetroBuildHasher;

use crate::{Coord, Tile, World};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashedWorld {
    blacks: HashSet<Coord, MetroBuildHasher>,
}

impl HashedWorld {
    pub fn with_capacity(capacity: usize) -> Self {
        let blacks = HashSet::with_capacity_and_hasher(capacity, MetroBuildHasher::default());
        Self { blacks }
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.blacks.iter().copied()
    }
}

impl World for HashedWorld {
    fn get(&self, pos: Coord) -> Tile {
        if self.blacks.contains(&pos) {
            Tile::black()
        } else {
            Tile::white()
        }
    }

    fn set(&mut self, pos: Coord, tile: Tile) {
        if tile.is_black() {
            self.blacks.insert(pos);
        } else {
            self.blacks.remove(&pos);
        }
    }

    fn blacks(&self) -> Vec<Coord> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.blacks.len()
    }

    fn contains(&self, pos: Coord) -> bool {
        self.blacks.contains(&pos)
    }
}

impl FromIterator<Coord> for HashedWorld {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        let mut world = HashedWorld::default();
        world.extend(iter);
        world
    }
}

impl Extend<Coord> for HashedWorld {
    fn extend<T: IntoIterator<Item = Coord>>(&mut self, iter: T) {
        self.blacks.extend(iter)
    }
}

#[test]
fn test_set_is_idempotent() {
    let mut world = HashedWorld::default();
    world.set(crate::coord!(2, 0), Tile::black());
    world.set(crate::coord!(2, 0), Tile::black());
    assert_eq!(world.len(), 1);
    world.set(crate::coord!(2, 0), Tile::white());
    assert!(world.is_empty());
}

#[test]
fn test_flip_toggles() {
    let mut world = HashedWorld::default();
    let pos = crate::coord!(-1, 2);
    world.flip(pos);
    assert!(world.contains(pos));
    world.flip(pos);
    assert!(!world.contains(pos));
    assert_eq!(world.get(pos), Tile::white());
}

#[test]
fn test_white_removal_of_absent_is_noop() {
    let mut world: HashedWorld = [crate::coord!(1, 2)].into_iter().collect();
    world.set(crate::coord!(5, 5), Tile::white());
    assert_eq!(world.blacks(), vec![crate::coord!(1, 2)]);
}
