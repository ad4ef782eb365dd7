use std::collections::HashSet;

use metrohash::MetroBuildHasher;
use rayon::prelude::*;
use slog::{debug, info, o, warn, Logger};

use crate::{decode, Coord, HashedWorld, SimConfig, Tile, World};
#[cfg(test)]
use crate::coord;

/// Candidates handed to one rayon task at a time.
const PARALLEL_CHUNK_SIZE: usize = 1024;

/// One generation of the floor. Never mutated once built.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct State<W>
where
    W: World,
{
    world: W,
}

impl<W> State<W>
where
    W: World,
{
    pub fn new(world: W) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn into_world(self) -> W {
        self.world
    }

    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    pub fn is_tile_black(&self, pos: Coord) -> bool {
        self.world.contains(pos)
    }

    /// Black tiles and their neighbors, each listed once.
    /// A white tile outside of this has no black neighbor and stays white.
    pub fn candidates(&self) -> Vec<Coord> {
        let blacks = self.world.blacks();
        let mut result: HashSet<Coord, MetroBuildHasher> =
            HashSet::with_capacity_and_hasher(blacks.len() * 7, MetroBuildHasher::default());
        for pos in blacks {
            result.insert(pos);
            result.extend(pos.neighbors());
        }
        result.into_iter().collect()
    }

    pub fn neighbor_count(&self, pos: Coord) -> usize {
        pos.neighbors()
            .filter(|&neighbor| self.is_tile_black(neighbor))
            .count()
    }

    pub fn next_tile(&self, pos: Coord) -> Tile {
        match (self.is_tile_black(pos), self.neighbor_count(pos)) {
            (true, count) if count == 0 || count > 2 => Tile::white(), // flips white
            (true, _) => Tile::black(),                                // stays
            (false, 2) => Tile::black(),                               // flips black
            _ => Tile::white(),                                        // stays white
        }
    }

    /// Builds the next generation on the current thread.
    pub fn step(&self) -> Self {
        self.evaluate(&self.candidates())
    }

    pub fn evaluate(&self, candidates: &[Coord]) -> Self {
        let mut world = W::default();
        for &pos in candidates {
            if self.next_tile(pos).is_black() {
                world.set(pos, Tile::black());
            }
        }
        Self { world }
    }

    /// Same as [`State::evaluate`], with candidates split across the current
    /// rayon pool. Every task only reads `self` and fills its own buffer.
    pub fn evaluate_parallel(&self, candidates: &[Coord]) -> Self {
        let blacks: Vec<Vec<Coord>> = candidates
            .par_chunks(PARALLEL_CHUNK_SIZE)
            .map(|chunk| {
                chunk
                    .iter()
                    .copied()
                    .filter(|&pos| self.next_tile(pos).is_black())
                    .collect()
            })
            .collect();

        let mut world = W::default();
        for pos in blacks.into_iter().flatten() {
            world.set(pos, Tile::black());
        }
        Self { world }
    }
}

#[derive(Debug)]
pub struct Sim {
    config: SimConfig,
    pool: Option<rayon::ThreadPool>,
    log: Logger,
}

impl Default for Sim {
    fn default() -> Self {
        let log = Logger::root(slog::Discard, o!());
        Self::new(SimConfig::default(), &log)
    }
}

impl Sim {
    pub fn new(config: SimConfig, parent_log: &Logger) -> Self {
        let log = parent_log.new(o!("component" => "sim"));
        let pool = config.thread_count.and_then(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|err| {
                    warn!(log, "using the global thread pool"; "threads" => threads, "error" => %err)
                })
                .ok()
        });
        Self { config, pool, log }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Runs `generations` steps of the flipping rule from `initial`.
    pub fn advance<W>(&self, initial: W, generations: usize) -> W
    where
        W: World,
    {
        if generations == 0 {
            return initial;
        }

        let mut current = State::new(initial);
        for generation in 1..=generations {
            let candidates = current.candidates();
            let parallel = candidates.len() >= self.config.parallel_threshold;
            let next = if parallel {
                self.install(|| current.evaluate_parallel(&candidates))
            } else {
                current.evaluate(&candidates)
            };
            debug!(self.log, "generation done";
                "generation" => generation,
                "candidates" => candidates.len(),
                "blacks" => next.len(),
                "parallel" => parallel
            );
            current = next;
        }

        info!(self.log, "simulation done"; "generations" => generations, "blacks" => current.len());
        current.into_world()
    }

    /// Counts the black tiles after decoding `steps`, and after running the
    /// configured number of generations when `run_simulation` is set.
    pub fn count_painted(
        &self,
        steps: impl IntoIterator<Item = Coord>,
        run_simulation: bool,
    ) -> usize {
        let floor: HashedWorld = decode(steps);
        info!(self.log, "floor decoded"; "blacks" => floor.len());
        if !run_simulation {
            return floor.len();
        }
        self.advance(floor, self.config.generations).len()
    }

    fn install<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

/// [`Sim::count_painted`] with the default configuration and no logging.
pub fn count_painted(steps: impl IntoIterator<Item = Coord>, run_simulation: bool) -> usize {
    Sim::default().count_painted(steps, run_simulation)
}

#[cfg(test)]
fn state(blacks: &[Coord]) -> State<HashedWorld> {
    State::new(blacks.iter().copied().collect())
}

#[test]
fn test_lonely_tile_turns_white() {
    let next = state(&[coord!(0, 0)]).step();
    assert!(next.is_empty());
}

#[test]
fn test_pair_grows_two_shared_neighbors() {
    let next = state(&[coord!(0, 0), coord!(2, 0)]).step();
    let expected = state(&[coord!(0, 0), coord!(2, 0), coord!(1, 2), coord!(1, -2)]);
    assert_eq!(next, expected);
}

#[test]
fn test_crowded_tile_turns_white() {
    let center = coord!(0, 0);
    let mut blacks: Vec<_> = center.neighbors().take(3).collect();
    blacks.push(center);
    let current = state(&blacks);
    assert_eq!(current.neighbor_count(center), 3);
    assert_eq!(current.next_tile(center), Tile::white());
}

#[test]
fn test_triangle_keeps_and_grows() {
    let current = state(&[coord!(0, 0), coord!(2, 0), coord!(1, 2)]);
    let next = current.step();
    assert_eq!(next.len(), 6);
    for pos in [coord!(0, 0), coord!(2, 0), coord!(1, 2)] {
        assert!(next.is_tile_black(pos));
    }
    for pos in [coord!(1, -2), coord!(-1, 2), coord!(3, 2)] {
        assert!(next.is_tile_black(pos));
    }
}

#[test]
fn test_candidates_are_unique() {
    let current = state(&[coord!(0, 0), coord!(2, 0)]);
    let candidates = current.candidates();
    let unique: HashSet<_> = candidates.iter().copied().collect();
    assert_eq!(candidates.len(), unique.len());
    assert_eq!(candidates.len(), 10);
}

#[test]
fn test_zero_generations_is_identity() {
    let world: HashedWorld = [coord!(0, 0)].into_iter().collect();
    let result = Sim::default().advance(world.clone(), 0);
    assert_eq!(result, world);
}

#[test]
fn test_parallel_matches_serial() {
    let current = state(&[coord!(0, 0), coord!(2, 0), coord!(1, 2), coord!(5, -2)]);
    let candidates = current.candidates();
    assert_eq!(current.evaluate(&candidates), current.evaluate_parallel(&candidates));
}

#[test]
fn test_far_tiles_past_i32_range() {
    let edge = i32::MAX as i64 - 1;
    let world: HashedWorld = [coord!(edge, 0), coord!(edge - 2, 0)].into_iter().collect();
    let result = Sim::default().advance(world, 1);
    let expected: HashedWorld = [
        coord!(edge, 0),
        coord!(edge - 2, 0),
        coord!(edge - 1, 2),
        coord!(edge - 1, -2),
    ]
    .into_iter()
    .collect();
    assert_eq!(result, expected);
    assert!(!result.contains(coord!(i32::MIN as i64, 0)));
}
