use crate::{Coord, World};
#[cfg(test)]
use crate::{coord, HashedWorld};

/// Gets the tile reached by each line of a step stream.
///
/// A line is closed by a `(0, 0)` terminator; trailing steps that are never
/// closed don't produce a tile.
pub fn lines(steps: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
    let mut result = vec![];
    let mut offset = Coord::ORIGIN;
    for step in steps {
        if step.is_terminator() {
            result.push(offset);
            offset = Coord::ORIGIN;
        } else {
            offset += step;
        }
    }
    result
}

/// Flips the tile reached by each line, starting from an all-white floor.
pub fn decode<W>(steps: impl IntoIterator<Item = Coord>) -> W
where
    W: World,
{
    let mut world = W::default();
    for tile in lines(steps) {
        world.flip(tile);
    }
    world
}

#[test]
fn test_empty_stream_is_all_white() {
    let world: HashedWorld = decode(Vec::new());
    assert!(world.is_empty());
}

#[test]
fn test_single_east_line() {
    let world: HashedWorld = decode([coord!(2, 0), coord!(0, 0)]);
    assert_eq!(world.blacks(), vec![coord!(2, 0)]);
}

#[test]
fn test_repeated_line_flips_back() {
    let line = [coord!(2, 0), coord!(0, 0)];
    let world: HashedWorld = decode(line.into_iter().chain(line));
    assert!(world.is_empty());
}

#[test]
fn test_bare_terminators_flip_origin() {
    let once: HashedWorld = decode([coord!(0, 0)]);
    assert_eq!(once.blacks(), vec![Coord::ORIGIN]);

    let twice: HashedWorld = decode([coord!(0, 0), coord!(0, 0)]);
    assert!(twice.is_empty());
}

#[test]
fn test_unterminated_tail_is_ignored() {
    let world: HashedWorld = decode([coord!(2, 0), coord!(0, 0), coord!(1, 2), coord!(1, 2)]);
    assert_eq!(world.blacks(), vec![coord!(2, 0)]);
}

#[test]
fn test_lines_are_vector_sums() {
    let steps = [
        coord!(1, -2),
        coord!(-2, 0),
        coord!(0, 0),
        coord!(-1, 2),
        coord!(1, -2),
        coord!(0, 0),
    ];
    assert_eq!(lines(steps), vec![coord!(-1, -2), Coord::ORIGIN]);
}

#[test]
fn test_lines_past_i32_range() {
    let edge = i32::MAX as i64 - 1;
    let world: HashedWorld = decode([coord!(edge, 0), coord!(2, 0), coord!(0, 0)]);
    assert_eq!(world.blacks(), vec![coord!(i32::MAX as i64 + 1, 0)]);
}
