use crate::{Coords, TermInt};
use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

/// Moves `coord` one unit along an axis bounded by `max`. Both ends are
/// reachable: stepping past `max` lands on 0 and stepping below 0 lands on `max`.
pub fn wrap(coord: TermInt, max: TermInt, step: Step) -> TermInt {
    match step {
        Step::Forward => if coord < max { coord + 1 } else { 0 },
        Step::Backward => if coord > 0 { coord - 1 } else { max },
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: TermInt,
    height: TermInt,
}

impl Grid {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    /// The cell one step from `pos` along `direction`. Only the axis of
    /// movement is touched.
    pub fn next(&self, pos: Coords, direction: Direction) -> Coords {
        let (x, y) = pos;
        match direction {
            Up => (x, wrap(y, self.height, Step::Backward)),
            Down => (x, wrap(y, self.height, Step::Forward)),
            Left => (wrap(x, self.width, Step::Backward), y),
            Right => (wrap(x, self.width, Step::Forward), y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_inside_bounds_steps_by_one() {
        assert_eq!(wrap(5, 20, Step::Forward), 6);
        assert_eq!(wrap(5, 20, Step::Backward), 4);
    }

    #[test]
    fn wrap_joins_the_edges() {
        assert_eq!(wrap(20, 20, Step::Forward), 0);
        assert_eq!(wrap(0, 20, Step::Backward), 20);
    }

    #[test]
    fn next_moves_along_one_axis_only() {
        let grid = Grid::new(20, 10);
        let pos = (7, 4);

        assert_eq!(grid.next(pos, Up), (7, 3));
        assert_eq!(grid.next(pos, Down), (7, 5));
        assert_eq!(grid.next(pos, Left), (6, 4));
        assert_eq!(grid.next(pos, Right), (8, 4));
    }

    #[test]
    fn next_wraps_at_every_edge() {
        let grid = Grid::new(20, 10);

        assert_eq!(grid.next((20, 4), Right), (0, 4));
        assert_eq!(grid.next((0, 4), Left), (20, 4));
        assert_eq!(grid.next((7, 10), Down), (7, 0));
        assert_eq!(grid.next((7, 0), Up), (7, 10));
    }
}
