use crate::{Coords, TermInt};
use crate::grid::Grid;

use rand::Rng;

const EDGE_MARGIN: TermInt = 2;

/// The single piece of food on the board. It is not kept off the snake, so it
/// can show up underneath the body.
pub struct Food {
    position: Coords,
}

impl Food {
    pub fn new<R: Rng>(grid: &Grid, rng: &mut R) -> Self {
        let mut food = Food { position: (0, 0) };
        food.place_random(grid, rng);
        food
    }

    #[cfg(test)]
    pub fn at(position: Coords) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Picks a cell at least `EDGE_MARGIN` away from every edge. Grids too small
    /// for the margin collapse the range onto a single cell.
    pub fn place_random<R: Rng>(&mut self, grid: &Grid, rng: &mut R) {
        self.position = (
            pick(rng, grid.width()),
            pick(rng, grid.height()),
        );
    }

    pub fn is_consumed(&self, head: Coords) -> bool {
        head == self.position
    }
}

fn pick<R: Rng>(rng: &mut R, max: TermInt) -> TermInt {
    let low = EDGE_MARGIN.min(max);
    let high = max.saturating_sub(EDGE_MARGIN).max(low);
    rng.gen_range(low..=high)
}
