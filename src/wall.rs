use std::fmt;

use rand::{Rng, RngCore};

use crate::grid::Grid;
use crate::tile::Tile;

/// Strategy that claims obstacle tiles before the snake and apple are placed.
///
/// Builders only ever convert `Empty` cells, so the engine can trust the
/// reported count when working out how many free cells remain.
pub trait WallBuilder: fmt::Display + Send + Sync {
    /// Adds walls to `grid` and returns the number of cells claimed.
    fn create_wall(&self, grid: &mut Grid, rng: &mut dyn RngCore) -> usize;
}

/// Leaves the grid open.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWall;

impl WallBuilder for NoWall {
    fn create_wall(&self, _grid: &mut Grid, _rng: &mut dyn RngCore) -> usize {
        0
    }
}

impl fmt::Display for NoWall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("No walls")
    }
}

/// Scatters single wall tiles over the whole grid.
///
/// Draws are independent, so two draws may hit the same cell. The declared
/// draw count is reported either way, which can overstate the real number of
/// wall tiles by the number of collisions.
#[derive(Debug, Clone, Copy)]
pub struct Dots {
    percent: u8,
}

impl Dots {
    #[must_use]
    pub fn new(percent: u8) -> Self {
        Self { percent }
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.percent
    }
}

impl WallBuilder for Dots {
    fn create_wall(&self, grid: &mut Grid, rng: &mut dyn RngCore) -> usize {
        let n = grid.size().total_cells() * usize::from(self.percent) / 100;

        for _ in 0..n {
            let x = rng.gen_range(0..grid.width());
            let y = rng.gen_range(0..grid.height());
            if grid.get(x, y) == Tile::Empty {
                grid.set(x, y, Tile::Wall);
            }
        }

        n
    }
}

impl fmt::Display for Dots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dots {}%", self.percent)
    }
}

/// One horizontal and one vertical bar crossing in the middle of the grid,
/// each covering the inner half of its axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crosshair;

impl WallBuilder for Crosshair {
    fn create_wall(&self, grid: &mut Grid, _rng: &mut dyn RngCore) -> usize {
        let (width, height) = (grid.width(), grid.height());
        let (start_x, start_y) = (width / 4, height / 4);
        let (center_x, center_y) = (width / 2, height / 2);

        let horizontal = (start_x..width - start_x).map(|x| (x, center_y));
        let vertical = (start_y..height - start_y).map(|y| (center_x, y));

        let mut count = 0;
        for (x, y) in horizontal.chain(vertical) {
            if grid.get(x, y) == Tile::Empty {
                grid.set(x, y, Tile::Wall);
                count += 1;
            }
        }
        count
    }
}

impl fmt::Display for Crosshair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Crosshair")
    }
}

/// Delegates each call to a uniformly chosen builder from its registry.
pub struct RandomComposite {
    builders: Vec<Box<dyn WallBuilder>>,
}

impl RandomComposite {
    /// Creates a composite over `builders`, which must not be empty.
    #[must_use]
    pub fn new(builders: Vec<Box<dyn WallBuilder>>) -> Self {
        debug_assert!(!builders.is_empty());
        Self { builders }
    }

    #[must_use]
    pub fn builders(&self) -> &[Box<dyn WallBuilder>] {
        &self.builders
    }
}

impl Default for RandomComposite {
    fn default() -> Self {
        Self::new(vec![
            Box::new(NoWall),
            Box::new(Dots::new(2)),
            Box::new(Dots::new(5)),
            Box::new(Dots::new(10)),
            Box::new(Crosshair),
        ])
    }
}

impl WallBuilder for RandomComposite {
    fn create_wall(&self, grid: &mut Grid, rng: &mut dyn RngCore) -> usize {
        let index = rng.gen_range(0..self.builders.len());
        self.builders[index].create_wall(grid, rng)
    }
}

impl fmt::Display for RandomComposite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Random")
    }
}
