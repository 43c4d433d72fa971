use rand::Rng;

use crate::Coords;

/// Rejection sampling gives up after this many misses and falls back to
/// scanning the free cells.
const MAX_RANDOM_TRIES: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub cell: Coords,
    /// Animation phase, advanced once per frame
    pub pulse: f32,
}

impl Food {
    /// Places food on a random free cell. `None` when the snake fills the grid.
    pub fn spawn<R: Rng + ?Sized>(
        bounds: (i32, i32),
        occupied: &[Coords],
        rng: &mut R,
    ) -> Option<Food> {
        free_cell(bounds, occupied, rng).map(|cell| Food { cell, pulse: 0.0 })
    }

    /// Moves to a new free cell, or reports that there is none left.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        bounds: (i32, i32),
        occupied: &[Coords],
        rng: &mut R,
    ) -> bool {
        match Food::spawn(bounds, occupied, rng) {
            Some(food) => {
                *self = food;
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self) {
        self.pulse += 0.2;
    }
}

fn free_cell<R: Rng + ?Sized>(
    bounds: (i32, i32),
    occupied: &[Coords],
    rng: &mut R,
) -> Option<Coords> {
    let (w, h) = bounds;

    for _ in 0..MAX_RANDOM_TRIES {
        let pos = (rng.gen_range(0..w), rng.gen_range(0..h));
        if !occupied.contains(&pos) {
            return Some(pos);
        }
    }

    // Nearly full grid: pick uniformly among whatever is left
    let choices: Vec<Coords> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect();

    if choices.is_empty() {
        None
    } else {
        Some(choices[rng.gen_range(0..choices.len())])
    }
}
