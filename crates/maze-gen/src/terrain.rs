//! Terrain stamping.

use maze_core::{Maze, TerrainType};
use rand::Rng;

/// Map a roll in `[0, 100)` to a terrain category.
///
/// | Roll | Terrain | Share |
/// |---|---|---|
/// | 0..45 | stone | 45% |
/// | 45..65 | grass | 20% |
/// | 65..82 | sand | 17% |
/// | 82..100 | lava | 18% |
pub fn terrain_for_roll(roll: u32) -> TerrainType {
    match roll {
        0..45 => TerrainType::Stone,
        45..65 => TerrainType::Grass,
        65..82 => TerrainType::Sand,
        _ => TerrainType::Lava,
    }
}

/// Stamps every cell of a maze with a random terrain category.
pub struct TerrainAssigner<R: Rng> {
    pub rng: R,
}

impl<R: Rng> TerrainAssigner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a category for every cell independently, then force the start
    /// and goal corners to stone. Walls are never touched.
    ///
    /// Returns how many cells of each category the maze ended up with, in
    /// [`TerrainType::ALL`] order.
    pub fn assign(&mut self, maze: &mut Maze) -> [usize; 4] {
        for p in maze.bounds().iter() {
            let roll = self.rng.random_range(0..100u32);
            maze.set_terrain(p, terrain_for_roll(roll));
        }
        maze.set_terrain(maze.start(), TerrainType::Stone);
        maze.set_terrain(maze.goal(), TerrainType::Stone);

        let mut counts = [0usize; 4];
        for c in maze.cells() {
            counts[c.terrain as usize] += 1;
        }
        log::debug!(
            "terrain for {}: {} stone, {} grass, {} sand, {} lava",
            maze.bounds(),
            counts[0],
            counts[1],
            counts[2],
            counts[3]
        );
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Pos;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn roll_boundaries() {
        assert_eq!(terrain_for_roll(0), TerrainType::Stone);
        assert_eq!(terrain_for_roll(44), TerrainType::Stone);
        assert_eq!(terrain_for_roll(45), TerrainType::Grass);
        assert_eq!(terrain_for_roll(64), TerrainType::Grass);
        assert_eq!(terrain_for_roll(65), TerrainType::Sand);
        assert_eq!(terrain_for_roll(81), TerrainType::Sand);
        assert_eq!(terrain_for_roll(82), TerrainType::Lava);
        assert_eq!(terrain_for_roll(99), TerrainType::Lava);
    }

    #[test]
    fn roll_shares() {
        let mut counts = [0; 4];
        for roll in 0..100 {
            counts[terrain_for_roll(roll) as usize] += 1;
        }
        assert_eq!(counts, [45, 20, 17, 18]);
    }

    #[test]
    fn endpoints_are_stone_and_walls_untouched() {
        for seed in 0..20 {
            let mut m = Maze::new(4, 6).unwrap();
            m.remove_wall_between(Pos::new(1, 1), Pos::new(1, 2));
            let before = m.open_edges();
            let counts = TerrainAssigner::new(StdRng::seed_from_u64(seed)).assign(&mut m);
            assert_eq!(counts.iter().sum::<usize>(), 24);
            assert_eq!(m.terrain(Pos::new(0, 0)), Some(TerrainType::Stone));
            assert_eq!(m.terrain(Pos::new(3, 5)), Some(TerrainType::Stone));
            assert_eq!(m.open_edges(), before);
        }
    }

    #[test]
    fn large_grid_uses_every_category() {
        let mut m = Maze::new(30, 30).unwrap();
        let counts = TerrainAssigner::new(StdRng::seed_from_u64(2)).assign(&mut m);
        assert!(counts.iter().all(|&n| n > 0));
        assert!(counts[0] > counts[1]);
    }
}
