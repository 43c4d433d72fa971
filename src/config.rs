use std::time::Duration;

use anyhow::{ensure, Result};

/// Largest canvas side in pixels. Keeps the cell grid addressable by the
/// terminal's `u16` coordinates and the pixel buffer a sane size.
const MAX_CANVAS_PX: i32 = 4096;

/// Everything the game needs to know up front. Built once in `main` and
/// handed out by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield size in grid cells
    pub grid_width: i32,
    pub grid_height: i32,
    /// Canvas pixels per grid cell
    pub cell_px: i32,
    /// Frames per second of the main loop
    pub fps: u32,
    /// Simulated time between snake moves
    pub move_interval: Duration,
    /// How long the boot screen stays up without input
    pub boot_duration: Duration,
    pub initial_length: usize,
    pub food_reward: u32,
    /// Particles thrown out per food eaten
    pub particle_burst: usize,
    pub sample_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 15,
            cell_px: 3,
            fps: 30,
            move_interval: Duration::from_millis(100),
            boot_duration: Duration::from_secs(3),
            initial_length: 3,
            food_reward: 100,
            particle_burst: 10,
            sample_rate: 44_100,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.fps > 0, "fps must be positive");
        ensure!(self.cell_px > 0, "cell size must be positive");
        ensure!(!self.move_interval.is_zero(), "move interval must be positive");
        ensure!(self.initial_length > 0, "snake needs at least one segment");
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );

        let fits = |cells: i32| {
            cells
                .checked_mul(self.cell_px)
                .map_or(false, |px| px <= MAX_CANVAS_PX)
        };
        ensure!(
            fits(self.grid_width) && fits(self.grid_height),
            "a {}x{} grid at {} px per cell exceeds {} px per side",
            self.grid_width,
            self.grid_height,
            self.cell_px,
            MAX_CANVAS_PX
        );
        ensure!(
            self.grid_width as i64 / 2 + 1 >= self.initial_length as i64,
            "a {}x{} grid cannot hold a {}-segment snake at its centre",
            self.grid_width,
            self.grid_height,
            self.initial_length
        );
        ensure!(
            self.grid_width as i64 * self.grid_height as i64 > self.initial_length as i64,
            "grid has no room left for food"
        );
        Ok(())
    }

    /// Frames spent on the boot screen before it moves on by itself.
    pub fn boot_frames(&self) -> u32 {
        (self.boot_duration.as_millis() * self.fps as u128 / 1000) as u32
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Where the head starts a round.
    pub fn spawn_point(&self) -> (i32, i32) {
        (self.grid_width / 2, self.grid_height / 2)
    }

    pub fn canvas_size(&self) -> (i32, i32) {
        (self.grid_width * self.cell_px, self.grid_height * self.cell_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.boot_frames(), 90);
        assert_eq!(config.spawn_point(), (10, 7));
        assert_eq!(config.canvas_size(), (60, 45));
    }

    #[test]
    fn test_rejects_degenerate_configs() {
        let narrow = GameConfig { grid_width: 3, ..Default::default() };
        assert!(narrow.validate().is_err());

        let no_fps = GameConfig { fps: 0, ..Default::default() };
        assert!(no_fps.validate().is_err());

        let stalled = GameConfig { move_interval: Duration::ZERO, ..Default::default() };
        assert!(stalled.validate().is_err());

        let full = GameConfig { grid_width: 4, grid_height: 1, ..Default::default() };
        assert!(full.validate().is_ok());
        let packed = GameConfig { initial_length: 4, ..full };
        assert!(packed.validate().is_err());

        let flat = GameConfig { grid_height: 0, ..Default::default() };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_grids_without_overflow() {
        let huge = GameConfig { grid_width: 100_000, grid_height: 100_000, ..Default::default() };
        assert!(huge.validate().is_err());

        // Would wrap a u16 column index once scaled to pixels
        let wide = GameConfig { grid_width: 30_000, ..Default::default() };
        assert!(wide.validate().is_err());

        let max = GameConfig { grid_width: i32::MAX, grid_height: i32::MAX, ..Default::default() };
        assert!(max.validate().is_err());

        let edge = GameConfig { grid_width: MAX_CANVAS_PX / 3, ..Default::default() };
        assert!(edge.validate().is_ok());
        assert_eq!(edge.canvas_size(), (4095, 45));
    }
}
