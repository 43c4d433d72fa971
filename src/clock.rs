use std::time::Duration;

/// Turns a steady stream of frames into game-logic ticks.
///
/// Each frame adds one frame period of simulated time; every full
/// `interval` collected pays out one tick. Time is kept as nanoseconds
/// multiplied by the frame rate, so a frame is exactly one second's worth of
/// nanoseconds and nothing is lost to rounding `1 / fps`.
#[derive(Debug, Clone)]
pub struct TickAccumulator {
    per_frame: u128,
    per_tick: u128,
    acc: u128,
}

impl TickAccumulator {
    pub fn new(fps: u32, interval: Duration) -> Self {
        TickAccumulator {
            per_frame: Duration::from_secs(1).as_nanos(),
            per_tick: interval.as_nanos() * fps as u128,
            acc: 0,
        }
    }

    /// Advance by one frame. Returns how many ticks are due.
    pub fn frame(&mut self) -> u32 {
        self.acc += self.per_frame;

        let mut ticks = 0;
        while self.per_tick > 0 && self.acc >= self.per_tick {
            self.acc -= self.per_tick;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_third_frame_at_thirty_fps() {
        let mut clock = TickAccumulator::new(30, Duration::from_millis(100));
        let ticks: Vec<u32> = (0..9).map(|_| clock.frame()).collect();
        assert_eq!(ticks, vec![0, 0, 1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_no_drift_over_a_minute() {
        let mut clock = TickAccumulator::new(30, Duration::from_millis(100));
        let total: u32 = (0..30 * 60).map(|_| clock.frame()).sum();
        assert_eq!(total, 600);
    }

    #[test]
    fn test_interval_shorter_than_a_frame() {
        let mut clock = TickAccumulator::new(10, Duration::from_millis(40));
        // 100ms frames, 40ms ticks: 2, 3, 2, 3, ...
        let ticks: Vec<u32> = (0..4).map(|_| clock.frame()).collect();
        assert_eq!(ticks, vec![2, 3, 2, 3]);
    }
}
