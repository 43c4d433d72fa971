use rand::Rng;

use crate::canvas::Rgb;

// All in grid cells per frame
const GRAVITY: f32 = 0.0125;
const LIFE_DECAY: f32 = 0.05;
const SPREAD_X: f32 = 0.125;
const LAUNCH_Y: (f32, f32) = (-0.25, -0.0625);

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 when fresh, gone at 0.0
    pub life: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.life -= LIFE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Short-lived debris thrown out when food is eaten. Purely cosmetic.
#[derive(Debug, Clone, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        at: (f32, f32),
        count: usize,
        color: Rgb,
        rng: &mut R,
    ) {
        self.items.extend((0..count).map(|_| Particle {
            x: at.0,
            y: at.1,
            vx: rng.gen_range(-SPREAD_X..=SPREAD_X),
            vy: rng.gen_range(LAUNCH_Y.0..=LAUNCH_Y.1),
            life: 1.0,
            color,
        }));
    }

    pub fn update(&mut self) {
        for p in self.items.iter_mut() {
            p.update();
        }
        self.items.retain(Particle::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const RED: Rgb = Rgb(200, 20, 20);

    #[test]
    fn test_ballistic_step() {
        let mut p = Particle { x: 1.0, y: 2.0, vx: 0.1, vy: -0.2, life: 1.0, color: RED };
        p.update();

        assert!((p.x - 1.1).abs() < 1e-6);
        assert!((p.y - 1.8).abs() < 1e-6);
        assert!((p.vy - (-0.2 + GRAVITY)).abs() < 1e-6);
        assert!((p.life - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_burst_launches_upwards() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut particles = Particles::new();
        particles.burst((3.5, 4.5), 10, RED, &mut rng);

        assert_eq!(particles.len(), 10);
        for p in particles.iter() {
            assert_eq!((p.x, p.y), (3.5, 4.5));
            assert!(p.vx.abs() <= SPREAD_X);
            assert!(p.vy < 0.0);
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut particles = Particles::new();
        particles.burst((0.0, 0.0), 5, RED, &mut rng);

        for _ in 0..15 {
            particles.update();
        }
        assert_eq!(particles.len(), 5);

        // 1.0 / 0.05 = 20 frames, give float rounding one more
        for _ in 0..6 {
            particles.update();
        }
        assert!(particles.is_empty());
    }
}
