// Impact sparks: short-lived, purely visual, no feedback into physics

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Particles spawned per impact
pub const BURST_SIZE: usize = 8;
/// Life lost per frame; particles start at 1.0
pub const LIFE_DECAY: f32 = 0.05;
// Velocity components are rolled uniformly from (-MAX_VELOCITY, MAX_VELOCITY)
const MAX_VELOCITY: f32 = 5.0;

/// Which accent a particle burst is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Wall,
    Player,
    Opponent,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub color: ParticleColor,
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    /// Spawn one burst at the impact point
    pub fn spawn(&mut self, x: f32, y: f32, color: ParticleColor) {
        for _ in 0..BURST_SIZE {
            self.particles.push(Particle {
                x,
                y,
                vx: self.rng.gen_range(-MAX_VELOCITY..MAX_VELOCITY),
                vy: self.rng.gen_range(-MAX_VELOCITY..MAX_VELOCITY),
                life: 1.0,
                color,
            });
        }
    }

    /// Advance positions, fade, and drop spent particles
    pub fn tick(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.life -= LIFE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ParticleSystem {
        ParticleSystem::with_rng(SmallRng::seed_from_u64(42))
    }

    #[test]
    fn test_spawn_creates_a_full_burst() {
        let mut system = seeded();
        system.spawn(100.0, 200.0, ParticleColor::Wall);
        assert_eq!(system.len(), BURST_SIZE);
        for p in system.iter() {
            assert_eq!(p.life, 1.0);
            assert_eq!((p.x, p.y), (100.0, 200.0));
            assert!(p.vx.abs() < MAX_VELOCITY);
            assert!(p.vy.abs() < MAX_VELOCITY);
        }
    }

    #[test]
    fn test_particles_move_and_fade() {
        let mut system = seeded();
        system.spawn(0.0, 0.0, ParticleColor::Player);
        system.tick();
        for p in system.iter() {
            assert!((p.life - (1.0 - LIFE_DECAY)).abs() < f32::EPSILON);
            assert_eq!(p.x, p.vx);
            assert_eq!(p.y, p.vy);
        }
    }

    #[test]
    fn test_spent_particles_are_removed() {
        let mut system = seeded();
        system.spawn(0.0, 0.0, ParticleColor::Opponent);
        // 1.0 / 0.05 = 20 ticks to burn a full life
        for _ in 0..20 {
            system.tick();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_bursts_accumulate() {
        let mut system = seeded();
        system.spawn(0.0, 0.0, ParticleColor::Wall);
        system.spawn(5.0, 5.0, ParticleColor::Player);
        assert_eq!(system.len(), BURST_SIZE * 2);
    }
}
