//! Sparkle particles emitted when a player touches a dot

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::heading;
use crate::tuning::Tuning;

/// Particle tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// The emitting dot's color (0xRRGGBB)
    Base(u32),
    White,
}

impl ParticleColor {
    pub fn rgb(&self) -> u32 {
        match self {
            ParticleColor::Base(rgb) => *rgb,
            ParticleColor::White => 0xFF_FF_FF,
        }
    }
}

/// Sideways oscillation for weaving particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weave {
    pub phase: f32,
    /// Radians per second
    pub speed: f32,
    pub amplitude: f32,
}

/// A single sparkle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Heading (radians)
    pub angle: f32,
    pub speed: f32,
    /// 1.0 at birth, dead at 0.0
    pub life: f32,
    pub size: f32,
    pub color: ParticleColor,
    pub weave: Option<Weave>,
}

impl Particle {
    /// Spawn one particle near `origin`
    pub fn spawn<R: Rng + ?Sized>(origin: Vec2, base: u32, tuning: &Tuning, rng: &mut R) -> Self {
        let r = rng.random::<f32>() * tuning.spawn_radius;
        let a = rng.random::<f32>() * std::f32::consts::TAU;
        let pos = origin + heading(a) * r;

        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed =
            tuning.particle_base_speed + (rng.random::<f32>() - 0.5) * tuning.particle_speed_variance;

        let color = if rng.random_bool(tuning.white_particle_chance as f64) {
            ParticleColor::White
        } else {
            ParticleColor::Base(base)
        };

        let weave = (tuning.particle_weave_amplitude > 0.0).then(|| Weave {
            phase: rng.random::<f32>() * std::f32::consts::TAU,
            speed: 8.0 + rng.random::<f32>() * 8.0,
            amplitude: tuning.particle_weave_amplitude,
        });

        Self {
            pos,
            angle,
            speed,
            life: 1.0,
            size: tuning.particle_start_size,
            color,
            weave,
        }
    }

    /// Advance one frame; returns false once the particle should be removed
    pub fn update(&mut self, dt: f32, tuning: &Tuning) -> bool {
        let dir = heading(self.angle);
        self.pos += dir * self.speed * dt;

        if let Some(weave) = self.weave.as_mut() {
            let before = weave.phase.sin();
            weave.phase += weave.speed * dt;
            let side = Vec2::new(-dir.y, dir.x);
            self.pos += side * (weave.phase.sin() - before) * weave.amplitude;
        }

        // Life and size decay per frame, not per second
        self.life -= tuning.particle_life_decay;
        self.size *= tuning.particle_size_decay;
        self.is_alive(tuning)
    }

    #[inline]
    pub fn is_alive(&self, tuning: &Tuning) -> bool {
        self.life > 0.0 && self.size >= tuning.particle_min_size
    }

    /// Draw opacity, fading with remaining life
    pub fn alpha(&self, tuning: &Tuning) -> f32 {
        (tuning.particle_alpha_start * self.life).clamp(0.0, 1.0)
    }
}

/// Push a burst of particles, evicting the oldest past `cap`
pub fn emit_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    base: u32,
    tuning: &Tuning,
    cap: usize,
    rng: &mut R,
) {
    for _ in 0..tuning.particles_per_burst {
        if cap == 0 {
            return;
        }
        if particles.len() >= cap {
            particles.remove(0);
        }
        particles.push(Particle::spawn(origin, base, tuning, rng));
    }
}

/// Update every particle and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32, tuning: &Tuning) {
    particles.retain_mut(|p| p.update(dt, tuning));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_spawn_within_radius() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let origin = Vec2::new(200.0, 150.0);
        for _ in 0..200 {
            let p = Particle::spawn(origin, 0x8888ff, &tuning, &mut rng);
            assert!(p.pos.distance(origin) <= tuning.spawn_radius + 1e-4);
            assert!((p.speed - tuning.particle_base_speed).abs() <= tuning.particle_speed_variance / 2.0);
            assert_eq!(p.life, 1.0);
            assert_eq!(p.size, tuning.particle_start_size);
            assert!(p.weave.is_none());
        }
    }

    #[test]
    fn test_white_chance_extremes() {
        let mut rng = rng();
        let all_white = Tuning {
            white_particle_chance: 1.0,
            ..Tuning::default()
        };
        let never_white = Tuning {
            white_particle_chance: 0.0,
            ..Tuning::default()
        };
        let p = Particle::spawn(Vec2::ZERO, 0x123456, &all_white, &mut rng);
        assert_eq!(p.color, ParticleColor::White);
        let p = Particle::spawn(Vec2::ZERO, 0x123456, &never_white, &mut rng);
        assert_eq!(p.color, ParticleColor::Base(0x123456));
        assert_eq!(p.color.rgb(), 0x123456);
    }

    #[test]
    fn test_particle_moves_along_heading() {
        let tuning = Tuning::default();
        let mut p = Particle {
            pos: Vec2::ZERO,
            angle: 0.0,
            speed: 120.0,
            life: 1.0,
            size: 3.0,
            color: ParticleColor::White,
            weave: None,
        };
        assert!(p.update(0.5, &tuning));
        assert!((p.pos.x - 60.0).abs() < 1e-4);
        assert!(p.pos.y.abs() < 1e-4);
        assert!((p.life - 0.97).abs() < 1e-6);
        assert!((p.size - 2.82).abs() < 1e-5);
    }

    #[test]
    fn test_particle_dies_when_too_small() {
        let tuning = Tuning::default();
        let mut p = Particle::spawn(Vec2::ZERO, 0, &tuning, &mut rng());
        let mut frames = 0;
        while p.update(1.0 / 60.0, &tuning) {
            frames += 1;
        }
        // 3.0 * 0.94^n < 1.0 first holds at n = 18
        assert_eq!(frames, 17);
    }

    #[test]
    fn test_weaving_particle_drifts_sideways() {
        let tuning = Tuning {
            particle_weave_amplitude: 4.0,
            ..Tuning::default()
        };
        let mut p = Particle::spawn(Vec2::ZERO, 0, &tuning, &mut rng());
        p.angle = 0.0;
        p.pos = Vec2::ZERO;
        let weave = p.weave.expect("weave enabled");
        assert_eq!(weave.amplitude, 4.0);
        p.update(0.05, &tuning);
        assert!(p.pos.y.abs() > 0.0);
        assert!(p.pos.y.abs() <= 8.0);
    }

    #[test]
    fn test_burst_respects_cap() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut particles = Vec::new();
        emit_burst(&mut particles, Vec2::ZERO, 0, &tuning, 20, &mut rng);
        assert_eq!(particles.len(), 12);
        emit_burst(&mut particles, Vec2::ZERO, 0, &tuning, 20, &mut rng);
        assert_eq!(particles.len(), 20);
        emit_burst(&mut particles, Vec2::ZERO, 0, &tuning, 0, &mut rng);
        assert_eq!(particles.len(), 20);
    }

    #[test]
    fn test_update_particles_prunes() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut particles = Vec::new();
        emit_burst(&mut particles, Vec2::ZERO, 0, &tuning, 256, &mut rng);
        particles[0].life = 0.01;
        update_particles(&mut particles, 1.0 / 60.0, &tuning);
        assert_eq!(particles.len(), 11);
    }
}
