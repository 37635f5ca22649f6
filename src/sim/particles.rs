//! Trail sparks
//!
//! Purely visual: sparks drift away from an unsafe player and fade out. They
//! have their own generator so spawning them never shifts the gameplay RNG
//! stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A single spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left to live
    pub life: u32,
    pub size: f32,
    /// Opacity, 0-1
    pub alpha: f32,
}

/// Bounded pool of live sparks
#[derive(Debug, Clone)]
pub struct TrailSparks {
    sparks: Vec<Spark>,
    cap: usize,
    rng: Pcg32,
}

impl TrailSparks {
    pub fn new(seed: u64, cap: usize) -> Self {
        Self {
            sparks: Vec::with_capacity(cap),
            cap,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Emit one spark at `at` unless the pool is full
    pub fn emit(&mut self, at: Vec2) {
        if self.sparks.len() >= self.cap {
            return;
        }
        let rng = &mut self.rng;
        self.sparks.push(Spark {
            pos: at,
            vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)),
            life: rng.random_range(30..60),
            size: rng.random_range(2.0..5.0),
            alpha: rng.random::<f32>(),
        });
    }

    /// Drift and age every spark, dropping dead ones
    pub fn update(&mut self) {
        for spark in &mut self.sparks {
            spark.pos += spark.vel;
            spark.life = spark.life.saturating_sub(1);
        }
        self.sparks.retain(|s| s.life > 0);
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }
}
