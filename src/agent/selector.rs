//! Epsilon-greedy action selection

use burn::prelude::*;
use rand::Rng;
use rand::rngs::StdRng;

use super::encoder::FeatureVector;
use super::network::ValueNetwork;
use crate::error::Result;

/// Explores with probability `epsilon`, otherwise exploits the policy
#[derive(Debug, Clone)]
pub struct ActionSelector {
    rng: StdRng,
    action_count: usize,
}

impl ActionSelector {
    pub fn new(rng: StdRng, action_count: usize) -> Self {
        Self { rng, action_count }
    }

    pub fn select<B: Backend>(
        &mut self,
        network: &ValueNetwork<B>,
        features: &FeatureVector,
        epsilon: f64,
        device: &B::Device,
    ) -> Result<usize> {
        if self.rng.random::<f64>() < epsilon {
            return Ok(self.rng.random_range(0..self.action_count));
        }
        let q_values = network.q_values(features, device)?;
        Ok(greedy(&q_values))
    }
}

/// Index of the largest value; ties go to the lowest index
pub fn greedy(values: &[f32]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = index;
        }
    }
    best
}
