//! Experience replay buffer

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::index;

use super::encoder::FeatureVector;

/// One observed step, immutable once stored
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: FeatureVector,
    pub action: usize,
    pub reward: f32,
    pub next_state: FeatureVector,
    pub done: bool,
}

/// Bounded FIFO store; the oldest transition is evicted on overflow
#[derive(Debug, Clone)]
pub struct ReplayMemory {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Store a transition. A zero-capacity memory stores nothing.
    pub fn push(&mut self, transition: Transition) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Draw `batch_size` distinct transitions uniformly at random.
    ///
    /// Callers guard on `len() >= batch_size`; a short buffer yields a
    /// short batch.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<&Transition> {
        debug_assert!(self.buffer.len() >= batch_size);
        let amount = batch_size.min(self.buffer.len());
        index::sample(rng, self.buffer.len(), amount)
            .into_iter()
            .map(|i| &self.buffer[i])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn transition(tag: usize) -> Transition {
        Transition {
            state: [tag as f32; 8],
            action: tag % 5,
            reward: tag as f32,
            next_state: [0.0; 8],
            done: false,
        }
    }

    #[test]
    fn test_capacity_and_fifo_eviction() {
        let mut memory = ReplayMemory::new(3);
        for tag in 0..4 {
            memory.push(transition(tag));
            assert!(memory.len() <= memory.capacity());
        }
        assert_eq!(memory.len(), 3);
        let rewards: Vec<f32> = memory.iter().map(|t| t.reward).collect();
        assert_eq!(rewards, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut memory = ReplayMemory::new(0);
        memory.push(transition(1));
        memory.push(transition(2));
        assert!(memory.is_empty());
        assert_eq!(memory.len(), memory.capacity());
    }

    #[test]
    fn test_sample_is_distinct() {
        let mut memory = ReplayMemory::new(100);
        for tag in 0..40 {
            memory.push(transition(tag));
        }
        let mut rng = StdRng::seed_from_u64(7);
        let batch = memory.sample(32, &mut rng);
        assert_eq!(batch.len(), 32);

        let mut tags: Vec<u32> = batch.iter().map(|t| t.reward as u32).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), 32);
    }

    #[test]
    fn test_sample_whole_buffer() {
        let mut memory = ReplayMemory::new(10);
        for tag in 0..5 {
            memory.push(transition(tag));
        }
        let mut rng = StdRng::seed_from_u64(1);
        let mut tags: Vec<u32> = memory
            .sample(5, &mut rng)
            .iter()
            .map(|t| t.reward as u32)
            .collect();
        tags.sort_unstable();
        assert_eq!(tags, vec![0, 1, 2, 3, 4]);
    }
}
