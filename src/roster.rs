use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{Error, Result};

/// Characters the bot may be assigned for a round
#[derive(Debug, Clone)]
pub struct Roster {
    characters: Vec<String>,
    rng: StdRng,
}

impl Roster {
    pub fn new(characters: Vec<String>, rng: StdRng) -> Result<Self> {
        if characters.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "character roster is empty".to_string(),
            });
        }
        Ok(Self { characters, rng })
    }

    /// Ten placeholder ids, `char_0` .. `char_9`
    pub fn placeholder(rng: StdRng) -> Result<Self> {
        Self::new((0..10).map(|i| format!("char_{i}")).collect(), rng)
    }

    /// Uniform random pick
    pub fn pick(&mut self) -> String {
        let index = self.rng.random_range(0..self.characters.len());
        self.characters[index].clone()
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pick_from_roster() {
        let mut roster = Roster::placeholder(StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(roster.characters().len(), 10);
        for _ in 0..50 {
            let pick = roster.pick();
            assert!(roster.characters().contains(&pick));
        }
    }

    #[test]
    fn test_empty_roster_rejected() {
        let result = Roster::new(Vec::new(), StdRng::seed_from_u64(9));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));

        let mut single = Roster::new(vec!["char_4".to_string()], StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(single.pick(), "char_4");
    }
}
