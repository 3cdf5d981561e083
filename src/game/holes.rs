use rand::Rng;

use crate::error::GameError;

/// Picks the next hole, never the same one twice in a row.
#[derive(Clone, Debug, Default)]
pub struct HoleChooser {
    last: Option<usize>,
}

impl HoleChooser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Uniform over the `count - 1` holes other than the previous pick.
    pub fn choose<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Result<usize, GameError> {
        if count < 2 {
            return Err(GameError::TooFewTargets { count });
        }
        let idx = match self.last {
            Some(prev) if prev < count => {
                let i = rng.gen_range(0..count - 1);
                if i >= prev { i + 1 } else { i }
            }
            _ => rng.gen_range(0..count),
        };
        self.last = Some(idx);
        Ok(idx)
    }
}
