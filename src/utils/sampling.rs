// src/utils/sampling.rs
//! Bounded random sampling.
//!
//! Every search in the generator draws indices with repetition and gives up
//! after a fixed number of draws. These caps are the only thing bounding the
//! work of a run, so they are constants rather than configuration.

use rand::Rng;

/// Draws of a placed part when looking for an anchor socket.
pub const MAX_ANCHOR_SAMPLES: usize = 100;

/// Draws of a socket index when looking for a free socket on one part.
pub const MAX_ENTRY_SAMPLES: usize = 100;

/// Re-anchoring attempts for one candidate after its first placement conflicts.
pub const MAX_PLACEMENT_RETRIES: usize = 100;

/// Draws up to `cap` uniform indices in `0..len` (with repetition) and returns
/// the first value `probe` accepts. Returns `None` when `len` is zero or the
/// cap runs out.
pub fn sample_bounded<R, T, F>(rng: &mut R, len: usize, cap: usize, mut probe: F) -> Option<T>
where
    R: Rng,
    F: FnMut(&mut R, usize) -> Option<T>,
{
    if len == 0 {
        return None;
    }
    for _ in 0..cap {
        let index = rng.random_range(0..len);
        if let Some(found) = probe(rng, index) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_range_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut calls = 0;
        let found: Option<usize> = sample_bounded(&mut rng, 0, 100, |_, i| {
            calls += 1;
            Some(i)
        });
        assert!(found.is_none());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_cap_limits_probes() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut calls = 0;
        let found: Option<usize> = sample_bounded(&mut rng, 5, MAX_ANCHOR_SAMPLES, |_, _| {
            calls += 1;
            None
        });
        assert!(found.is_none());
        assert_eq!(calls, MAX_ANCHOR_SAMPLES);
    }

    #[test]
    fn test_first_hit_wins() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut calls = 0;
        let found = sample_bounded(&mut rng, 4, 100, |_, i| {
            calls += 1;
            (i == 2).then_some(i)
        });
        assert_eq!(found, Some(2));
        assert!(calls >= 1 && calls <= 100);
    }
}
