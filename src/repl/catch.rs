//! Catch rolls.
//!
//! A roll is drawn uniformly from `[0, base_experience)` and the catch
//! succeeds when it falls below `(b² + 2) / (2b)`, which is just over half of
//! the base experience. Pokemon without base experience are always caught.

use rand::Rng;

/// Rolls once for a Pokemon with the given base experience.
pub fn attempt_catch<R: Rng + ?Sized>(base_experience: u32, rng: &mut R) -> bool {
    if base_experience == 0 {
        return true;
    }

    let roll = rng.gen_range(0..base_experience);
    f64::from(roll) < threshold(base_experience)
}

/// Probability that [`attempt_catch`] succeeds.
pub fn catch_chance(base_experience: u32) -> f64 {
    if base_experience == 0 {
        return 1.0;
    }

    let winning_rolls = (threshold(base_experience).ceil() as u32).min(base_experience);
    f64::from(winning_rolls) / f64::from(base_experience)
}

fn threshold(base_experience: u32) -> f64 {
    let b = f64::from(base_experience);
    (b * b + 2.0) / (2.0 * b)
}
