use rand::Rng;
use rand::seq::SliceRandom;

use crate::errors::GenerationError;

/// Choose `amount` distinct elements of `pool` uniformly at random.
///
/// Shuffle-and-slice over an index array, so it always terminates. Asking
/// for more elements than the pool holds is an error, never a clamp.
pub fn sample_distinct<T: Copy, R: Rng + ?Sized>(
    pool: &[T],
    amount: usize,
    rng: &mut R,
) -> Result<Vec<T>, GenerationError> {
    if amount > pool.len() {
        return Err(GenerationError::SamplingPrecondition {
            requested: amount,
            available: pool.len(),
        });
    }

    let mut indices: Vec<usize> = (0..pool.len()).collect();
    let (chosen, _) = indices.partial_shuffle(rng, amount);
    Ok(chosen.iter().map(|&idx| pool[idx]).collect())
}
