//! Category sampling

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{GameError, Result};
use crate::source::CategoryId;

/// Pick `count` distinct ids from `pool`, uniformly without replacement.
///
/// Duplicates in the pool are collapsed first. Fails rather than returning a
/// short sample when the pool can't cover `count`.
pub fn sample_category_ids<R: Rng + ?Sized>(
    pool: &[CategoryId],
    count: usize,
    rng: &mut R,
) -> Result<Vec<CategoryId>> {
    let mut seen = HashSet::with_capacity(pool.len());
    let distinct: Vec<CategoryId> = pool.iter().copied().filter(|id| seen.insert(*id)).collect();

    if distinct.len() < count {
        return Err(GameError::InsufficientPool {
            requested: count,
            available: distinct.len(),
        });
    }

    Ok(distinct.choose_multiple(rng, count).copied().collect())
}
