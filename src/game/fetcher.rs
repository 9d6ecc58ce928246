//! Clue fetching and sampling

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Category, Clue};
use crate::error::{GameError, Result};
use crate::source::{CategoryDetail, CategoryId, TriviaSource};

/// Fetch a category and keep a random `count` of its clues
pub async fn fetch_category<S, R>(
    source: &S,
    id: CategoryId,
    count: usize,
    rng: &mut R,
) -> Result<Category>
where
    S: TriviaSource + ?Sized,
    R: Rng + ?Sized,
{
    let detail = source.get_category(id).await?;
    log::debug!(
        "Fetched category {} ({:?}) with {} clues",
        id,
        detail.title,
        detail.clues.len()
    );
    sample_clues(&detail, count, rng)
}

/// Sample `count` clues without replacement, all starting unrevealed
pub fn sample_clues<R: Rng + ?Sized>(
    detail: &CategoryDetail,
    count: usize,
    rng: &mut R,
) -> Result<Category> {
    if detail.clues.is_empty() {
        return Err(GameError::CategoryUnavailable { id: detail.id });
    }
    if detail.clues.len() < count {
        return Err(GameError::InsufficientClues {
            id: detail.id,
            required: count,
            available: detail.clues.len(),
        });
    }

    let clues = detail
        .clues
        .choose_multiple(rng, count)
        .map(|c| Clue::new(c.question.clone(), c.answer.clone()))
        .collect();

    Ok(Category {
        title: detail.title.clone(),
        clues,
    })
}
