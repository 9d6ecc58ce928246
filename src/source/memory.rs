//! In-memory trivia source
//!
//! Serves a fixed list of categories. Used by the native demo and tests.

use std::cell::RefCell;

use super::{CategoryDetail, CategoryId, CategorySummary, TriviaSource};
use crate::error::{GameError, Result};

/// Bundled demo data set
const DEMO_CATEGORIES: &str = include_str!("../../assets/demo_categories.json");

#[derive(Debug, Default)]
pub struct MemorySource {
    categories: Vec<CategoryDetail>,
    /// Requests to this id fail with a network error
    fail_on: Option<CategoryId>,
    /// Ids passed to `get_category`, in call order
    fetched: RefCell<Vec<CategoryId>>,
}

impl MemorySource {
    pub fn new(categories: Vec<CategoryDetail>) -> Self {
        Self {
            categories,
            ..Default::default()
        }
    }

    /// Source backed by the bundled demo data
    pub fn demo() -> Result<Self> {
        let categories: Vec<CategoryDetail> = serde_json::from_str(DEMO_CATEGORIES)?;
        Ok(Self::new(categories))
    }

    /// Make every fetch of `id` fail
    pub fn with_failure(mut self, id: CategoryId) -> Self {
        self.fail_on = Some(id);
        self
    }

    /// Category ids requested so far
    pub fn fetched(&self) -> Vec<CategoryId> {
        self.fetched.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl TriviaSource for MemorySource {
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>> {
        Ok(self
            .categories
            .iter()
            .take(count)
            .map(CategoryDetail::summary)
            .collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<CategoryDetail> {
        self.fetched.borrow_mut().push(id);
        if self.fail_on == Some(id) {
            return Err(GameError::Network(format!("category {id} unreachable")));
        }
        self.categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(GameError::CategoryUnavailable { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_demo_data_loads() {
        let source = MemorySource::demo().unwrap();
        assert!(source.len() >= crate::consts::NUM_CATEGORIES);

        let listing = block_on(source.list_categories(100)).unwrap();
        assert_eq!(listing.len(), source.len());
        for summary in &listing {
            let detail = block_on(source.get_category(summary.id)).unwrap();
            assert!(detail.clues.len() >= crate::consts::NUM_CLUES_PER_CAT);
        }
    }

    #[test]
    fn test_listing_respects_count() {
        let source = MemorySource::demo().unwrap();
        let listing = block_on(source.list_categories(2)).unwrap();
        assert_eq!(listing.len(), 2);
    }

    #[test]
    fn test_unknown_and_failing_ids() {
        let source = MemorySource::demo().unwrap().with_failure(1);
        assert!(matches!(
            block_on(source.get_category(9999)),
            Err(GameError::CategoryUnavailable { id: 9999 })
        ));
        assert!(matches!(
            block_on(source.get_category(1)),
            Err(GameError::Network(_))
        ));
        assert_eq!(source.fetched(), vec![9999, 1]);
    }
}
