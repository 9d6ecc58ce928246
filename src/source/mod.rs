//! Remote trivia source
//!
//! The game only ever reads two things from the outside world: a pool of
//! category listings and the full clue set of a single category. Both sit
//! behind [`TriviaSource`] so the lifecycle can run against the browser's
//! `fetch` or an in-memory data set.

#[cfg(target_arch = "wasm32")]
pub mod http;
pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use http::HttpSource;
pub use memory::MemorySource;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

use crate::error::Result;

/// Identifier of a remote category
pub type CategoryId = u64;

/// One entry of the category listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub clues_count: Option<u32>,
}

/// A category with every clue the source knows about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub clues: Vec<RawClue>,
}

impl CategoryDetail {
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            title: self.title.clone(),
            clues_count: u32::try_from(self.clues.len()).ok(),
        }
    }
}

/// A clue as delivered by the source, before sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClue {
    #[serde(deserialize_with = "text_or_scalar")]
    pub question: String,
    /// Some answers arrive as bare numbers (`"answer": 4`)
    #[serde(deserialize_with = "text_or_scalar")]
    pub answer: String,
    #[serde(default)]
    pub value: Option<u32>,
}

fn text_or_scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// Read-only access to a trivia catalogue
#[allow(async_fn_in_trait)]
pub trait TriviaSource {
    /// List up to `count` categories to sample from
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>>;

    /// Fetch one category with all of its clues
    async fn get_category(&self, id: CategoryId) -> Result<CategoryDetail>;
}

/// `GET {base}categories?count={count}`
pub fn categories_url(base: &str, count: usize) -> String {
    format!("{}categories?count={}", with_trailing_slash(base), count)
}

/// `GET {base}category?id={id}`
pub fn category_url(base: &str, id: CategoryId) -> String {
    format!("{}category?id={}", with_trailing_slash(base), id)
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}
