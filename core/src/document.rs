use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocumentId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Active,
    Irrelevant,
    Banned,
    Removed,
}

/// One ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document { id, relevance, rating }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Per-document data fixed at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Integer mean of `ratings`, truncated toward zero; 0 when empty.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates() {
        assert_eq!(compute_average_rating(&[1, 2, 3]), 2);
        assert_eq!(compute_average_rating(&[5, 12, 0]), 5);
        assert_eq!(compute_average_rating(&[-7, 2]), -2);
        assert_eq!(compute_average_rating(&[]), 0);
    }

    #[test]
    fn document_display() {
        let doc = Document::new(42, 0.5, 2);
        assert_eq!(doc.to_string(), "{ document_id = 42, relevance = 0.5, rating = 2 }");
    }
}
