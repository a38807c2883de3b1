use serde::{Deserialize, Serialize};

/// Name carried by the running best match before any user scored above zero.
pub const NOT_RECOGNIZED_NAME: &str = "Not recognized";

/// Similarity a match must reach to count as recognized.
pub const DEFAULT_RECOGNITION_THRESHOLD: f64 = 0.80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionMatch {
    user_id: String,
    name: String,
    similarity: f64,
}

impl RecognitionMatch {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, similarity: f64) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            similarity,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn similarity(&self) -> f64 {
        self.similarity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    Recognized(RecognitionMatch),
    NotRecognized { best_similarity: f64 },
}

impl RecognitionOutcome {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized(_))
    }

    pub fn best_similarity(&self) -> f64 {
        match self {
            Self::Recognized(m) => m.similarity(),
            Self::NotRecognized { best_similarity } => *best_similarity,
        }
    }
}
