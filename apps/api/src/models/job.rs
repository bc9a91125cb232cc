use serde::{Deserialize, Serialize};

use crate::matching::gap_analysis::GapAnalysis;

/// A job posting as supplied by the caller for scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit requirements, when the posting source provides them.
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub gap_analysis: Option<GapAnalysis>,
}

impl JobPosting {
    /// Description text, treating whitespace-only as absent.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}
