use serde::{Deserialize, Serialize};

use crate::matching::comparison::SkillComparison;

/// Required / nice-to-have / matched / missing skills for one candidate–job pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

impl GapAnalysis {
    /// Partial matches are reported as matched; only `missing` counts as a gap.
    pub fn from_comparison(
        required_skills: &[String],
        comparison: &SkillComparison,
        nice_to_have_skills: Vec<String>,
    ) -> Self {
        Self {
            required_skills: required_skills.to_vec(),
            nice_to_have_skills,
            matched_skills: comparison
                .matched
                .iter()
                .chain(&comparison.partial)
                .cloned()
                .collect(),
            missing_skills: comparison.missing.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::comparison::compare_skills;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partial_matches_are_not_gaps() {
        let required = skills(&["React Native", "AWS", "TypeScript"]);
        let comparison = compare_skills(&skills(&["React", "TS"]), &required);

        let gap = GapAnalysis::from_comparison(&required, &comparison, skills(&["GraphQL"]));
        assert_eq!(gap.required_skills, required);
        assert_eq!(gap.matched_skills, skills(&["TypeScript", "React Native"]));
        assert_eq!(gap.missing_skills, skills(&["AWS"]));
        assert_eq!(gap.nice_to_have_skills, skills(&["GraphQL"]));
    }

    #[test]
    fn test_deserializes_with_missing_fields() {
        let gap: GapAnalysis =
            serde_json::from_str(r#"{"required_skills": ["Rust"]}"#).unwrap();
        assert_eq!(gap.required_skills, skills(&["Rust"]));
        assert!(gap.missing_skills.is_empty());
    }
}
