//! Skill comparison: classifies each required skill as matched, partial or
//! missing against a candidate's skills and derives a 0–100 match percentage.
//!
//! Algorithm:
//! 1. Variation sets are computed once per candidate skill.
//! 2. For each required skill, in input order:
//!    - any candidate variation equals a required variation → matched
//!    - else any candidate variation is a substring of (or contains) the
//!      required skill's normalized form → partial (half credit)
//!    - else → missing
//! 3. match_percentage = round((matched + 0.5 × partial) / total × 100)
//!
//! The substring fallback catches "React" vs "React Native" but also lets
//! short tokens over-match ("go" inside "mongodb").

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::skills::{get_variations, normalize_skill};

/// Per-skill breakdown of a candidate vs job comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillComparison {
    pub matched: Vec<String>,
    pub partial: Vec<String>,
    pub missing: Vec<String>,
    pub match_percentage: u32, // 0 – 100
    pub total: usize,
}

/// Skills that normalize to nothing (e.g. "!!!") never match: such a candidate
/// skill is ignored and such a required skill is always missing.
pub fn compare_skills(candidate_skills: &[String], required_skills: &[String]) -> SkillComparison {
    if candidate_skills.is_empty() || required_skills.is_empty() {
        return SkillComparison {
            missing: required_skills.to_vec(),
            total: required_skills.len(),
            ..Default::default()
        };
    }

    // Empty normalized forms would be a substring of everything.
    let candidate_variations: Vec<HashSet<String>> = candidate_skills
        .iter()
        .map(|skill| get_variations(skill))
        .filter(|variations| !variations.contains(""))
        .collect();

    let mut matched = Vec::new();
    let mut partial = Vec::new();
    let mut missing = Vec::new();

    for required in required_skills {
        let required_normalized = normalize_skill(required);
        if required_normalized.is_empty() {
            missing.push(required.clone());
            continue;
        }
        let required_variations = get_variations(required);

        let is_match = candidate_variations
            .iter()
            .any(|cv| !cv.is_disjoint(&required_variations));

        if is_match {
            matched.push(required.clone());
            continue;
        }

        let is_partial = candidate_variations.iter().flatten().any(|variation| {
            required_normalized.contains(variation.as_str())
                || variation.contains(required_normalized.as_str())
        });

        if is_partial {
            partial.push(required.clone());
        } else {
            missing.push(required.clone());
        }
    }

    let total = required_skills.len();
    let match_percentage =
        compute_match_percentage(matched.len(), partial.len(), total);

    SkillComparison {
        matched,
        partial,
        missing,
        match_percentage,
        total,
    }
}

/// Partial matches earn half credit. Rounds half up.
fn compute_match_percentage(matched: usize, partial: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let credit = matched as f64 + partial as f64 * 0.5;
    ((credit / total as f64) * 100.0).round() as u32
}
