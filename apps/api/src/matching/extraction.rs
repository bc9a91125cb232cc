//! Blunt, recall-oriented skill prefilter for job descriptions.

/// Vocabulary scanned for in job descriptions. Matching is a lowercase
/// substring test, so short entries ("Go", "Java") over-match on purpose.
pub const COMMON_SKILLS: &[&str] = &[
    // Languages
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "SQL",
    // Frontend / backend frameworks
    "React",
    "Angular",
    "Vue",
    "Next.js",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "GraphQL",
    "REST",
    "HTML",
    "CSS",
    "Tailwind",
    // Cloud & infrastructure
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Terraform",
    "CI/CD",
    "Git",
    "Linux",
    // Data
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Kafka",
    "Machine Learning",
    "Data Analysis",
    "TensorFlow",
    "PyTorch",
    // Ways of working
    "Agile",
    "Scrum",
    "Leadership",
    "Communication",
    "Project Management",
    "Problem Solving",
    "Teamwork",
];

/// Returns every vocabulary entry whose lowercase form occurs in the
/// lowercased description, in vocabulary order.
pub fn extract_skills_from_description(description: Option<&str>) -> Vec<String> {
    let description = match description {
        Some(d) if !d.trim().is_empty() => d.to_lowercase(),
        _ => return Vec::new(),
    };

    COMMON_SKILLS
        .iter()
        .filter(|skill| description.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_empty_yield_nothing() {
        assert!(extract_skills_from_description(None).is_empty());
        assert!(extract_skills_from_description(Some("")).is_empty());
        assert!(extract_skills_from_description(Some("   \n")).is_empty());
    }

    #[test]
    fn test_finds_skills_case_insensitively() {
        let skills = extract_skills_from_description(Some(
            "We need a DOCKER wizard with kubernetes and PostgreSQL experience.",
        ));
        assert!(skills.contains(&"Docker".to_string()));
        assert!(skills.contains(&"Kubernetes".to_string()));
        assert!(skills.contains(&"PostgreSQL".to_string()));
        assert!(!skills.contains(&"Python".to_string()));
    }

    #[test]
    fn test_substring_matching_is_blunt() {
        // "javascript" contains "java"; both are reported.
        let skills = extract_skills_from_description(Some("Senior JavaScript developer"));
        assert!(skills.contains(&"JavaScript".to_string()));
        assert!(skills.contains(&"Java".to_string()));
    }

    #[test]
    fn test_preserves_vocabulary_order() {
        let skills = extract_skills_from_description(Some("rust, then python, then aws"));
        let py = skills.iter().position(|s| s == "Python").unwrap();
        let rs = skills.iter().position(|s| s == "Rust").unwrap();
        let aws = skills.iter().position(|s| s == "AWS").unwrap();
        assert!(py < rs && rs < aws);
    }

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        let mut lower: Vec<String> = COMMON_SKILLS.iter().map(|s| s.to_lowercase()).collect();
        lower.sort();
        lower.dedup();
        assert_eq!(lower.len(), COMMON_SKILLS.len());
    }
}
