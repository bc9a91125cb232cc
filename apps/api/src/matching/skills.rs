//! Skill normalization and the static alias ("variation") table.
//!
//! Aliases are stored in normalized form so a lookup is a plain string
//! comparison after `normalize_skill`.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Canonical skill → known aliases. Both sides are already normalized.
static SKILL_VARIATIONS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let table: &[(&'static str, &'static [&'static str])] = &[
        ("javascript", &["js", "ecmascript", "es6", "vanillajs"]),
        ("typescript", &["ts"]),
        ("nodejs", &["node", "nodejsruntime"]),
        ("react", &["reactjs"]),
        ("vue", &["vuejs", "vue3"]),
        ("angular", &["angularjs"]),
        ("nextjs", &["next"]),
        ("python", &["py", "python3"]),
        ("golang", &["go"]),
        ("c#", &["csharp", "dotnet", "net"]),
        ("c++", &["cpp"]),
        ("postgresql", &["postgres", "psql"]),
        ("mongodb", &["mongo"]),
        ("kubernetes", &["k8s"]),
        ("aws", &["amazonwebservices"]),
        ("gcp", &["googlecloud", "googlecloudplatform"]),
        ("azure", &["microsoftazure"]),
        ("machinelearning", &["ml"]),
        ("artificialintelligence", &["ai"]),
        ("cicd", &["continuousintegration", "continuousdelivery"]),
        ("html", &["html5"]),
        ("css", &["css3"]),
        ("graphql", &["gql"]),
        ("rest", &["restapi", "restful"]),
    ];
    table.iter().copied().collect()
});

/// Lowercases, trims and keeps only `a-z`, `0-9`, `+` and `#`.
///
/// Total and idempotent; punctuation-only input yields an empty string.
pub fn normalize_skill(skill: &str) -> String {
    skill
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '+' || *c == '#')
        .collect()
}

/// Returns the normalized skill plus every canonical name and alias it is
/// linked to through the variation table.
pub fn get_variations(skill: &str) -> HashSet<String> {
    let normalized = normalize_skill(skill);
    let mut variations = HashSet::new();

    for (canonical, aliases) in SKILL_VARIATIONS.iter() {
        if *canonical == normalized || aliases.contains(&normalized.as_str()) {
            variations.insert(canonical.to_string());
            variations.extend(aliases.iter().map(|a| a.to_string()));
        }
    }

    variations.insert(normalized);
    variations
}
