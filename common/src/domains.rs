use std::collections::HashSet;

/// Prefixes every domain with every word (`word.domain`), domain-major.
///
/// With no words the domains pass through untouched.
pub fn combine(domains: &[String], words: &[String]) -> Vec<String> {
    if words.is_empty() {
        return domains.to_vec();
    }

    domains
        .iter()
        .flat_map(|domain| words.iter().map(move |word| format!("{word}.{domain}")))
        .collect()
}

/// Drops repeated names, keeping each at its first position.
pub fn dedup(domains: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    domains.into_iter().filter(|domain| seen.insert(domain.clone())).collect()
}
