// src/specs/sources.rs

/// Which elements a site puts its answer lists in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceProfile {
    pub name: &'static str,
    pub selectors: &'static [&'static str],
}

/// TechRadar's "past answers" article: list items, paragraphs, table cells
/// and inline emphasis.
pub const TECHRADAR: SourceProfile = SourceProfile {
    name: "techradar",
    selectors: &["li", "p", "td", "strong", "em", "span"],
};

/// WordFinder's archive also links each answer.
pub const WORDFINDER: SourceProfile = SourceProfile {
    name: "wordfinder",
    selectors: &["li", "p", "td", "strong", "em", "span", "a"],
};

/// Used for configured sources we have no dedicated profile for.
pub const GENERIC: SourceProfile = SourceProfile {
    name: "generic",
    selectors: TECHRADAR.selectors,
};

pub fn profile_for(source_name: &str) -> &'static SourceProfile {
    match source_name.to_ascii_lowercase().as_str() {
        "techradar" => &TECHRADAR,
        "wordfinder" => &WORDFINDER,
        _ => &GENERIC,
    }
}
