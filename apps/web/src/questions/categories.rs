//! Category recognition for generated markdown.
//!
//! Model output is accepted as-is; this module only reports which of the
//! five requested categories can be found so the generator can log gaps.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Technical,
    Domain,
    Behavioral,
    ProblemSolving,
    CareerGoals,
}

pub const CATEGORIES: [Category; 5] = [
    Category::Technical,
    Category::Domain,
    Category::Behavioral,
    Category::ProblemSolving,
    Category::CareerGoals,
];

impl Category {
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Technical => &["technical"],
            Category::Domain => &["domain"],
            Category::Behavioral => &["behavio", "soft skill"],
            Category::ProblemSolving => &["problem"],
            Category::CareerGoals => &["career", "motivation", "goal"],
        }
    }

    fn matches(self, heading: &str) -> bool {
        let lower = heading.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(k))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Technical => "Technical experience",
            Category::Domain => "Domain knowledge",
            Category::Behavioral => "Behavioral and soft skills",
            Category::ProblemSolving => "Problem-solving",
            Category::CareerGoals => "Career goals and motivations",
        };
        f.write_str(label)
    }
}

/// Returns the heading text if `line` reads as a section heading:
/// an ATX heading (`## ...`) or a line that opens with bold text,
/// optionally behind a list number (`1. **Technical**`).
fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return Some(trimmed.trim_start_matches('#').trim());
    }
    let unnumbered = trimmed
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches(['.', ')'])
        .trim_start();
    if unnumbered.starts_with("**") || unnumbered.starts_with("__") {
        let inner = unnumbered.trim_matches(|c: char| c == '*' || c == '_' || c == ':').trim();
        // A bold lead-in followed by a long sentence is a question, not a heading.
        if inner.ends_with('?') {
            return None;
        }
        return Some(inner);
    }
    None
}

fn is_question_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || heading_text(trimmed).is_some() {
        return false;
    }
    let bullet = trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ");
    let numbered = trimmed
        .split_once(['.', ')'])
        .map(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);
    bullet || numbered || trimmed.ends_with('?')
}

/// Number of question lines found under each recognised category heading,
/// in document order. A category appearing twice is counted once per heading.
pub fn questions_per_category(markdown: &str) -> Vec<(Category, usize)> {
    let mut sections: Vec<(Category, usize)> = Vec::new();
    for line in markdown.lines() {
        if let Some(heading) = heading_text(line) {
            if let Some(category) = CATEGORIES.iter().copied().find(|c| c.matches(heading)) {
                sections.push((category, 0));
            }
            continue;
        }
        if is_question_line(line) {
            if let Some((_, count)) = sections.last_mut() {
                *count += 1;
            }
        }
    }
    sections
}

/// Categories with no recognisable heading in `markdown`.
pub fn missing_categories(markdown: &str) -> Vec<Category> {
    let found = questions_per_category(markdown);
    CATEGORIES
        .iter()
        .copied()
        .filter(|c| !found.iter().any(|(f, _)| f == c))
        .collect()
}
