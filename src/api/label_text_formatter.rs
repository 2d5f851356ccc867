use smallvec::SmallVec;

use super::chart_options::LabelWrapRules;

pub const ELLIPSIS: &str = "...";

/// Wrapped label lines; bubble labels rarely need more than four.
pub type LabelLines = SmallVec<[String; 4]>;

/// Shortest decimal form of `value` (`47`, `12.5`); negative zero prints as `0`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    format!("{value}")
}

/// `47` → `47%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_value(value))
}

/// `("No benefit", 8)` → `No benefit (8%)`.
#[must_use]
pub fn format_named_percent(name: &str, value: f64) -> String {
    format!("{name} ({})", format_percent(value))
}

/// Cuts categories longer than the threshold and appends an ellipsis.
#[must_use]
pub fn truncate_category(category: &str, rules: LabelWrapRules) -> String {
    if category.chars().count() > rules.truncate_threshold {
        let mut truncated: String = category.chars().take(rules.truncate_length).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        category.to_owned()
    }
}

/// Truncates, then greedily packs space-separated words into lines of at
/// most `wrap_width` characters. A word longer than the width keeps a line
/// of its own. Empty words (from repeated spaces) are preserved, so a line
/// may come back empty.
#[must_use]
pub fn wrap_category_label(category: &str, rules: LabelWrapRules) -> LabelLines {
    let truncated = truncate_category(category, rules);
    let mut lines = LabelLines::new();
    for word in truncated.split(' ') {
        let fits_last = lines.last().is_some_and(|last: &String| {
            !last.is_empty() && last.chars().count() + 1 + word.chars().count() <= rules.wrap_width
        });
        match lines.last_mut() {
            Some(last) if fits_last => {
                last.push(' ');
                last.push_str(word);
            }
            _ => lines.push(word.to_owned()),
        }
    }
    lines
}
