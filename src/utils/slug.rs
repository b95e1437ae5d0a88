//! URL slugs for news articles

const MAX_SLUG_CHARS: usize = 100;

fn is_thai(c: char) -> bool {
    ('\u{0E00}'..='\u{0E7F}').contains(&c)
}

/// Slug for a (possibly Thai) title.
///
/// Lowercases, keeps Thai characters and ASCII letters/digits, turns runs of
/// whitespace, underscores and dashes into one `-`, drops everything else and
/// caps the result at 100 characters without a trailing dash.
pub fn create_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || is_thai(c) {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        }
    }

    let truncated: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    truncated.trim_end_matches('-').to_string()
}
