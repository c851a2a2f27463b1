//! Heuristic relevance scoring and snippet extraction
//!
//! Both functions are pure: no hidden state, no randomness, no
//! locale-sensitive comparison beyond simple lowercasing. Callers pass a
//! record's candidate text fields ordered by decreasing importance
//! (title-like field first); `None` entries are skipped but still count
//! toward the field positions, so importance weights stay stable for a
//! record type regardless of which optional fields are filled.

/// Characters of context kept on each side of a highlighted match
pub const SNIPPET_RADIUS: usize = 30;

/// Maximum highlight snippets returned per record
pub const MAX_HIGHLIGHTS: usize = 3;

/// Compute the relevance score of one record against a free-text query.
///
/// The weight of field `i` out of `n` is `n - i`. Per field:
/// an exact (case-insensitive) match adds `100 * weight`, a
/// case-sensitive prefix match adds `50 * weight`, and every search term
/// contained in the field adds `5 * weight`. The first field that
/// contains *all* search terms additionally earns `25 * weight`; that
/// bonus is awarded at most once per record. Zero means no term matched
/// anywhere.
pub fn relevance_score(query: &str, fields: &[Option<&str>]) -> u32 {
    let query_lower = query.to_lowercase();
    let terms: Vec<&str> = query_lower.split_whitespace().collect();
    if terms.is_empty() {
        return 0;
    }

    let total_fields = fields.len() as u32;
    let mut score = 0;
    let mut all_terms_awarded = false;

    for (index, field) in fields.iter().enumerate() {
        let Some(text) = field else { continue };
        let weight = total_fields - index as u32;
        let text_lower = text.to_lowercase();

        if text_lower == query_lower {
            score += 100 * weight;
        }
        if text.starts_with(query) {
            score += 50 * weight;
        }
        if !all_terms_awarded && terms.iter().all(|term| text_lower.contains(term)) {
            score += 25 * weight;
            all_terms_awarded = true;
        }
        for term in &terms {
            if text_lower.contains(term) {
                score += 5 * weight;
            }
        }
    }

    score
}

/// Extract up to [`MAX_HIGHLIGHTS`] snippets showing where search terms
/// hit, in field/term discovery order. Each snippet keeps up to
/// [`SNIPPET_RADIUS`] characters of context on either side, with `...`
/// marking truncation. Identical snippets are deduplicated.
pub fn extract_highlights(query: &str, fields: &[Option<&str>]) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let terms: Vec<&str> = query_lower.split_whitespace().collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut snippets: Vec<String> = Vec::new();
    for field in fields.iter().flatten() {
        let text_lower = field.to_lowercase();
        for term in &terms {
            if let Some(position) = text_lower.find(term) {
                let snippet = snippet_around(field, position, term.len());
                if !snippets.contains(&snippet) {
                    snippets.push(snippet);
                    if snippets.len() == MAX_HIGHLIGHTS {
                        return snippets;
                    }
                }
            }
        }
    }

    snippets
}

/// Cut a context window around a match. The match offsets come from the
/// lowercased copy of the text; nudge them onto char boundaries of the
/// original so multibyte text never splits a character.
fn snippet_around(text: &str, match_start: usize, match_len: usize) -> String {
    let mut start = match_start.min(text.len());
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (start + match_len).min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }

    let before: Vec<char> = text[..start].chars().collect();
    let after: Vec<char> = text[end..].chars().collect();
    let kept_from = before.len().saturating_sub(SNIPPET_RADIUS);

    let mut snippet = String::new();
    if kept_from > 0 {
        snippet.push_str("...");
    }
    snippet.extend(before[kept_from..].iter());
    snippet.push_str(&text[start..end]);
    snippet.extend(after.iter().take(SNIPPET_RADIUS));
    if after.len() > SNIPPET_RADIUS {
        snippet.push_str("...");
    }

    snippet
}
