use std::collections::BTreeSet;

use crate::models::GenreMap;

/// Minimum Jaro-Winkler similarity for a prompt token to count as a genre
const FUZZY_GENRE_CUTOFF: f64 = 0.85;

/// Words that flip a genre mention into an exclusion
pub const NEGATION_WORDS: [&str; 2] = ["not", "without"];

/// Extracts included and excluded genre ids from a prompt.
///
/// A genre matches on case-insensitive containment, or on a fuzzy token
/// match above the cutoff (catches "comedey", "horor" and similar typos).
/// A match preceded by "not " or "without " is excluded, otherwise included;
/// negation wins, so a genre is never in both sets.
pub fn extract_genres(prompt: &str, genres: &GenreMap) -> (BTreeSet<u64>, BTreeSet<u64>) {
    let mut included = BTreeSet::new();
    let mut excluded = BTreeSet::new();
    let prompt = prompt.to_lowercase();
    let tokens: Vec<&str> = prompt.split_whitespace().collect();

    for (name, &id) in genres.iter() {
        if prompt.contains(&format!("not {}", name)) || prompt.contains(&format!("without {}", name))
        {
            excluded.insert(id);
        } else if prompt.contains(name.as_str()) {
            included.insert(id);
        } else if let Some(position) = fuzzy_token_position(&tokens, name) {
            let negated = position > 0 && NEGATION_WORDS.contains(&tokens[position - 1]);
            if negated {
                excluded.insert(id);
            } else {
                included.insert(id);
            }
        }
    }

    (included, excluded)
}

/// Index of the first prompt token within the fuzzy cutoff of the genre name
fn fuzzy_token_position(tokens: &[&str], genre_name: &str) -> Option<usize> {
    tokens
        .iter()
        .position(|token| strsim::jaro_winkler(token, genre_name) >= FUZZY_GENRE_CUTOFF)
}
