use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Captures the two words following a negation marker, e.g.
/// "not johnny depp" -> ("johnny", "depp")
static NEGATED_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:not|without)\s+(\w+)\s+(\w+)").expect("negated name regex should compile")
});

/// Words that disqualify a two-word window from being a name candidate
const STOP_WORDS: [&str; 17] = [
    "movie", "movies", "film", "films", "with", "and", "not", "without", "like", "horror",
    "comedy", "funny", "pirate", "action", "drama", "romance", "romantic",
];

/// Candidate actor names pulled from a prompt, before catalog confirmation
#[derive(Debug, Default, PartialEq)]
pub struct ActorCandidates {
    pub included: BTreeSet<String>,
    pub excluded: BTreeSet<String>,
}

/// Generates actor-name candidates from all consecutive two-word windows of
/// the lowercased prompt.
///
/// Windows containing a stop word are discarded. Windows behind a negation
/// marker become excluded candidates (captured by regex); every other
/// surviving window is an included candidate. The two sets are disjoint by
/// construction.
///
/// Known quality ceiling: names that are not exactly two tokens, and
/// two-word phrases that collide with real names, are misclassified. This
/// behavior is intentional and pinned by tests.
pub fn actor_candidates(prompt: &str) -> ActorCandidates {
    let prompt = prompt.to_lowercase();
    let words: Vec<&str> = prompt.split_whitespace().collect();

    let excluded: BTreeSet<String> = NEGATED_NAME_PATTERN
        .captures_iter(&prompt)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
        .filter(|name| !contains_stop_word(name))
        .collect();

    let mut included = BTreeSet::new();
    for window in words.windows(2) {
        let (first, second) = (window[0], window[1]);
        if is_stop_word(first) || is_stop_word(second) {
            continue;
        }

        let name = format!("{} {}", first, second);
        if !excluded.contains(&name) {
            included.insert(name);
        }
    }

    ActorCandidates { included, excluded }
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

fn contains_stop_word(name: &str) -> bool {
    name.split_whitespace().any(is_stop_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_actors_survive_stop_word_filtering() {
        let candidates = actor_candidates("movie with Tom Hanks and Meg Ryan");
        assert!(candidates.included.contains("tom hanks"));
        assert!(candidates.included.contains("meg ryan"));
        assert!(candidates.excluded.is_empty());
    }

    #[test]
    fn test_negated_name_is_excluded_only() {
        let candidates = actor_candidates("a thriller but not Johnny Depp");
        assert!(candidates.excluded.contains("johnny depp"));
        assert!(!candidates.included.contains("johnny depp"));
    }

    #[test]
    fn test_without_marker_excludes() {
        let candidates = actor_candidates("anything without nicolas cage please");
        assert!(candidates.excluded.contains("nicolas cage"));
        assert!(!candidates.included.contains("nicolas cage"));
    }

    #[test]
    fn test_stop_words_never_form_candidates() {
        let candidates = actor_candidates("funny movie with horror and drama");
        assert!(candidates.included.is_empty());
        assert!(candidates.excluded.is_empty());
    }

    #[test]
    fn test_negated_genre_phrase_is_not_an_excluded_actor() {
        // "not horror movies" captures ("horror", "movies"), both stop words
        let candidates = actor_candidates("not horror movies");
        assert!(candidates.excluded.is_empty());
    }

    #[test]
    fn test_sets_are_disjoint() {
        let candidates = actor_candidates("Johnny Depp but not Johnny Depp");
        assert!(candidates.excluded.contains("johnny depp"));
        assert!(!candidates.included.contains("johnny depp"));
    }

    #[test]
    fn test_surrounding_words_leak_into_windows() {
        // Accepted imprecision of the two-word-window detector: neighbors of
        // a real name also become candidates and are weeded out later by the
        // catalog person lookup.
        let candidates = actor_candidates("great Tom Hanks performance");
        assert!(candidates.included.contains("tom hanks"));
        assert!(candidates.included.contains("great tom"));
        assert!(candidates.included.contains("hanks performance"));
    }
}
