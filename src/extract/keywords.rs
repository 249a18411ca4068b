use std::collections::BTreeSet;

use crate::services::providers::CatalogProvider;

/// Trigger word in the prompt -> keyword term to resolve against the catalog
pub const KEYWORD_TRIGGERS: [(&str, &str); 6] = [
    ("pirate", "pirates"),
    ("space", "space"),
    ("robot", "robot"),
    ("superhero", "superhero"),
    ("spy", "spy"),
    ("underwater", "underwater"),
];

/// Resolves keyword ids for every trigger word present in the prompt.
///
/// Each hit costs one catalog keyword search; only the first result is
/// taken. Empty results and lookup failures are silently skipped.
pub async fn extract_keywords(prompt: &str, provider: &dyn CatalogProvider) -> BTreeSet<u64> {
    let prompt = prompt.to_lowercase();
    let mut keyword_ids = BTreeSet::new();

    for (trigger, term) in KEYWORD_TRIGGERS {
        if !prompt.contains(trigger) {
            continue;
        }

        match provider.search_keyword(term).await {
            Ok(Some(id)) => {
                keyword_ids.insert(id);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, term = %term, "Keyword lookup failed, skipping");
            }
        }
    }

    keyword_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockCatalogProvider;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_trigger_resolves_to_first_keyword_id() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_keyword()
            .with(eq("pirates"))
            .times(1)
            .returning(|_| Ok(Some(9663)));

        let ids = extract_keywords("a pirate adventure", &provider).await;
        assert_eq!(ids, [9663].into_iter().collect());
    }

    #[tokio::test]
    async fn test_no_trigger_no_lookup() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_keyword().times(0);

        let ids = extract_keywords("a quiet family drama", &provider).await;
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_is_skipped() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_keyword()
            .with(eq("underwater"))
            .returning(|_| Ok(None));

        let ids = extract_keywords("underwater thriller", &provider).await;
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_swallowed() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_keyword()
            .with(eq("space"))
            .returning(|_| Err(AppError::ExternalApi("rate limited".to_string())));
        provider
            .expect_search_keyword()
            .with(eq("robot"))
            .returning(|_| Ok(Some(14544)));

        let ids = extract_keywords("space robot movie", &provider).await;
        assert_eq!(ids, [14544].into_iter().collect());
    }
}
