use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::embedding::Embedder;

/// One row of the static movie dataset
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusMovie {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre: String,
    /// Comma-separated actor names
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl CorpusMovie {
    /// Search text combining every rankable field of the record
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title, self.overview, self.genre, self.cast
        )
    }
}

/// The static local movie dataset with precomputed embeddings.
///
/// Built once at startup and shared read-only across requests: records,
/// one embedding per record (same index), and the set of known actor
/// names derived from the cast column.
pub struct MovieCorpus {
    records: Vec<CorpusMovie>,
    embeddings: Vec<Vec<f32>>,
    known_actors: HashSet<String>,
}

impl MovieCorpus {
    /// Loads the dataset from a CSV file and embeds every record.
    /// Embedding the whole corpus is the slow part; it happens exactly once.
    pub fn load(path: &Path, embedder: &dyn Embedder) -> anyhow::Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| anyhow::anyhow!("Failed to open dataset {}: {}", path.display(), e))?;

        let records: Vec<CorpusMovie> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .map_err(|e| anyhow::anyhow!("Failed to parse dataset: {}", e))?;

        tracing::info!(records = records.len(), path = %path.display(), "Loaded movie dataset");

        Self::from_records(records, embedder)
    }

    /// Builds a corpus from in-memory records; also the test entry point
    pub fn from_records(
        records: Vec<CorpusMovie>,
        embedder: &dyn Embedder,
    ) -> anyhow::Result<Self> {
        let texts: Vec<String> = records.iter().map(CorpusMovie::search_text).collect();
        let embeddings = embedder.embed(texts)?;

        let known_actors = derive_known_actors(&records);

        tracing::info!(
            embeddings = embeddings.len(),
            known_actors = known_actors.len(),
            "Corpus embeddings precomputed"
        );

        Ok(Self {
            records,
            embeddings,
            known_actors,
        })
    }

    pub fn records(&self) -> &[CorpusMovie] {
        &self.records
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn known_actors(&self) -> &HashSet<String> {
        &self.known_actors
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every distinct trimmed lowercase name from the cast column
fn derive_known_actors(records: &[CorpusMovie]) -> HashSet<String> {
    let mut actors = HashSet::new();
    for record in records {
        for actor in record.cast.split(',') {
            let actor = actor.trim().to_lowercase();
            if !actor.is_empty() {
                actors.insert(actor);
            }
        }
    }
    actors
}
