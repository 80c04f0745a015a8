//! 並行バッチ分類

use crate::classifier::AxiomClassifier;
use crate::config::ClassifierConfig;
use crate::ClassifyError;
use futures::future::try_join_all;
use std::sync::Arc;
use tddonto_core::{CandidateAxiom, Outcome};
use tddonto_reasoner::{Reasoner, ReasonerError};
use tokio::task::JoinError;
use tracing::{info, warn};

fn join_error(e: JoinError) -> ClassifyError {
    ClassifyError::Reasoner(ReasonerError::Internal(format!("classification task failed: {}", e)))
}

/// Classify a batch on the blocking thread pool, one task per candidate
///
/// Health is assessed once, as in `AxiomClassifier::classify_batch`.
/// Outcomes are returned in input order.
pub async fn classify_concurrent<R>(
    reasoner: Arc<R>,
    candidates: Vec<CandidateAxiom>,
    config: ClassifierConfig,
) -> Result<Vec<Outcome>, ClassifyError>
where
    R: Reasoner + Send + Sync + 'static,
{
    info!("Classifying {} candidates concurrently", candidates.len());
    let classifier = Arc::new(AxiomClassifier::with_config(reasoner, config));

    let health = {
        let classifier = Arc::clone(&classifier);
        tokio::task::spawn_blocking(move || classifier.health())
            .await
            .map_err(join_error)??
    };
    if let Some(outcome) = health.as_outcome() {
        warn!("Background ontology failed preconditions, every candidate is {}", outcome);
        return Ok(vec![outcome; candidates.len()]);
    }

    let tasks = candidates.into_iter().map(|candidate| {
        let classifier = Arc::clone(&classifier);
        tokio::task::spawn_blocking(move || classifier.classify_on_healthy(&candidate))
    });

    let results = try_join_all(tasks).await.map_err(join_error)?;
    results.into_iter().collect()
}
