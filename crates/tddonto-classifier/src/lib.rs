//! # TDDOnto Classifier
//!
//! Test-driven ontology authoring
//! Classifies candidate axioms against a background ontology before they are added

pub mod config;
pub mod health;
pub mod classifier;
pub mod concurrent;
pub mod suite;
pub mod acceptance;

pub use config::ClassifierConfig;
pub use health::OntologyHealth;
pub use classifier::AxiomClassifier;
pub use concurrent::classify_concurrent;
pub use suite::{TestRecord, TestSuite};
pub use acceptance::OntologyDocument;

use tddonto_core::ModelError;
use tddonto_reasoner::ReasonerError;
use thiserror::Error;

/// Classification errors
///
/// Health failures and missing entities are outcomes, not errors.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Invalid candidate axiom: {0}")]
    InvalidCandidate(#[from] ModelError),

    #[error("No classification rule for axiom type: {0}")]
    UnsupportedAxiom(String),

    #[error("Reasoner failure: {0}")]
    Reasoner(#[from] ReasonerError),
}

/// Errors while accepting a tested candidate into an ontology
#[derive(Error, Debug)]
pub enum AcceptError {
    #[error("No test at index {0}")]
    NoSuchTest(usize),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
