//! TDDOnto コアデータモデル
//!
//! このクレートは以下を提供します:
//! - OWL エンティティとクラス式 (ALC の構成子)
//! - 背景オントロジーの公理とシグネチャ
//! - 候補公理 (テスト対象) と判定結果

pub mod model;
pub mod candidate;

pub use model::{Axiom, Class, ClassExpression, Entity, Individual, Ontology, OwlIri, PropertyExpression};
pub use candidate::{CandidateAxiom, Outcome};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{kind} requires at least {expected} operands, found {found}")]
    Arity {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported axiom type: {0}")]
    UnsupportedAxiom(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
