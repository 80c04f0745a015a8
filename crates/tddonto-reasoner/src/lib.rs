//! 記述論理リーズナー
//!
//! ファサードトレイト `Reasoner` と参照実装 `TableauReasoner` (ALC テーブルロー)

pub mod facade;
pub mod concept;
pub mod tableau;
pub mod reasoner;

pub use facade::{EntailmentQuery, Reasoner};
pub use concept::Concept;
pub use tableau::{Abox, KnowledgeBase, Tableau, Tbox};
pub use reasoner::{TableauConfig, TableauReasoner};

use tddonto_core::Entity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReasonerError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(Entity),
    #[error("Reasoning budget of {limit} expansions exhausted")]
    ResourceExhausted { limit: usize },
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("Internal reasoner error: {0}")]
    Internal(String),
}
