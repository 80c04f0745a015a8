//! 背景オントロジーの健全性 (前提条件) チェック

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tddonto_core::{Class, Outcome};
use tddonto_reasoner::{Reasoner, ReasonerError};
use tracing::{debug, warn};

/// Verdict on the background ontology, computed before any candidate is tested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OntologyHealth {
    Healthy,
    Inconsistent,
    /// More classes than `owl:Nothing` are unsatisfiable
    Incoherent { unsatisfiable: BTreeSet<Class> },
}

impl OntologyHealth {
    /// Consistency first, then coherence
    pub fn assess<R: Reasoner + ?Sized>(reasoner: &R) -> Result<Self, ReasonerError> {
        if !reasoner.is_consistent()? {
            warn!("Background ontology is inconsistent");
            return Ok(OntologyHealth::Inconsistent);
        }

        let unsatisfiable = reasoner.unsatisfiable_classes()?;
        if unsatisfiable.len() > 1 {
            warn!("Background ontology is incoherent: {} unsatisfiable classes", unsatisfiable.len());
            return Ok(OntologyHealth::Incoherent { unsatisfiable });
        }

        debug!("Background ontology is healthy");
        Ok(OntologyHealth::Healthy)
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, OntologyHealth::Healthy)
    }

    /// Outcome every candidate receives under this verdict; `None` when healthy
    pub fn as_outcome(&self) -> Option<Outcome> {
        match self {
            OntologyHealth::Healthy => None,
            OntologyHealth::Inconsistent => Some(Outcome::Inconsistent),
            OntologyHealth::Incoherent { .. } => Some(Outcome::Incoherent),
        }
    }
}
