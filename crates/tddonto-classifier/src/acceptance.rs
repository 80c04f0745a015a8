//! テスト済み公理をオントロジーへ追加する

use crate::AcceptError;
use tddonto_core::{Axiom, Ontology};
use tracing::info;

/// Editable ontology that accepted candidates are written into
pub trait OntologyDocument {
    fn apply(&mut self, axiom: Axiom) -> Result<(), AcceptError>;
}

impl OntologyDocument for Ontology {
    fn apply(&mut self, axiom: Axiom) -> Result<(), AcceptError> {
        info!("Adding {} axiom to ontology", axiom.kind());
        self.add_axiom(axiom);
        Ok(())
    }
}
