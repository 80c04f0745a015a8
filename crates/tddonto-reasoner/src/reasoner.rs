//! 参照テーブルロー リーズナー

use crate::concept::Concept;
use crate::facade::{EntailmentQuery, Reasoner};
use crate::tableau::{Abox, KnowledgeBase, Tableau};
use crate::ReasonerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tddonto_core::{Axiom, CandidateAxiom, Class, ClassExpression, Entity, Ontology};
use tracing::debug;

/// Tableau reasoner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableauConfig {
    /// Expansion steps allowed for a single satisfiability test
    pub max_expansions: usize,
}

impl Default for TableauConfig {
    fn default() -> Self {
        Self {
            max_expansions: 100_000,
        }
    }
}

impl TableauConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Reference reasoner: ALC tableau over an owned ontology snapshot
///
/// The snapshot never changes, so its consistency is computed once and reused.
pub struct TableauReasoner {
    ontology: Ontology,
    kb: KnowledgeBase,
    config: TableauConfig,
    consistency: OnceLock<Result<bool, ReasonerError>>,
}

impl TableauReasoner {
    pub fn new(ontology: Ontology) -> Self {
        Self::with_config(ontology, TableauConfig::default())
    }

    pub fn with_config(ontology: Ontology, config: TableauConfig) -> Self {
        let kb = KnowledgeBase::from_ontology(&ontology);
        Self { ontology, kb, config, consistency: OnceLock::new() }
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn config(&self) -> &TableauConfig {
        &self.config
    }

    /// Whether the class expression can have instances
    pub fn is_satisfiable(&self, expr: &ClassExpression) -> Result<bool, ReasonerError> {
        self.check_signature(expr.entities())?;
        self.satisfiable_with(&self.kb, |abox| abox.anonymous.push(Concept::from_expression(expr)))
    }

    fn check_signature(&self, entities: BTreeSet<Entity>) -> Result<(), ReasonerError> {
        match entities.into_iter().find(|entity| !self.ontology.is_declared(entity)) {
            Some(missing) => Err(ReasonerError::UnknownEntity(missing)),
            None => Ok(()),
        }
    }

    fn satisfiable_with(&self, kb: &KnowledgeBase, extend: impl FnOnce(&mut Abox)) -> Result<bool, ReasonerError> {
        let mut abox = kb.abox.clone();
        extend(&mut abox);
        let mut tableau = Tableau::new(&kb.tbox, self.config.max_expansions);
        let result = tableau.is_satisfiable(&abox)?;
        debug!("Tableau finished after {} expansions: satisfiable = {}", tableau.expansions(), result);
        Ok(result)
    }

    fn consistent(&self, kb: &KnowledgeBase) -> Result<bool, ReasonerError> {
        self.satisfiable_with(kb, |_| {})
    }

    fn unsatisfiable_in(&self, kb: &KnowledgeBase, consistent: bool) -> Result<BTreeSet<Class>, ReasonerError> {
        let mut unsatisfiable = BTreeSet::new();
        unsatisfiable.insert(Class::Nothing);

        if !consistent {
            // every class is empty in an inconsistent ontology
            unsatisfiable.insert(Class::Thing);
            unsatisfiable.extend(self.ontology.named_classes().into_iter().map(Class::Named));
            return Ok(unsatisfiable);
        }

        for iri in self.ontology.named_classes() {
            let atom = Concept::Atom(iri.clone());
            if !self.satisfiable_with(kb, |abox| abox.anonymous.push(atom))? {
                unsatisfiable.insert(Class::Named(iri));
            }
        }
        Ok(unsatisfiable)
    }

    fn extended_with(&self, candidate: &CandidateAxiom) -> Result<KnowledgeBase, ReasonerError> {
        self.check_signature(candidate.entities())?;
        let mut kb = self.kb.clone();
        kb.add_axiom(&Axiom::from(candidate.clone()));
        Ok(kb)
    }

    fn subsumed(&self, sub: &ClassExpression, sup: &ClassExpression) -> Result<bool, ReasonerError> {
        let test = Concept::and(vec![Concept::from_expression(sub), Concept::negated_expression(sup)]);
        Ok(!self.satisfiable_with(&self.kb, |abox| abox.anonymous.push(test))?)
    }
}

impl Reasoner for TableauReasoner {
    fn is_declared(&self, entity: &Entity) -> bool {
        self.ontology.is_declared(entity)
    }

    fn is_consistent(&self) -> Result<bool, ReasonerError> {
        self.consistency
            .get_or_init(|| {
                debug!("Checking snapshot consistency");
                self.consistent(&self.kb)
            })
            .clone()
    }

    fn unsatisfiable_classes(&self) -> Result<BTreeSet<Class>, ReasonerError> {
        self.unsatisfiable_in(&self.kb, self.is_consistent()?)
    }

    fn is_entailed(&self, query: &EntailmentQuery) -> Result<bool, ReasonerError> {
        self.check_signature(query.entities())?;

        if !self.is_consistent()? {
            return Ok(true);
        }

        let entailed = match query {
            EntailmentQuery::SubClassOf(sub, sup) => self.subsumed(sub, sup)?,
            EntailmentQuery::EquivalentClasses(c, d) => self.subsumed(c, d)? && self.subsumed(d, c)?,
            EntailmentQuery::DisjointClasses(c, d) => {
                let both = Concept::and(vec![Concept::from_expression(c), Concept::from_expression(d)]);
                !self.satisfiable_with(&self.kb, |abox| abox.anonymous.push(both))?
            }
            EntailmentQuery::ClassAssertion(class, individual) => {
                let negated = Concept::negated_expression(class);
                !self.satisfiable_with(&self.kb, |abox| abox.assertions.push((individual.clone(), negated)))?
            }
            EntailmentQuery::SameIndividual(a, b) => {
                a == b || !self.satisfiable_with(&self.kb, |abox| abox.different.push((a.clone(), b.clone())))?
            }
            EntailmentQuery::DifferentIndividuals(a, b) => {
                !self.satisfiable_with(&self.kb, |abox| abox.same.push((a.clone(), b.clone())))?
            }
        };

        debug!("Entailment of {}: {}", query, entailed);
        Ok(entailed)
    }

    fn is_consistent_with(&self, candidate: &CandidateAxiom) -> Result<bool, ReasonerError> {
        let kb = self.extended_with(candidate)?;
        self.consistent(&kb)
    }

    fn unsatisfiable_classes_with(&self, candidate: &CandidateAxiom) -> Result<BTreeSet<Class>, ReasonerError> {
        let kb = self.extended_with(candidate)?;
        let consistent = self.consistent(&kb)?;
        self.unsatisfiable_in(&kb, consistent)
    }
}
