//! 候補公理の分類

use crate::config::ClassifierConfig;
use crate::health::OntologyHealth;
use crate::ClassifyError;
use itertools::Itertools;
use tddonto_core::{Axiom, CandidateAxiom, ClassExpression, ModelError, Outcome};
use tddonto_reasoner::{EntailmentQuery, Reasoner, ReasonerError};
use tracing::{debug, info, warn};

/// Classifies candidate axioms against the reasoner's ontology snapshot
///
/// Every call is a pure function of (snapshot, candidate); nothing is cached
/// between calls and the snapshot is never modified.
pub struct AxiomClassifier<R> {
    reasoner: R,
    config: ClassifierConfig,
}

impl<R: Reasoner> AxiomClassifier<R> {
    pub fn new(reasoner: R) -> Self {
        Self::with_config(reasoner, ClassifierConfig::default())
    }

    pub fn with_config(reasoner: R, config: ClassifierConfig) -> Self {
        Self { reasoner, config }
    }

    pub fn reasoner(&self) -> &R {
        &self.reasoner
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Precondition verdict on the background ontology
    pub fn health(&self) -> Result<OntologyHealth, ClassifyError> {
        Ok(OntologyHealth::assess(&self.reasoner)?)
    }

    /// Classify one candidate
    pub fn classify(&self, candidate: &CandidateAxiom) -> Result<Outcome, ClassifyError> {
        candidate.validate()?;
        if self.has_missing_entity(candidate) {
            return Ok(Outcome::MissingEntity);
        }

        if let Some(outcome) = self.health()?.as_outcome() {
            return Ok(outcome);
        }

        self.classify_on_healthy(candidate)
    }

    /// Classify a background-shaped axiom; property axioms have no classification rule
    pub fn classify_axiom(&self, axiom: &Axiom) -> Result<Outcome, ClassifyError> {
        let candidate = CandidateAxiom::try_from(axiom.clone()).map_err(|e| match e {
            ModelError::UnsupportedAxiom(kind) => ClassifyError::UnsupportedAxiom(kind),
            other => ClassifyError::InvalidCandidate(other),
        })?;
        self.classify(&candidate)
    }

    /// Classify many candidates against one health verdict
    ///
    /// An unhealthy background gives every candidate the same outcome.
    pub fn classify_batch(&self, candidates: &[CandidateAxiom]) -> Result<Vec<Outcome>, ClassifyError> {
        info!("Classifying batch of {} candidates", candidates.len());

        let health = self.health()?;
        if let Some(outcome) = health.as_outcome() {
            warn!("Background ontology failed preconditions, every candidate is {}", outcome);
            return Ok(vec![outcome; candidates.len()]);
        }

        let outcomes = candidates.iter()
            .map(|candidate| self.classify_on_healthy(candidate))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Batch complete: {} entailed", outcomes.iter().filter(|o| **o == Outcome::Entailed).count());
        Ok(outcomes)
    }

    /// Classification once the background is known to be healthy
    pub(crate) fn classify_on_healthy(&self, candidate: &CandidateAxiom) -> Result<Outcome, ClassifyError> {
        candidate.validate()?;
        if self.has_missing_entity(candidate) {
            return Ok(Outcome::MissingEntity);
        }

        match self.evaluate(candidate) {
            Ok(outcome) => {
                debug!("{} -> {}", candidate, outcome);
                Ok(outcome)
            }
            Err(ReasonerError::UnknownEntity(entity)) => {
                debug!("Reasoner does not know {}, {} is missing an entity", entity, candidate);
                Ok(Outcome::MissingEntity)
            }
            Err(e) => Err(ClassifyError::Reasoner(e)),
        }
    }

    fn has_missing_entity(&self, candidate: &CandidateAxiom) -> bool {
        match candidate.entities().into_iter().find(|entity| !self.reasoner.is_declared(entity)) {
            Some(entity) => {
                debug!("Undeclared entity {} in {}", entity, candidate);
                true
            }
            None => false,
        }
    }

    fn evaluate(&self, candidate: &CandidateAxiom) -> Result<Outcome, ReasonerError> {
        let failing = self.unentailed_parts(candidate)?;
        if failing.is_empty() {
            return Ok(Outcome::Entailed);
        }
        if !self.config.check_additions {
            return Ok(Outcome::Absent);
        }

        // Inconsistent > Incoherent > Absent over the failing parts
        let mut outcome = Outcome::Absent;
        for part in &failing {
            if !self.reasoner.is_consistent_with(part)? {
                debug!("Adding {} makes the ontology inconsistent", part);
                return Ok(Outcome::Inconsistent);
            }
            if outcome == Outcome::Absent && self.reasoner.unsatisfiable_classes_with(part)?.len() > 1 {
                debug!("Adding {} makes the ontology incoherent", part);
                outcome = Outcome::Incoherent;
            }
        }
        Ok(outcome)
    }

    /// Parts of the candidate that do not follow from the snapshot
    ///
    /// The addition check needs every failing part, so the entailment pass
    /// only stops early when that check is off.
    fn unentailed_parts(&self, candidate: &CandidateAxiom) -> Result<Vec<CandidateAxiom>, ReasonerError> {
        let stop_early = self.config.short_circuit_pairs && !self.config.check_additions;

        let mut failing = Vec::new();
        for (query, part) in components(candidate) {
            if !self.reasoner.is_entailed(&query)? {
                failing.push(part);
                if stop_early {
                    break;
                }
            }
        }
        Ok(failing)
    }
}

/// Entailment queries of a candidate, each paired with the two-member axiom it stands for
fn components(candidate: &CandidateAxiom) -> Vec<(EntailmentQuery, CandidateAxiom)> {
    match candidate {
        CandidateAxiom::SubClassOf { sub, sup } => {
            vec![(EntailmentQuery::SubClassOf(sub.clone(), sup.clone()), candidate.clone())]
        }
        CandidateAxiom::EquivalentClasses(members) => pairs(members, |c, d| {
            (
                EntailmentQuery::EquivalentClasses(c.clone(), d.clone()),
                CandidateAxiom::EquivalentClasses(vec![c.clone(), d.clone()]),
            )
        }),
        CandidateAxiom::DisjointClasses(members) => pairs(members, disjointness),
        CandidateAxiom::DisjointUnion { whole, parts } => {
            let union = ClassExpression::union(parts.clone());
            let covering = (
                EntailmentQuery::EquivalentClasses(whole.clone(), union.clone()),
                CandidateAxiom::EquivalentClasses(vec![whole.clone(), union]),
            );
            let mut components = vec![covering];
            components.extend(pairs(parts, disjointness));
            components
        }
        CandidateAxiom::SameIndividual(members) => pairs(members, |a, b| {
            (
                EntailmentQuery::SameIndividual(a.clone(), b.clone()),
                CandidateAxiom::SameIndividual(vec![a.clone(), b.clone()]),
            )
        }),
        CandidateAxiom::DifferentIndividuals(members) => pairs(members, |a, b| {
            (
                EntailmentQuery::DifferentIndividuals(a.clone(), b.clone()),
                CandidateAxiom::DifferentIndividuals(vec![a.clone(), b.clone()]),
            )
        }),
        CandidateAxiom::ClassAssertion { class, individual } => {
            vec![(EntailmentQuery::ClassAssertion(class.clone(), individual.clone()), candidate.clone())]
        }
    }
}

/// One component per unordered pair (i < j)
fn pairs<T>(members: &[T], component: impl Fn(&T, &T) -> (EntailmentQuery, CandidateAxiom)) -> Vec<(EntailmentQuery, CandidateAxiom)> {
    members.iter().tuple_combinations().map(|(a, b)| component(a, b)).collect()
}

fn disjointness(c: &ClassExpression, d: &ClassExpression) -> (EntailmentQuery, CandidateAxiom) {
    (
        EntailmentQuery::SubClassOf(ClassExpression::intersection(vec![c.clone(), d.clone()]), ClassExpression::Nothing),
        CandidateAxiom::DisjointClasses(vec![c.clone(), d.clone()]),
    )
}
