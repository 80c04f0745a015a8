//! Reasoner facade consumed by the axiom classifier

use crate::ReasonerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tddonto_core::{CandidateAxiom, Class, ClassExpression, Entity, Individual};

/// Statement whose entailment can be asked of a reasoner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntailmentQuery {
    /// C ⊑ D
    SubClassOf(ClassExpression, ClassExpression),
    /// C ≡ D
    EquivalentClasses(ClassExpression, ClassExpression),
    /// C ⊓ D ⊑ ⊥
    DisjointClasses(ClassExpression, ClassExpression),
    /// a ∈ C
    ClassAssertion(ClassExpression, Individual),
    /// a = b
    SameIndividual(Individual, Individual),
    /// a ≠ b
    DifferentIndividuals(Individual, Individual),
}

impl EntailmentQuery {
    /// Every entity the query mentions
    pub fn entities(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        match self {
            EntailmentQuery::SubClassOf(c, d) |
            EntailmentQuery::EquivalentClasses(c, d) |
            EntailmentQuery::DisjointClasses(c, d) => {
                out.extend(c.entities());
                out.extend(d.entities());
            }
            EntailmentQuery::ClassAssertion(c, a) => {
                out.extend(c.entities());
                out.insert(Entity::Individual(a.0.clone()));
            }
            EntailmentQuery::SameIndividual(a, b) | EntailmentQuery::DifferentIndividuals(a, b) => {
                out.insert(Entity::Individual(a.0.clone()));
                out.insert(Entity::Individual(b.0.clone()));
            }
        }
        out
    }
}

impl std::fmt::Display for EntailmentQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntailmentQuery::SubClassOf(c, d) => write!(f, "{} ⊑ {}", c, d),
            EntailmentQuery::EquivalentClasses(c, d) => write!(f, "{} ≡ {}", c, d),
            EntailmentQuery::DisjointClasses(c, d) => write!(f, "{} ⊓ {} ⊑ ⊥", c, d),
            EntailmentQuery::ClassAssertion(c, a) => write!(f, "{} : {}", a, c),
            EntailmentQuery::SameIndividual(a, b) => write!(f, "{} = {}", a, b),
            EntailmentQuery::DifferentIndividuals(a, b) => write!(f, "{} ≠ {}", a, b),
        }
    }
}

/// Query surface of a description-logic reasoner over a fixed ontology snapshot
///
/// Every method is read-only. The `*_with` methods answer for the snapshot
/// extended by one candidate axiom without changing the snapshot itself.
pub trait Reasoner {
    /// Whether the entity is part of the snapshot's signature
    fn is_declared(&self, entity: &Entity) -> bool;

    /// Whether the snapshot has at least one model
    fn is_consistent(&self) -> Result<bool, ReasonerError>;

    /// Classes equivalent to ⊥. Always contains `Class::Nothing`.
    fn unsatisfiable_classes(&self) -> Result<BTreeSet<Class>, ReasonerError>;

    /// Whether the statement follows from the snapshot
    fn is_entailed(&self, query: &EntailmentQuery) -> Result<bool, ReasonerError>;

    /// Whether snapshot + candidate has at least one model
    fn is_consistent_with(&self, candidate: &CandidateAxiom) -> Result<bool, ReasonerError>;

    /// Unsatisfiable classes of snapshot + candidate
    fn unsatisfiable_classes_with(&self, candidate: &CandidateAxiom) -> Result<BTreeSet<Class>, ReasonerError>;
}

macro_rules! forward_reasoner {
    ($($ty:ty),*) => {
        $(
            impl<R: Reasoner + ?Sized> Reasoner for $ty {
                fn is_declared(&self, entity: &Entity) -> bool {
                    (**self).is_declared(entity)
                }

                fn is_consistent(&self) -> Result<bool, ReasonerError> {
                    (**self).is_consistent()
                }

                fn unsatisfiable_classes(&self) -> Result<BTreeSet<Class>, ReasonerError> {
                    (**self).unsatisfiable_classes()
                }

                fn is_entailed(&self, query: &EntailmentQuery) -> Result<bool, ReasonerError> {
                    (**self).is_entailed(query)
                }

                fn is_consistent_with(&self, candidate: &CandidateAxiom) -> Result<bool, ReasonerError> {
                    (**self).is_consistent_with(candidate)
                }

                fn unsatisfiable_classes_with(&self, candidate: &CandidateAxiom) -> Result<BTreeSet<Class>, ReasonerError> {
                    (**self).unsatisfiable_classes_with(candidate)
                }
            }
        )*
    };
}

forward_reasoner!(&R, Box<R>, Arc<R>);
