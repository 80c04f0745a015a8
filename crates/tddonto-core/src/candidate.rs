//! 候補公理と判定結果

use crate::model::{Axiom, ClassExpression, Entity, Individual};
use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Axiom proposed by the user, not (yet) part of the ontology
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateAxiom {
    /// sub ⊑ sup
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },

    /// m1 ≡ m2 ≡ ... ≡ mn
    EquivalentClasses(Vec<ClassExpression>),

    /// mi ⊓ mj ⊑ ⊥ for all i ≠ j
    DisjointClasses(Vec<ClassExpression>),

    /// whole ≡ p1 ⊔ ... ⊔ pn with the parts pairwise disjoint
    DisjointUnion {
        whole: ClassExpression,
        parts: Vec<ClassExpression>,
    },

    /// i1 = i2 = ... = in
    SameIndividual(Vec<Individual>),

    /// ij ≠ ik for all j ≠ k
    DifferentIndividuals(Vec<Individual>),

    /// individual ∈ class
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
}

const MIN_NARY: usize = 2;

fn check_arity(kind: &'static str, found: usize) -> Result<(), ModelError> {
    if found < MIN_NARY {
        return Err(ModelError::Arity { kind, expected: MIN_NARY, found });
    }
    Ok(())
}

impl CandidateAxiom {
    pub fn sub_class_of(sub: ClassExpression, sup: ClassExpression) -> Self {
        CandidateAxiom::SubClassOf { sub, sup }
    }

    pub fn equivalent_classes(members: Vec<ClassExpression>) -> Result<Self, ModelError> {
        check_arity("EquivalentClasses", members.len())?;
        Ok(CandidateAxiom::EquivalentClasses(members))
    }

    pub fn disjoint_classes(members: Vec<ClassExpression>) -> Result<Self, ModelError> {
        check_arity("DisjointClasses", members.len())?;
        Ok(CandidateAxiom::DisjointClasses(members))
    }

    pub fn disjoint_union(whole: ClassExpression, parts: Vec<ClassExpression>) -> Result<Self, ModelError> {
        check_arity("DisjointUnion", parts.len())?;
        Ok(CandidateAxiom::DisjointUnion { whole, parts })
    }

    pub fn same_individual(members: Vec<Individual>) -> Result<Self, ModelError> {
        check_arity("SameIndividual", members.len())?;
        Ok(CandidateAxiom::SameIndividual(members))
    }

    pub fn different_individuals(members: Vec<Individual>) -> Result<Self, ModelError> {
        check_arity("DifferentIndividuals", members.len())?;
        Ok(CandidateAxiom::DifferentIndividuals(members))
    }

    pub fn class_assertion(class: ClassExpression, individual: Individual) -> Self {
        CandidateAxiom::ClassAssertion { class, individual }
    }

    /// Functional-syntax name of the axiom shape
    pub fn kind(&self) -> &'static str {
        match self {
            CandidateAxiom::SubClassOf { .. } => "SubClassOf",
            CandidateAxiom::EquivalentClasses(_) => "EquivalentClasses",
            CandidateAxiom::DisjointClasses(_) => "DisjointClasses",
            CandidateAxiom::DisjointUnion { .. } => "DisjointUnion",
            CandidateAxiom::SameIndividual(_) => "SameIndividual",
            CandidateAxiom::DifferentIndividuals(_) => "DifferentIndividuals",
            CandidateAxiom::ClassAssertion { .. } => "ClassAssertion",
        }
    }

    /// Re-check the operand count. Deserialized candidates skip the checked constructors.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            CandidateAxiom::EquivalentClasses(members) | CandidateAxiom::DisjointClasses(members) => {
                check_arity(self.kind(), members.len())
            }
            CandidateAxiom::DisjointUnion { parts, .. } => check_arity(self.kind(), parts.len()),
            CandidateAxiom::SameIndividual(members) | CandidateAxiom::DifferentIndividuals(members) => {
                check_arity(self.kind(), members.len())
            }
            CandidateAxiom::SubClassOf { .. } | CandidateAxiom::ClassAssertion { .. } => Ok(()),
        }
    }

    /// Every entity referenced by any operand
    pub fn entities(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        match self {
            CandidateAxiom::SubClassOf { sub, sup } => {
                sub.collect_entities(&mut out);
                sup.collect_entities(&mut out);
            }
            CandidateAxiom::EquivalentClasses(members) | CandidateAxiom::DisjointClasses(members) => {
                for member in members {
                    member.collect_entities(&mut out);
                }
            }
            CandidateAxiom::DisjointUnion { whole, parts } => {
                whole.collect_entities(&mut out);
                for part in parts {
                    part.collect_entities(&mut out);
                }
            }
            CandidateAxiom::SameIndividual(members) | CandidateAxiom::DifferentIndividuals(members) => {
                out.extend(members.iter().map(|i| Entity::Individual(i.0.clone())));
            }
            CandidateAxiom::ClassAssertion { class, individual } => {
                class.collect_entities(&mut out);
                out.insert(Entity::Individual(individual.0.clone()));
            }
        }
        out
    }
}

impl std::fmt::Display for CandidateAxiom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn list<T: std::fmt::Display>(items: &[T]) -> String {
            items.iter().map(|item| item.to_string()).collect::<Vec<_>>().join(" ")
        }

        match self {
            CandidateAxiom::SubClassOf { sub, sup } => write!(f, "SubClassOf({} {})", sub, sup),
            CandidateAxiom::EquivalentClasses(members) => write!(f, "EquivalentClasses({})", list(members)),
            CandidateAxiom::DisjointClasses(members) => write!(f, "DisjointClasses({})", list(members)),
            CandidateAxiom::DisjointUnion { whole, parts } => write!(f, "DisjointUnion({} {})", whole, list(parts)),
            CandidateAxiom::SameIndividual(members) => write!(f, "SameIndividual({})", list(members)),
            CandidateAxiom::DifferentIndividuals(members) => write!(f, "DifferentIndividuals({})", list(members)),
            CandidateAxiom::ClassAssertion { class, individual } => write!(f, "ClassAssertion({} {})", class, individual),
        }
    }
}

impl From<CandidateAxiom> for Axiom {
    fn from(candidate: CandidateAxiom) -> Self {
        match candidate {
            CandidateAxiom::SubClassOf { sub, sup } => Axiom::SubClassOf(sub, sup),
            CandidateAxiom::EquivalentClasses(members) => Axiom::EquivalentClasses(members),
            CandidateAxiom::DisjointClasses(members) => Axiom::DisjointClasses(members),
            CandidateAxiom::DisjointUnion { whole, parts } => Axiom::DisjointUnion(whole, parts),
            CandidateAxiom::SameIndividual(members) => Axiom::SameIndividual(members),
            CandidateAxiom::DifferentIndividuals(members) => Axiom::DifferentIndividuals(members),
            CandidateAxiom::ClassAssertion { class, individual } => Axiom::ClassAssertion(class, individual),
        }
    }
}

impl TryFrom<Axiom> for CandidateAxiom {
    type Error = ModelError;

    fn try_from(axiom: Axiom) -> Result<Self, Self::Error> {
        match axiom {
            Axiom::SubClassOf(sub, sup) => Ok(CandidateAxiom::sub_class_of(sub, sup)),
            Axiom::EquivalentClasses(members) => CandidateAxiom::equivalent_classes(members),
            Axiom::DisjointClasses(members) => CandidateAxiom::disjoint_classes(members),
            Axiom::DisjointUnion(whole, parts) => CandidateAxiom::disjoint_union(whole, parts),
            Axiom::SameIndividual(members) => CandidateAxiom::same_individual(members),
            Axiom::DifferentIndividuals(members) => CandidateAxiom::different_individuals(members),
            Axiom::ClassAssertion(class, individual) => Ok(CandidateAxiom::class_assertion(class, individual)),
            other @ (Axiom::SubObjectPropertyOf(..) |
                     Axiom::ObjectPropertyDomain(..) |
                     Axiom::ObjectPropertyRange(..) |
                     Axiom::ObjectPropertyAssertion(..)) => {
                Err(ModelError::UnsupportedAxiom(other.kind().to_string()))
            }
        }
    }
}

/// Verdict for one candidate axiom
///
/// The variants are not ordered numerically; which one wins is decided by
/// the classifier's check sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The candidate mentions an entity the ontology does not declare
    MissingEntity,
    /// The ontology has no model (already, or once the candidate is added)
    Inconsistent,
    /// Some named class is unsatisfiable (already, or once the candidate is added)
    Incoherent,
    /// The candidate already follows from the ontology
    Entailed,
    /// The candidate does not follow, and adding it is harmless
    Absent,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::MissingEntity => "MISSING_ENTITY",
            Outcome::Inconsistent => "INCONSISTENT",
            Outcome::Incoherent => "INCOHERENT",
            Outcome::Entailed => "ENTAILED",
            Outcome::Absent => "ABSENT",
        }
    }

    /// Whether the candidate can be accepted into the ontology without breaking it
    pub fn is_safe_to_add(&self) -> bool {
        matches!(self, Outcome::Entailed | Outcome::Absent)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
