//! オントロジー データモデル

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// OWL IRI wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OwlIri(pub String);

impl OwlIri {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwlIri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OwlIri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// OWL Class (named classes plus the two built-ins)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Class {
    /// Named class
    Named(OwlIri),
    /// owl:Thing (⊤)
    Thing,
    /// owl:Nothing (⊥)
    Nothing,
}

/// OWL named individual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Individual(pub OwlIri);

impl Individual {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(OwlIri::new(iri))
    }

    pub fn iri(&self) -> &OwlIri {
        &self.0
    }
}

impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity reference: an opaque name the ontology signature may declare
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Entity {
    Class(OwlIri),
    ObjectProperty(OwlIri),
    Individual(OwlIri),
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Class(iri) => write!(f, "class <{}>", iri),
            Entity::ObjectProperty(iri) => write!(f, "object property <{}>", iri),
            Entity::Individual(iri) => write!(f, "individual <{}>", iri),
        }
    }
}

/// Object property expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PropertyExpression {
    /// Named object property
    ObjectProperty(OwlIri),
}

impl PropertyExpression {
    pub fn named(iri: impl Into<String>) -> Self {
        PropertyExpression::ObjectProperty(OwlIri::new(iri))
    }

    pub fn iri(&self) -> &OwlIri {
        match self {
            PropertyExpression::ObjectProperty(iri) => iri,
        }
    }

    pub fn entity(&self) -> Entity {
        Entity::ObjectProperty(self.iri().clone())
    }
}

/// Class expression built from entities and ALC operators
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ClassExpression {
    /// Named class
    Named(OwlIri),

    /// owl:Thing (⊤)
    Thing,

    /// owl:Nothing (⊥)
    Nothing,

    /// Complement of class: ¬C
    ComplementOf(Box<ClassExpression>),

    /// Intersection of classes: C1 ⊓ C2 ⊓ ... ⊓ Cn
    IntersectionOf(Vec<ClassExpression>),

    /// Union of classes: C1 ⊔ C2 ⊔ ... ⊔ Cn
    UnionOf(Vec<ClassExpression>),

    /// Existential restriction: ∃R.C
    SomeValuesFrom {
        property: PropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Universal restriction: ∀R.C
    AllValuesFrom {
        property: PropertyExpression,
        class: Box<ClassExpression>,
    },
}

impl ClassExpression {
    pub fn named(iri: impl Into<String>) -> Self {
        ClassExpression::Named(OwlIri::new(iri))
    }

    pub fn complement(expr: ClassExpression) -> Self {
        ClassExpression::ComplementOf(Box::new(expr))
    }

    pub fn intersection(exprs: Vec<ClassExpression>) -> Self {
        ClassExpression::IntersectionOf(exprs)
    }

    pub fn union(exprs: Vec<ClassExpression>) -> Self {
        ClassExpression::UnionOf(exprs)
    }

    pub fn some(property: PropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::SomeValuesFrom { property, class: Box::new(class) }
    }

    pub fn only(property: PropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::AllValuesFrom { property, class: Box::new(class) }
    }

    /// Whether this is a bare named class (an entity reference)
    pub fn is_named(&self) -> bool {
        matches!(self, ClassExpression::Named(_))
    }

    /// Every entity mentioned anywhere inside the expression
    pub fn entities(&self) -> BTreeSet<Entity> {
        let mut entities = BTreeSet::new();
        self.collect_entities(&mut entities);
        entities
    }

    pub(crate) fn collect_entities(&self, out: &mut BTreeSet<Entity>) {
        match self {
            ClassExpression::Named(iri) => {
                out.insert(Entity::Class(iri.clone()));
            }
            ClassExpression::Thing | ClassExpression::Nothing => {}
            ClassExpression::ComplementOf(expr) => expr.collect_entities(out),
            ClassExpression::IntersectionOf(exprs) | ClassExpression::UnionOf(exprs) => {
                for expr in exprs {
                    expr.collect_entities(out);
                }
            }
            ClassExpression::SomeValuesFrom { property, class } |
            ClassExpression::AllValuesFrom { property, class } => {
                out.insert(property.entity());
                class.collect_entities(out);
            }
        }
    }
}

impl std::fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(f: &mut std::fmt::Formatter<'_>, exprs: &[ClassExpression], op: &str) -> std::fmt::Result {
            write!(f, "(")?;
            for (i, expr) in exprs.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op)?;
                }
                write!(f, "{}", expr)?;
            }
            write!(f, ")")
        }

        match self {
            ClassExpression::Named(iri) => write!(f, "{}", iri),
            ClassExpression::Thing => write!(f, "⊤"),
            ClassExpression::Nothing => write!(f, "⊥"),
            ClassExpression::ComplementOf(expr) => write!(f, "¬{}", expr),
            ClassExpression::IntersectionOf(exprs) => join(f, exprs, "⊓"),
            ClassExpression::UnionOf(exprs) => join(f, exprs, "⊔"),
            ClassExpression::SomeValuesFrom { property, class } => write!(f, "∃{}.{}", property.iri(), class),
            ClassExpression::AllValuesFrom { property, class } => write!(f, "∀{}.{}", property.iri(), class),
        }
    }
}

/// Axiom of the background ontology
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axiom {
    /// SubClassOf(C1 C2)
    SubClassOf(ClassExpression, ClassExpression),

    /// EquivalentClasses(C1 ... Cn)
    EquivalentClasses(Vec<ClassExpression>),

    /// DisjointClasses(C1 ... Cn)
    DisjointClasses(Vec<ClassExpression>),

    /// DisjointUnion(C C1 ... Cn)
    DisjointUnion(ClassExpression, Vec<ClassExpression>),

    /// SubObjectPropertyOf(P1 P2)
    SubObjectPropertyOf(PropertyExpression, PropertyExpression),

    /// ObjectPropertyDomain(P C)
    ObjectPropertyDomain(PropertyExpression, ClassExpression),

    /// ObjectPropertyRange(P C)
    ObjectPropertyRange(PropertyExpression, ClassExpression),

    /// SameIndividual(i1 ... in)
    SameIndividual(Vec<Individual>),

    /// DifferentIndividuals(i1 ... in)
    DifferentIndividuals(Vec<Individual>),

    /// ClassAssertion(C i)
    ClassAssertion(ClassExpression, Individual),

    /// ObjectPropertyAssertion(P i1 i2)
    ObjectPropertyAssertion(PropertyExpression, Individual, Individual),
}

impl Axiom {
    /// Functional-syntax name of the axiom type
    pub fn kind(&self) -> &'static str {
        match self {
            Axiom::SubClassOf(..) => "SubClassOf",
            Axiom::EquivalentClasses(_) => "EquivalentClasses",
            Axiom::DisjointClasses(_) => "DisjointClasses",
            Axiom::DisjointUnion(..) => "DisjointUnion",
            Axiom::SubObjectPropertyOf(..) => "SubObjectPropertyOf",
            Axiom::ObjectPropertyDomain(..) => "ObjectPropertyDomain",
            Axiom::ObjectPropertyRange(..) => "ObjectPropertyRange",
            Axiom::SameIndividual(_) => "SameIndividual",
            Axiom::DifferentIndividuals(_) => "DifferentIndividuals",
            Axiom::ClassAssertion(..) => "ClassAssertion",
            Axiom::ObjectPropertyAssertion(..) => "ObjectPropertyAssertion",
        }
    }

    /// Every entity the axiom mentions
    pub fn entities(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        match self {
            Axiom::SubClassOf(c1, c2) => {
                c1.collect_entities(&mut out);
                c2.collect_entities(&mut out);
            }
            Axiom::EquivalentClasses(exprs) | Axiom::DisjointClasses(exprs) => {
                for expr in exprs {
                    expr.collect_entities(&mut out);
                }
            }
            Axiom::DisjointUnion(whole, parts) => {
                whole.collect_entities(&mut out);
                for part in parts {
                    part.collect_entities(&mut out);
                }
            }
            Axiom::SubObjectPropertyOf(p1, p2) => {
                out.insert(p1.entity());
                out.insert(p2.entity());
            }
            Axiom::ObjectPropertyDomain(p, c) | Axiom::ObjectPropertyRange(p, c) => {
                out.insert(p.entity());
                c.collect_entities(&mut out);
            }
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                out.extend(individuals.iter().map(|i| Entity::Individual(i.0.clone())));
            }
            Axiom::ClassAssertion(c, i) => {
                c.collect_entities(&mut out);
                out.insert(Entity::Individual(i.0.clone()));
            }
            Axiom::ObjectPropertyAssertion(p, i1, i2) => {
                out.insert(p.entity());
                out.insert(Entity::Individual(i1.0.clone()));
                out.insert(Entity::Individual(i2.0.clone()));
            }
        }
        out
    }
}

/// OWL ontology document: axioms plus the declared signature
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    /// Ontology IRI
    pub iri: Option<OwlIri>,

    /// All axioms in the ontology
    pub axioms: Vec<Axiom>,

    /// Declared classes
    pub classes: HashSet<Class>,

    /// Declared object properties
    pub properties: HashSet<PropertyExpression>,

    /// Declared individuals
    pub individuals: HashSet<Individual>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iri(iri: OwlIri) -> Self {
        Self {
            iri: Some(iri),
            ..Self::default()
        }
    }

    /// Load an ontology from its JSON serialization
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add an entity to the signature without asserting anything about it
    pub fn declare(&mut self, entity: Entity) {
        match entity {
            Entity::Class(iri) => {
                self.classes.insert(Class::Named(iri));
            }
            Entity::ObjectProperty(iri) => {
                self.properties.insert(PropertyExpression::ObjectProperty(iri));
            }
            Entity::Individual(iri) => {
                self.individuals.insert(Individual(iri));
            }
        }
    }

    pub fn is_declared(&self, entity: &Entity) -> bool {
        match entity {
            Entity::Class(iri) => self.classes.contains(&Class::Named(iri.clone())),
            Entity::ObjectProperty(iri) => self.properties.contains(&PropertyExpression::ObjectProperty(iri.clone())),
            Entity::Individual(iri) => self.individuals.contains(&Individual(iri.clone())),
        }
    }

    /// Append an axiom, declaring every entity it mentions
    pub fn add_axiom(&mut self, axiom: Axiom) {
        for entity in axiom.entities() {
            self.declare(entity);
        }
        self.axioms.push(axiom);
    }

    /// Named classes of the signature, in IRI order
    pub fn named_classes(&self) -> BTreeSet<OwlIri> {
        self.classes.iter()
            .filter_map(|class| match class {
                Class::Named(iri) => Some(iri.clone()),
                _ => None,
            })
            .collect()
    }
}
