//! 否定標準形 (NNF) の概念

use tddonto_core::{ClassExpression, OwlIri};

/// Class expression in negation normal form, as stored in tableau node labels
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Concept {
    Top,
    Bottom,
    Atom(OwlIri),
    NotAtom(OwlIri),
    And(Vec<Concept>),
    Or(Vec<Concept>),
    Some(OwlIri, Box<Concept>),
    All(OwlIri, Box<Concept>),
}

impl Concept {
    pub fn from_expression(expr: &ClassExpression) -> Concept {
        nnf(expr, false)
    }

    /// NNF of ¬expr
    pub fn negated_expression(expr: &ClassExpression) -> Concept {
        nnf(expr, true)
    }

    /// NNF of the complement of an NNF concept
    pub fn negate(&self) -> Concept {
        match self {
            Concept::Top => Concept::Bottom,
            Concept::Bottom => Concept::Top,
            Concept::Atom(iri) => Concept::NotAtom(iri.clone()),
            Concept::NotAtom(iri) => Concept::Atom(iri.clone()),
            Concept::And(cs) => Concept::or(cs.iter().map(Concept::negate).collect()),
            Concept::Or(cs) => Concept::and(cs.iter().map(Concept::negate).collect()),
            Concept::Some(role, c) => Concept::All(role.clone(), Box::new(c.negate())),
            Concept::All(role, c) => Concept::Some(role.clone(), Box::new(c.negate())),
        }
    }

    /// Flattened, sorted conjunction with ⊤/⊥ simplification
    pub fn and(parts: Vec<Concept>) -> Concept {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Concept::Top => {}
                Concept::Bottom => return Concept::Bottom,
                Concept::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        flat.sort();
        flat.dedup();
        if flat.iter().any(|c| flat.contains(&c.negate())) {
            return Concept::Bottom;
        }
        match flat.len() {
            0 => Concept::Top,
            1 => flat.remove(0),
            _ => Concept::And(flat),
        }
    }

    /// Flattened, sorted disjunction with ⊤/⊥ simplification
    pub fn or(parts: Vec<Concept>) -> Concept {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Concept::Bottom => {}
                Concept::Top => return Concept::Top,
                Concept::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        flat.sort();
        flat.dedup();
        if flat.iter().any(|c| flat.contains(&c.negate())) {
            return Concept::Top;
        }
        match flat.len() {
            0 => Concept::Bottom,
            1 => flat.remove(0),
            _ => Concept::Or(flat),
        }
    }

    /// Whether `self` and `other` are syntactically complementary literals
    pub fn clashes_with(&self, other: &Concept) -> bool {
        match (self, other) {
            (Concept::Atom(a), Concept::NotAtom(b)) | (Concept::NotAtom(a), Concept::Atom(b)) => a == b,
            (Concept::Top, Concept::Bottom) | (Concept::Bottom, Concept::Top) => true,
            _ => false,
        }
    }
}

fn nnf(expr: &ClassExpression, negate: bool) -> Concept {
    match expr {
        ClassExpression::Named(iri) => {
            if negate { Concept::NotAtom(iri.clone()) } else { Concept::Atom(iri.clone()) }
        }
        ClassExpression::Thing => if negate { Concept::Bottom } else { Concept::Top },
        ClassExpression::Nothing => if negate { Concept::Top } else { Concept::Bottom },
        ClassExpression::ComplementOf(inner) => nnf(inner, !negate),
        ClassExpression::IntersectionOf(exprs) => {
            let parts = exprs.iter().map(|e| nnf(e, negate)).collect();
            if negate { Concept::or(parts) } else { Concept::and(parts) }
        }
        ClassExpression::UnionOf(exprs) => {
            let parts = exprs.iter().map(|e| nnf(e, negate)).collect();
            if negate { Concept::and(parts) } else { Concept::or(parts) }
        }
        ClassExpression::SomeValuesFrom { property, class } => {
            let filler = Box::new(nnf(class, negate));
            if negate {
                Concept::All(property.iri().clone(), filler)
            } else {
                Concept::Some(property.iri().clone(), filler)
            }
        }
        ClassExpression::AllValuesFrom { property, class } => {
            let filler = Box::new(nnf(class, negate));
            if negate {
                Concept::Some(property.iri().clone(), filler)
            } else {
                Concept::All(property.iri().clone(), filler)
            }
        }
    }
}
