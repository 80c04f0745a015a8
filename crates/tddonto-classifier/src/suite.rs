//! テストスイート: 候補公理と最新の判定結果

use crate::acceptance::OntologyDocument;
use crate::classifier::AxiomClassifier;
use crate::{AcceptError, ClassifyError};
use serde::{Deserialize, Serialize};
use tddonto_core::{Axiom, CandidateAxiom, Outcome};
use tddonto_reasoner::Reasoner;
use tracing::{info, warn};

/// One row of the suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub candidate: CandidateAxiom,
    /// `None` until evaluated
    pub outcome: Option<Outcome>,
}

/// Ordered collection of candidate axioms under test
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSuite {
    records: Vec<TestRecord>,
    preconditions: Option<Outcome>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&TestRecord> {
        self.records.get(index)
    }

    /// Outcome of the last failed precondition check; `None` when the background was healthy
    pub fn preconditions(&self) -> Option<Outcome> {
        self.preconditions
    }

    /// Append an unevaluated test, returning its index
    pub fn add(&mut self, candidate: CandidateAxiom) -> usize {
        self.records.push(TestRecord { candidate, outcome: None });
        self.records.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<TestRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Remove exactly the rows named by `indices`, in any order and with duplicates ignored
    pub fn remove_many(&mut self, indices: &[usize]) -> Vec<TestRecord> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        // highest first so earlier indices stay valid
        let mut removed: Vec<TestRecord> = sorted.into_iter()
            .filter_map(|index| self.remove(index))
            .collect();
        removed.reverse();
        removed
    }

    /// Evaluate every test against one health verdict
    pub fn evaluate_all<R: Reasoner>(&mut self, classifier: &AxiomClassifier<R>) -> Result<(), ClassifyError> {
        let indices: Vec<usize> = (0..self.records.len()).collect();
        self.evaluate_only(classifier, &indices)
    }

    /// Evaluate the named tests; indices outside the suite are skipped
    pub fn evaluate_only<R: Reasoner>(&mut self, classifier: &AxiomClassifier<R>, indices: &[usize]) -> Result<(), ClassifyError> {
        info!("Evaluating {} of {} tests", indices.len(), self.records.len());

        let health = classifier.health()?;
        self.preconditions = health.as_outcome();

        for &index in indices {
            let Some(record) = self.records.get_mut(index) else {
                warn!("Skipping evaluation of missing test {}", index);
                continue;
            };
            let outcome = match self.preconditions {
                Some(outcome) => outcome,
                None => classifier.classify_on_healthy(&record.candidate)?,
            };
            record.outcome = Some(outcome);
        }
        Ok(())
    }

    /// Write the candidate of test `index` into the document
    pub fn accept(&self, index: usize, document: &mut impl OntologyDocument) -> Result<(), AcceptError> {
        let record = self.records.get(index).ok_or(AcceptError::NoSuchTest(index))?;
        record.candidate.validate()?;
        document.apply(Axiom::from(record.candidate.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tddonto_core::{ClassExpression, Ontology};
    use tddonto_reasoner::TableauReasoner;

    fn class(name: &str) -> ClassExpression {
        ClassExpression::named(name)
    }

    fn candidate(sub: &str, sup: &str) -> CandidateAxiom {
        CandidateAxiom::sub_class_of(class(sub), class(sup))
    }

    fn suite_of(n: usize) -> TestSuite {
        let mut suite = TestSuite::new();
        for i in 0..n {
            suite.add(candidate(&format!("C{}", i), "Pizza"));
        }
        suite
    }

    fn names(suite: &TestSuite) -> Vec<String> {
        suite.records().iter().map(|r| r.candidate.to_string()).collect()
    }

    #[test]
    fn test_add_starts_unevaluated() {
        let mut suite = TestSuite::new();
        let index = suite.add(candidate("Margherita", "Pizza"));
        assert_eq!(index, 0);
        assert_eq!(suite.get(0).unwrap().outcome, None);
        assert_eq!(suite.preconditions(), None);
    }

    #[test]
    fn test_remove_many_is_order_independent() {
        let mut ascending = suite_of(5);
        let mut descending = suite_of(5);

        let removed = ascending.remove_many(&[1, 3]);
        descending.remove_many(&[3, 1, 3]);

        assert_eq!(names(&ascending), vec!["SubClassOf(C0 Pizza)", "SubClassOf(C2 Pizza)", "SubClassOf(C4 Pizza)"]);
        assert_eq!(names(&ascending), names(&descending));
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].candidate.to_string(), "SubClassOf(C1 Pizza)");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut suite = suite_of(2);
        assert!(suite.remove(5).is_none());
        assert_eq!(suite.remove_many(&[7, 0]).len(), 1);
        assert_eq!(suite.len(), 1);
    }

    #[test]
    fn test_evaluate_only_leaves_other_rows() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::SubClassOf(class("Margherita"), class("Pizza")));
        let classifier = AxiomClassifier::new(TableauReasoner::new(ontology));

        let mut suite = TestSuite::new();
        suite.add(candidate("Margherita", "Pizza"));
        suite.add(candidate("Pizza", "Margherita"));
        suite.evaluate_only(&classifier, &[0, 9]).unwrap();

        assert_eq!(suite.get(0).unwrap().outcome, Some(Outcome::Entailed));
        assert_eq!(suite.get(1).unwrap().outcome, None);
    }

    #[test]
    fn test_failed_preconditions_fill_every_row() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::SubClassOf(class("Pizza"), ClassExpression::Nothing));
        ontology.add_axiom(Axiom::SubClassOf(class("Margherita"), class("Pizza")));
        let classifier = AxiomClassifier::new(TableauReasoner::new(ontology));

        let mut suite = TestSuite::new();
        suite.add(candidate("Margherita", "Pizza"));
        suite.add(candidate("NotARealPizza", "Pizza"));
        suite.evaluate_all(&classifier).unwrap();

        assert_eq!(suite.preconditions(), Some(Outcome::Incoherent));
        assert!(suite.records().iter().all(|r| r.outcome == Some(Outcome::Incoherent)));
    }

    #[test]
    fn test_accept_appends_axiom() {
        let mut suite = TestSuite::new();
        suite.add(candidate("Margherita", "Pizza"));

        let mut ontology = Ontology::new();
        suite.accept(0, &mut ontology).unwrap();
        assert_eq!(ontology.axioms, vec![Axiom::SubClassOf(class("Margherita"), class("Pizza"))]);

        assert!(matches!(suite.accept(3, &mut ontology), Err(AcceptError::NoSuchTest(3))));
    }
}
