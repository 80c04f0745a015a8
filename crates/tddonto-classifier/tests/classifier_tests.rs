mod common;

use common::{class, individual, pizza_ontology};
use tddonto_classifier::*;
use tddonto_core::{Axiom, CandidateAxiom, ClassExpression, Outcome, PropertyExpression};
use tddonto_reasoner::TableauReasoner;

fn classifier() -> AxiomClassifier<TableauReasoner> {
    AxiomClassifier::new(TableauReasoner::new(pizza_ontology()))
}

#[test]
fn test_subclass_entailed() {
    let candidate = CandidateAxiom::sub_class_of(class("Margherita"), class("Pizza"));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Entailed);
}

#[test]
fn test_subclass_missing_entity() {
    let candidate = CandidateAxiom::sub_class_of(class("NotARealPizza"), class("Pizza"));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::MissingEntity);
}

#[test]
fn test_subclass_absent() {
    let candidate = CandidateAxiom::sub_class_of(class("Pizza"), class("NamedPizza"));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Absent);
}

#[test]
fn test_subclass_incoherent() {
    // every base would have to be a topping, which it cannot be
    let candidate = CandidateAxiom::sub_class_of(class("PizzaBase"), class("PizzaTopping"));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Incoherent);
}

#[test]
fn test_incoherent_background_marks_every_candidate() {
    let mut ontology = pizza_ontology();
    ontology.add_axiom(Axiom::SubClassOf(class("PizzaBase"), class("PizzaTopping")));
    let classifier = AxiomClassifier::new(TableauReasoner::new(ontology));

    for candidate in [
        CandidateAxiom::sub_class_of(class("Margherita"), class("Pizza")),
        CandidateAxiom::sub_class_of(class("Pizza"), class("NamedPizza")),
        CandidateAxiom::class_assertion(class("Country"), individual("England")),
    ] {
        assert_eq!(classifier.classify(&candidate).unwrap(), Outcome::Incoherent);
    }
}

#[test]
fn test_self_disjointness_incoherent() {
    let candidate = CandidateAxiom::disjoint_classes(vec![class("Pizza"), class("Pizza")]).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Incoherent);
}

#[test]
fn test_disjoint_classes_entailed() {
    let candidate = CandidateAxiom::disjoint_classes(vec![class("Margherita"), class("American"), class("PizzaBase")]).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Entailed);
}

#[test]
fn test_class_assertion_inconsistent() {
    let candidate = CandidateAxiom::class_assertion(ClassExpression::complement(class("Country")), individual("England"));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Inconsistent);
}

#[test]
fn test_class_assertion_entailed() {
    let candidate = CandidateAxiom::class_assertion(class("Country"), individual("England"));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Entailed);
}

#[test]
fn test_class_assertion_absent() {
    // nothing keeps a country out of food
    let candidate = CandidateAxiom::class_assertion(class("Food"), individual("England"));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Absent);
}

#[test]
fn test_subclass_of_complement_inconsistent() {
    let candidate = CandidateAxiom::sub_class_of(class("Country"), ClassExpression::complement(class("Country")));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Inconsistent);
}

#[test]
fn test_subclass_through_defined_class() {
    let meaty = ClassExpression::some(PropertyExpression::named("hasTopping"), class("MeatTopping"));
    let candidate = CandidateAxiom::sub_class_of(meaty, ClassExpression::complement(class("VegetarianPizza")));
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Entailed);
}

#[test]
fn test_equivalent_classes_incoherent() {
    let candidate = CandidateAxiom::equivalent_classes(vec![class("Pizza"), class("PizzaBase"), class("PizzaTopping")]).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Incoherent);
}

#[test]
fn test_equivalent_classes_incoherent_when_one_pair_collapses() {
    // adding all four at once contradicts Country(England), each pair alone does not
    let candidate = CandidateAxiom::equivalent_classes(
        vec![class("Country"), class("Pizza"), class("PizzaBase"), class("PizzaTopping")],
    ).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Incoherent);
}

#[test]
fn test_equivalent_classes_absent() {
    let classifier = classifier();

    let candidate = CandidateAxiom::equivalent_classes(vec![class("Pizza"), class("NamedPizza")]).unwrap();
    assert_eq!(classifier.classify(&candidate).unwrap(), Outcome::Absent);

    let countries = CandidateAxiom::equivalent_classes(vec![class("Country"), class("Pizza")]).unwrap();
    assert_eq!(classifier.classify(&countries).unwrap(), Outcome::Absent);
}

#[test]
fn test_equivalent_defined_classes_entailed() {
    let candidate = CandidateAxiom::equivalent_classes(vec![class("SpicyPizza"), class("SpicyPizzaEquivalent")]).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Entailed);
}

#[test]
fn test_disjoint_classes_absent() {
    let candidate = CandidateAxiom::disjoint_classes(vec![class("SpicyPizza"), class("VegetarianPizza")]).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Absent);
}

#[test]
fn test_disjoint_union_entailed() {
    let candidate = CandidateAxiom::disjoint_union(
        class("Food"),
        vec![
            class("Pizza"),
            ClassExpression::intersection(vec![class("Food"), ClassExpression::complement(class("Pizza"))]),
        ],
    ).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Entailed);
}

#[test]
fn test_disjoint_union_absent() {
    // food may hold more than pizzas, bases and toppings
    let candidate = CandidateAxiom::disjoint_union(
        class("Food"),
        vec![class("Pizza"), class("PizzaBase"), class("PizzaTopping")],
    ).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Absent);
}

#[test]
fn test_disjoint_union_incoherent() {
    // covering food with pizzas and bases leaves no room for toppings
    let candidate = CandidateAxiom::disjoint_union(class("Food"), vec![class("Pizza"), class("PizzaBase")]).unwrap();
    assert_eq!(classifier().classify(&candidate).unwrap(), Outcome::Incoherent);
}

#[test]
fn test_same_individual() {
    let classifier = classifier();

    let reflexive = CandidateAxiom::same_individual(vec![individual("England"), individual("England")]).unwrap();
    assert_eq!(classifier.classify(&reflexive).unwrap(), Outcome::Entailed);

    let clash = CandidateAxiom::same_individual(vec![individual("England"), individual("France")]).unwrap();
    assert_eq!(classifier.classify(&clash).unwrap(), Outcome::Inconsistent);

    let open = CandidateAxiom::same_individual(vec![individual("England"), individual("Scotland")]).unwrap();
    assert_eq!(classifier.classify(&open).unwrap(), Outcome::Absent);
}

#[test]
fn test_different_individuals() {
    let classifier = classifier();

    let reflexive = CandidateAxiom::different_individuals(vec![individual("England"), individual("England")]).unwrap();
    assert_eq!(classifier.classify(&reflexive).unwrap(), Outcome::Inconsistent);

    let asserted = CandidateAxiom::different_individuals(vec![individual("France"), individual("England")]).unwrap();
    assert_eq!(classifier.classify(&asserted).unwrap(), Outcome::Entailed);

    let missing = CandidateAxiom::different_individuals(vec![individual("England"), individual("Wales")]).unwrap();
    assert_eq!(classifier.classify(&missing).unwrap(), Outcome::MissingEntity);
}

#[test]
fn test_entailment_only_config() {
    let classifier = AxiomClassifier::with_config(
        TableauReasoner::new(pizza_ontology()),
        ClassifierConfig::entailment_only(),
    );

    let candidate = CandidateAxiom::sub_class_of(class("PizzaBase"), class("PizzaTopping"));
    assert_eq!(classifier.classify(&candidate).unwrap(), Outcome::Absent);
}

#[test]
fn test_inconsistent_background_batch() {
    let mut ontology = pizza_ontology();
    ontology.add_axiom(Axiom::ClassAssertion(ClassExpression::complement(class("Country")), individual("England")));
    let classifier = AxiomClassifier::new(TableauReasoner::new(ontology));

    let candidates = vec![
        CandidateAxiom::sub_class_of(class("Margherita"), class("Pizza")),
        CandidateAxiom::sub_class_of(class("NotARealPizza"), class("Pizza")),
        CandidateAxiom::same_individual(vec![individual("England"), individual("Scotland")]).unwrap(),
    ];
    let outcomes = classifier.classify_batch(&candidates).unwrap();
    assert_eq!(outcomes, vec![Outcome::Inconsistent; 3]);

    // a single call still reports the missing entity first
    assert_eq!(classifier.classify(&candidates[1]).unwrap(), Outcome::MissingEntity);
}

#[test]
fn test_classify_axiom() {
    let classifier = classifier();

    let axiom = Axiom::SubClassOf(class("American"), class("Pizza"));
    assert_eq!(classifier.classify_axiom(&axiom).unwrap(), Outcome::Entailed);

    let property_axiom = Axiom::ObjectPropertyRange(PropertyExpression::named("hasBase"), class("PizzaBase"));
    assert!(matches!(classifier.classify_axiom(&property_axiom), Err(ClassifyError::UnsupportedAxiom(_))));
}

#[test]
fn test_classification_leaves_snapshot_untouched() {
    let classifier = classifier();
    let before = classifier.reasoner().ontology().axioms.clone();

    let candidate = CandidateAxiom::class_assertion(ClassExpression::complement(class("Country")), individual("England"));
    classifier.classify(&candidate).unwrap();

    assert_eq!(classifier.reasoner().ontology().axioms, before);
    assert!(classifier.health().unwrap().is_healthy());
}

#[test]
fn test_suite_workflow() -> anyhow::Result<()> {
    let classifier = classifier();
    let mut suite = TestSuite::new();
    suite.add(CandidateAxiom::sub_class_of(class("Margherita"), class("Pizza")));
    suite.add(CandidateAxiom::sub_class_of(class("Margherita"), ClassExpression::some(
        PropertyExpression::named("hasTopping"),
        class("PizzaTopping"),
    )));
    suite.add(CandidateAxiom::sub_class_of(class("PizzaBase"), class("PizzaTopping")));
    suite.add(CandidateAxiom::sub_class_of(class("Calzone"), class("Pizza")));
    suite.add(CandidateAxiom::sub_class_of(class("American"), class("Margherita")));

    suite.evaluate_all(&classifier)?;
    let outcomes: Vec<_> = suite.records().iter().map(|r| r.outcome).collect();
    assert_eq!(outcomes, vec![
        Some(Outcome::Entailed),
        Some(Outcome::Entailed),
        Some(Outcome::Incoherent),
        Some(Outcome::MissingEntity),
        Some(Outcome::Incoherent),
    ]);
    assert_eq!(suite.preconditions(), None);

    let removed = suite.remove_many(&[4, 2]);
    assert_eq!(removed.len(), 2);
    assert_eq!(suite.len(), 3);

    let mut document = pizza_ontology();
    let before = document.axioms.len();
    suite.accept(1, &mut document)?;
    assert_eq!(document.axioms.len(), before + 1);
    Ok(())
}
