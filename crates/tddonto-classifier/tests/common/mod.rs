#![allow(dead_code)]

use tddonto_core::{Axiom, ClassExpression, Individual, Ontology, OwlIri, PropertyExpression};

pub fn class(name: &str) -> ClassExpression {
    ClassExpression::named(name)
}

pub fn individual(name: &str) -> Individual {
    Individual::new(name)
}

/// Small pizza ontology: Pizza ⊒ NamedPizza ⊒ Margherita, disjoint bases and
/// toppings, spicy and vegetarian pizzas by definition, and a few countries
/// with England ≠ France. Countries are not declared apart from food.
pub fn pizza_ontology() -> Ontology {
    let mut ontology = Ontology::with_iri(OwlIri::from("http://www.co-ode.org/ontologies/pizza"));
    let has_base = PropertyExpression::named("hasBase");
    let has_topping = PropertyExpression::named("hasTopping");

    for name in ["Pizza", "PizzaBase", "PizzaTopping"] {
        ontology.add_axiom(Axiom::SubClassOf(class(name), class("Food")));
    }
    ontology.add_axiom(Axiom::DisjointClasses(vec![class("Pizza"), class("PizzaBase"), class("PizzaTopping")]));
    ontology.add_axiom(Axiom::SubClassOf(class("NamedPizza"), class("Pizza")));
    ontology.add_axiom(Axiom::SubClassOf(class("Margherita"), class("NamedPizza")));
    ontology.add_axiom(Axiom::SubClassOf(class("American"), class("NamedPizza")));
    ontology.add_axiom(Axiom::DisjointClasses(vec![class("Margherita"), class("American")]));
    ontology.add_axiom(Axiom::SubClassOf(class("MeatTopping"), class("PizzaTopping")));
    ontology.add_axiom(Axiom::SubClassOf(class("CheeseTopping"), class("PizzaTopping")));
    ontology.add_axiom(Axiom::SubClassOf(class("SpicyTopping"), class("PizzaTopping")));

    ontology.add_axiom(Axiom::ObjectPropertyDomain(has_topping.clone(), class("Pizza")));
    ontology.add_axiom(Axiom::ObjectPropertyRange(has_topping.clone(), class("PizzaTopping")));
    ontology.add_axiom(Axiom::ObjectPropertyRange(has_base.clone(), class("PizzaBase")));
    ontology.add_axiom(Axiom::SubClassOf(class("Pizza"), ClassExpression::some(has_base, class("PizzaBase"))));
    ontology.add_axiom(Axiom::SubClassOf(class("Margherita"), ClassExpression::some(has_topping.clone(), class("CheeseTopping"))));
    ontology.add_axiom(Axiom::SubClassOf(class("American"), ClassExpression::some(has_topping.clone(), class("MeatTopping"))));

    let spicy = ClassExpression::intersection(vec![
        class("Pizza"),
        ClassExpression::some(has_topping.clone(), class("SpicyTopping")),
    ]);
    ontology.add_axiom(Axiom::EquivalentClasses(vec![class("SpicyPizza"), spicy.clone()]));
    ontology.add_axiom(Axiom::EquivalentClasses(vec![class("SpicyPizzaEquivalent"), spicy]));
    ontology.add_axiom(Axiom::EquivalentClasses(vec![
        class("VegetarianPizza"),
        ClassExpression::intersection(vec![
            class("Pizza"),
            ClassExpression::only(has_topping, ClassExpression::complement(class("MeatTopping"))),
        ]),
    ]));

    for name in ["England", "Scotland", "France"] {
        ontology.add_axiom(Axiom::ClassAssertion(class("Country"), individual(name)));
    }
    ontology.add_axiom(Axiom::DifferentIndividuals(vec![individual("England"), individual("France")]));
    ontology
}
