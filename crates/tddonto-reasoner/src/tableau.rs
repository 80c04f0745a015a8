//! テーブルロー推論アルゴリズム (ALC + ABox)

use crate::concept::Concept;
use crate::ReasonerError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tddonto_core::{Axiom, ClassExpression, Individual, Ontology, OwlIri};

pub type NodeId = usize;

/// Terminological part: absorbed inclusions, internalised GCIs and the role hierarchy
#[derive(Debug, Clone, Default)]
pub struct Tbox {
    /// A ⊑ C for named A, applied lazily when A enters a label
    unfoldings: HashMap<OwlIri, Vec<Concept>>,

    /// Concepts every node must satisfy (internalised GCIs, ranges)
    universal: Vec<Concept>,

    /// Reflexive-free transitive closure of SubObjectPropertyOf
    role_supers: HashMap<OwlIri, BTreeSet<OwlIri>>,

    /// ObjectPropertyDomain, keyed by property
    domains: HashMap<OwlIri, Vec<Concept>>,
}

impl Tbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add sub ⊑ sup, absorbing it into lazy unfolding where possible
    pub fn add_inclusion(&mut self, sub: Concept, sup: Concept) {
        if sup == Concept::Top {
            return;
        }

        match sub {
            Concept::Bottom => {}
            Concept::Top => self.universal.push(sup),
            Concept::Atom(iri) => self.unfoldings.entry(iri).or_default().push(sup),
            Concept::Or(disjuncts) => {
                for disjunct in disjuncts {
                    self.add_inclusion(disjunct, sup.clone());
                }
            }
            Concept::And(mut conjuncts) => {
                // A ⊓ C ⊑ D becomes A ⊑ ¬C ⊔ D
                match conjuncts.iter().position(|c| matches!(c, Concept::Atom(_))) {
                    Some(pos) => {
                        let atom = conjuncts.remove(pos);
                        let rest = Concept::and(conjuncts);
                        self.add_inclusion(atom, Concept::or(vec![rest.negate(), sup]));
                    }
                    None => {
                        let gci = Concept::or(vec![Concept::And(conjuncts).negate(), sup]);
                        self.universal.push(gci);
                    }
                }
            }
            other => {
                let gci = Concept::or(vec![other.negate(), sup]);
                self.universal.push(gci);
            }
        }
    }

    pub fn add_role_inclusion(&mut self, sub: OwlIri, sup: OwlIri) {
        self.role_supers.entry(sub).or_default().insert(sup);

        let mut changed = true;
        while changed {
            changed = false;
            let snapshot = self.role_supers.clone();
            for (role, supers) in &snapshot {
                let inherited: BTreeSet<OwlIri> = supers.iter()
                    .filter_map(|s| snapshot.get(s))
                    .flatten()
                    .filter(|s| *s != role)
                    .cloned()
                    .collect();
                if let Some(entry) = self.role_supers.get_mut(role) {
                    for s in inherited {
                        changed |= entry.insert(s);
                    }
                }
            }
        }
    }

    pub fn add_domain(&mut self, role: OwlIri, concept: Concept) {
        if concept != Concept::Top {
            self.domains.entry(role).or_default().push(concept);
        }
    }

    /// Range(R, C) is ⊤ ⊑ ∀R.C
    pub fn add_range(&mut self, role: OwlIri, concept: Concept) {
        if concept != Concept::Top {
            self.universal.push(Concept::All(role, Box::new(concept)));
        }
    }

    pub fn is_sub_role(&self, sub: &OwlIri, sup: &OwlIri) -> bool {
        sub == sup || self.role_supers.get(sub).map_or(false, |supers| supers.contains(sup))
    }

    pub fn universal(&self) -> &[Concept] {
        &self.universal
    }
}

/// Assertional part: individuals and the facts about them
#[derive(Debug, Clone, Default)]
pub struct Abox {
    pub individuals: BTreeSet<Individual>,
    pub assertions: Vec<(Individual, Concept)>,
    pub role_assertions: Vec<(Individual, OwlIri, Individual)>,
    pub same: Vec<(Individual, Individual)>,
    pub different: Vec<(Individual, Individual)>,
    /// Unnamed root nodes, used for satisfiability and subsumption tests
    pub anonymous: Vec<Concept>,
}

impl Abox {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compiled ontology ready for tableau expansion
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub tbox: Tbox,
    pub abox: Abox,
}

impl KnowledgeBase {
    pub fn from_ontology(ontology: &Ontology) -> Self {
        let mut kb = Self::default();
        kb.abox.individuals.extend(ontology.individuals.iter().cloned());
        for axiom in &ontology.axioms {
            kb.add_axiom(axiom);
        }
        kb
    }

    pub fn add_axiom(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::SubClassOf(sub, sup) => {
                self.tbox.add_inclusion(Concept::from_expression(sub), Concept::from_expression(sup));
            }
            Axiom::EquivalentClasses(members) => {
                for window in members.windows(2) {
                    if let [c, d] = window {
                        self.add_equivalence(c, d);
                    }
                }
            }
            Axiom::DisjointClasses(members) => self.add_pairwise_disjoint(members),
            Axiom::DisjointUnion(whole, parts) => {
                self.add_equivalence(whole, &ClassExpression::UnionOf(parts.clone()));
                self.add_pairwise_disjoint(parts);
            }
            Axiom::SubObjectPropertyOf(sub, sup) => {
                self.tbox.add_role_inclusion(sub.iri().clone(), sup.iri().clone());
            }
            Axiom::ObjectPropertyDomain(property, class) => {
                self.tbox.add_domain(property.iri().clone(), Concept::from_expression(class));
            }
            Axiom::ObjectPropertyRange(property, class) => {
                self.tbox.add_range(property.iri().clone(), Concept::from_expression(class));
            }
            Axiom::SameIndividual(individuals) => {
                self.abox.individuals.extend(individuals.iter().cloned());
                for window in individuals.windows(2) {
                    if let [i1, i2] = window {
                        self.abox.same.push((i1.clone(), i2.clone()));
                    }
                }
            }
            Axiom::DifferentIndividuals(individuals) => {
                self.abox.individuals.extend(individuals.iter().cloned());
                for (i, first) in individuals.iter().enumerate() {
                    for second in &individuals[i + 1..] {
                        self.abox.different.push((first.clone(), second.clone()));
                    }
                }
            }
            Axiom::ClassAssertion(class, individual) => {
                self.abox.individuals.insert(individual.clone());
                self.abox.assertions.push((individual.clone(), Concept::from_expression(class)));
            }
            Axiom::ObjectPropertyAssertion(property, subject, object) => {
                self.abox.individuals.insert(subject.clone());
                self.abox.individuals.insert(object.clone());
                self.abox.role_assertions.push((subject.clone(), property.iri().clone(), object.clone()));
            }
        }
    }

    fn add_equivalence(&mut self, c: &ClassExpression, d: &ClassExpression) {
        self.tbox.add_inclusion(Concept::from_expression(c), Concept::from_expression(d));
        self.tbox.add_inclusion(Concept::from_expression(d), Concept::from_expression(c));
    }

    fn add_pairwise_disjoint(&mut self, members: &[ClassExpression]) {
        for (i, first) in members.iter().enumerate() {
            for second in &members[i + 1..] {
                self.tbox.add_inclusion(Concept::from_expression(first), Concept::negated_expression(second));
            }
        }
    }
}

/// Tableau node: an individual or an anonymous element generated by ∃
#[derive(Debug, Clone)]
struct Node {
    /// Concepts the element must satisfy
    labels: BTreeSet<Concept>,
    /// Generating node; `None` for roots
    parent: Option<NodeId>,
    /// Outgoing role edges
    edges: Vec<(OwlIri, NodeId)>,
}

/// Completion graph for the tableau algorithm
#[derive(Debug, Clone, Default)]
pub struct CompletionGraph {
    nodes: Vec<Node>,
}

impl CompletionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_root(&mut self, labels: impl IntoIterator<Item = Concept>) -> NodeId {
        self.nodes.push(Node {
            labels: labels.into_iter().collect(),
            parent: None,
            edges: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn add_successor(&mut self, parent: NodeId, role: OwlIri, labels: impl IntoIterator<Item = Concept>) -> NodeId {
        self.nodes.push(Node {
            labels: labels.into_iter().collect(),
            parent: Some(parent),
            edges: Vec::new(),
        });
        let id = self.nodes.len() - 1;
        self.add_edge(parent, role, id);
        id
    }

    pub fn add_label(&mut self, node: NodeId, concept: Concept) -> bool {
        match self.nodes.get_mut(node) {
            Some(n) => n.labels.insert(concept),
            None => false,
        }
    }

    pub fn has_label(&self, node: NodeId, concept: &Concept) -> bool {
        self.nodes.get(node).map_or(false, |n| n.labels.contains(concept))
    }

    pub fn add_edge(&mut self, from: NodeId, role: OwlIri, to: NodeId) {
        if let Some(n) = self.nodes.get_mut(from) {
            if !n.edges.iter().any(|(r, t)| *r == role && *t == to) {
                n.edges.push((role, to));
            }
        }
    }

    fn has_clash(&self) -> bool {
        self.nodes.iter().any(|node| {
            node.labels.iter().any(|label| match label {
                Concept::Bottom => true,
                Concept::Atom(iri) => node.labels.contains(&Concept::NotAtom(iri.clone())),
                _ => false,
            })
        })
    }

    /// Subset blocking: a tree node whose label is contained in a tree ancestor's label
    fn is_directly_blocked(&self, id: NodeId) -> bool {
        let labels = &self.nodes[id].labels;
        let mut ancestor = self.nodes[id].parent;
        while let Some(a) = ancestor {
            let node = &self.nodes[a];
            if node.parent.is_some() && labels.is_subset(&node.labels) {
                return true;
            }
            ancestor = node.parent;
        }
        false
    }

    fn is_blocked(&self, id: NodeId) -> bool {
        if self.nodes[id].parent.is_none() {
            return false;
        }
        if self.is_directly_blocked(id) {
            return true;
        }
        let mut ancestor = self.nodes[id].parent;
        while let Some(a) = ancestor {
            if self.nodes[a].parent.is_some() && self.is_directly_blocked(a) {
                return true;
            }
            ancestor = self.nodes[a].parent;
        }
        false
    }
}

/// Union-find over individuals for SameIndividual merging
#[derive(Debug, Default)]
struct IndividualPartition {
    parent: BTreeMap<Individual, Individual>,
}

impl IndividualPartition {
    fn find(&self, individual: &Individual) -> Individual {
        let mut current = individual;
        while let Some(next) = self.parent.get(current) {
            if next == current {
                break;
            }
            current = next;
        }
        current.clone()
    }

    fn union(&mut self, a: &Individual, b: &Individual) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent.insert(rb, ra);
        }
    }
}

/// Tableau expansion over one TBox with an expansion budget
pub struct Tableau<'a> {
    tbox: &'a Tbox,
    max_expansions: usize,
    expansions: usize,
}

impl<'a> Tableau<'a> {
    pub fn new(tbox: &'a Tbox, max_expansions: usize) -> Self {
        Self {
            tbox,
            max_expansions,
            expansions: 0,
        }
    }

    /// Number of expansion steps taken so far
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Whether the TBox together with `abox` has a model
    pub fn is_satisfiable(&mut self, abox: &Abox) -> Result<bool, ReasonerError> {
        match self.initial_graph(abox) {
            Some(graph) => self.expand(graph),
            None => Ok(false),
        }
    }

    /// Build root nodes; `None` if a DifferentIndividuals pair has been merged
    fn initial_graph(&self, abox: &Abox) -> Option<CompletionGraph> {
        let mut partition = IndividualPartition::default();
        for (a, b) in &abox.same {
            partition.union(a, b);
        }
        for (a, b) in &abox.different {
            if partition.find(a) == partition.find(b) {
                return None;
            }
        }

        let mut graph = CompletionGraph::new();
        let universal = self.tbox.universal.iter().cloned();

        // the domain is never empty
        graph.add_root(universal.clone().chain(std::iter::once(Concept::Top)));

        let mut roots: BTreeMap<Individual, NodeId> = BTreeMap::new();
        let mentioned = abox.individuals.iter()
            .chain(abox.assertions.iter().map(|(i, _)| i))
            .chain(abox.role_assertions.iter().flat_map(|(s, _, o)| [s, o]))
            .chain(abox.same.iter().flat_map(|(a, b)| [a, b]))
            .chain(abox.different.iter().flat_map(|(a, b)| [a, b]));
        for individual in mentioned {
            let representative = partition.find(individual);
            if !roots.contains_key(&representative) {
                let id = graph.add_root(universal.clone());
                roots.insert(representative, id);
            }
        }

        for (individual, concept) in &abox.assertions {
            if let Some(&node) = roots.get(&partition.find(individual)) {
                graph.add_label(node, concept.clone());
            }
        }
        for (subject, role, object) in &abox.role_assertions {
            let from = roots.get(&partition.find(subject));
            let to = roots.get(&partition.find(object));
            if let (Some(&from), Some(&to)) = (from, to) {
                graph.add_edge(from, role.clone(), to);
            }
        }
        for concept in &abox.anonymous {
            graph.add_root(universal.clone().chain(std::iter::once(concept.clone())));
        }

        Some(graph)
    }

    fn tick(&mut self) -> Result<(), ReasonerError> {
        self.expansions += 1;
        if self.expansions > self.max_expansions {
            return Err(ReasonerError::ResourceExhausted { limit: self.max_expansions });
        }
        Ok(())
    }

    fn expand(&mut self, mut graph: CompletionGraph) -> Result<bool, ReasonerError> {
        loop {
            self.tick()?;

            if graph.has_clash() {
                return Ok(false);
            }

            if self.apply_deterministic_rules(&mut graph) {
                continue;
            }

            if let Some((node, mut choices)) = self.next_disjunction(&graph) {
                match choices.len() {
                    0 => return Ok(false),
                    1 => {
                        graph.add_label(node, choices.remove(0));
                        continue;
                    }
                    _ => {
                        for choice in choices {
                            let mut branch = graph.clone();
                            branch.add_label(node, choice);
                            if self.expand(branch)? {
                                return Ok(true);
                            }
                        }
                        return Ok(false);
                    }
                }
            }

            if self.apply_existential_rule(&mut graph) {
                continue;
            }

            // complete and clash-free
            return Ok(true);
        }
    }

    /// ⊓-rule, unfolding, ∀-rule and domain rule to saturation of one pass
    fn apply_deterministic_rules(&self, graph: &mut CompletionGraph) -> bool {
        let mut additions: Vec<(NodeId, Concept)> = Vec::new();

        for (id, node) in graph.nodes.iter().enumerate() {
            for label in &node.labels {
                match label {
                    Concept::And(parts) => {
                        additions.extend(parts.iter().cloned().map(|c| (id, c)));
                    }
                    Concept::Atom(iri) => {
                        if let Some(definitions) = self.tbox.unfoldings.get(iri) {
                            additions.extend(definitions.iter().cloned().map(|c| (id, c)));
                        }
                    }
                    Concept::All(role, filler) => {
                        for (edge_role, target) in &node.edges {
                            if self.tbox.is_sub_role(edge_role, role) {
                                additions.push((*target, (**filler).clone()));
                            }
                        }
                    }
                    _ => {}
                }
            }

            for (edge_role, _) in &node.edges {
                for (role, domain) in &self.tbox.domains {
                    if self.tbox.is_sub_role(edge_role, role) {
                        additions.extend(domain.iter().cloned().map(|c| (id, c)));
                    }
                }
            }
        }

        let mut changed = false;
        for (id, concept) in additions {
            changed |= graph.add_label(id, concept);
        }
        changed
    }

    /// First unsatisfied disjunction, with the disjuncts that do not clash outright
    fn next_disjunction(&self, graph: &CompletionGraph) -> Option<(NodeId, Vec<Concept>)> {
        for (id, node) in graph.nodes.iter().enumerate() {
            for label in &node.labels {
                if let Concept::Or(disjuncts) = label {
                    if disjuncts.iter().any(|d| node.labels.contains(d)) {
                        continue;
                    }
                    let choices = disjuncts.iter()
                        .filter(|d| !node.labels.iter().any(|l| l.clashes_with(d)))
                        .cloned()
                        .collect();
                    return Some((id, choices));
                }
            }
        }
        None
    }

    /// ∃-rule: create one missing successor on an unblocked node
    fn apply_existential_rule(&self, graph: &mut CompletionGraph) -> bool {
        let mut pending = None;

        'nodes: for id in 0..graph.nodes.len() {
            if graph.is_blocked(id) {
                continue;
            }
            let node = &graph.nodes[id];
            for label in &node.labels {
                if let Concept::Some(role, filler) = label {
                    let satisfied = node.edges.iter().any(|(edge_role, target)| {
                        self.tbox.is_sub_role(edge_role, role) && graph.has_label(*target, filler)
                    });
                    if !satisfied {
                        pending = Some((id, role.clone(), (**filler).clone()));
                        break 'nodes;
                    }
                }
            }
        }

        match pending {
            Some((id, role, filler)) => {
                let labels = self.tbox.universal.iter().cloned().chain(std::iter::once(filler));
                graph.add_successor(id, role, labels);
                true
            }
            None => false,
        }
    }
}
