//! SHACL shape model types.
//!
//! This module defines the shape model consumed by the translator:
//! - [`ShapeId`] - Identifier for shapes (IRI or blank node)
//! - [`Shape`] - A node or property shape with its targets and constraints
//! - [`Target`] - Target declarations for selecting focus nodes
//! - [`ShapeProvider`] - Source of shapes for a translation run
//! - [`ShapesGraph`] - Collection of shapes built from an RDF graph

use oxrdf::dataset::CanonicalizationAlgorithm;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{BlankNode, Graph, NamedNode, NamedNodeRef, Term, TermRef};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

use crate::constraint::Constraint;
use crate::error::ShapeParseError;
use crate::vocab as sh;

/// Unique identifier for a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeId {
    /// Named shape (IRI).
    Named(NamedNode),
    /// Anonymous shape (blank node).
    Blank(BlankNode),
}

impl ShapeId {
    /// Converts to a Term.
    pub fn to_term(&self) -> Term {
        match self {
            Self::Named(n) => Term::NamedNode(n.clone()),
            Self::Blank(b) => Term::BlankNode(b.clone()),
        }
    }

    /// Ordering key: IRIs first, then blank nodes, each by identifier.
    fn sort_key(&self) -> (bool, &str) {
        match self {
            Self::Named(n) => (false, n.as_str()),
            Self::Blank(b) => (true, b.as_str()),
        }
    }
}

impl From<NamedNode> for ShapeId {
    fn from(n: NamedNode) -> Self {
        Self::Named(n)
    }
}

impl From<BlankNode> for ShapeId {
    fn from(b: BlankNode) -> Self {
        Self::Blank(b)
    }
}

impl TryFrom<Term> for ShapeId {
    type Error = ShapeParseError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::NamedNode(n) => Ok(Self::Named(n)),
            Term::BlankNode(b) => Ok(Self::Blank(b)),
            _ => Err(ShapeParseError::invalid_shape(
                term,
                "Shape reference must be an IRI or blank node",
            )),
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "<{}>", n.as_str()),
            Self::Blank(b) => write!(f, "_:{}", b.as_str()),
        }
    }
}

/// Target declaration for selecting focus nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A specific node.
    Node(Term),
    /// All instances of a class.
    Class(Term),
    /// Implicit class target (the shape is also a class).
    ImplicitClass(NamedNode),
    /// All objects of triples with the given predicate.
    ObjectsOf(Term),
    /// All subjects of triples with the given predicate.
    SubjectsOf(Term),
}

/// Severity declared on a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Violation severity (most severe).
    #[default]
    Violation,
    /// Warning severity.
    Warning,
    /// Info severity (least severe).
    Info,
    /// Any other severity IRI.
    Custom(NamedNode),
}

impl Severity {
    /// Returns the IRI for this severity level.
    pub fn iri(&self) -> NamedNodeRef<'_> {
        match self {
            Self::Violation => sh::VIOLATION,
            Self::Warning => sh::WARNING,
            Self::Info => sh::INFO,
            Self::Custom(iri) => iri.as_ref(),
        }
    }

    /// Parses a severity from an IRI.
    pub fn from_iri(iri: NamedNodeRef<'_>) -> Self {
        if iri == sh::VIOLATION {
            Self::Violation
        } else if iri == sh::WARNING {
            Self::Warning
        } else if iri == sh::INFO {
            Self::Info
        } else {
            Self::Custom(iri.into_owned())
        }
    }
}

/// A node or property shape.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Shape identifier.
    pub id: ShapeId,
    /// Values of `sh:name`, the first one is the preferred Datalog name.
    pub names: Vec<String>,
    /// Whether the shape has a `sh:path`.
    pub is_property_shape: bool,
    /// Shape severity level.
    pub severity: Severity,
    /// Human-readable descriptions.
    pub description: Vec<Term>,
    /// Custom validation messages.
    pub message: Vec<Term>,
    /// Whether the shape is deactivated.
    pub deactivated: bool,
    /// Target declarations.
    pub targets: Vec<Target>,
    /// Constraints to apply, in declaration order.
    pub constraints: Vec<Constraint>,
}

impl Shape {
    /// Creates a new node shape with the given ID.
    pub fn new(id: impl Into<ShapeId>) -> Self {
        Self {
            id: id.into(),
            names: Vec::new(),
            is_property_shape: false,
            severity: Severity::Violation,
            description: Vec::new(),
            message: Vec::new(),
            deactivated: false,
            targets: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// The name the shape would like to be known by in Datalog.
    pub fn preferred_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Adds a target to this shape.
    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Adds a constraint to this shape.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }
}

/// A source of shapes for a translation run.
///
/// Implementations must iterate in the same order every time they are asked.
pub trait ShapeProvider {
    /// Returns all the shapes to translate.
    fn shapes(&self) -> impl Iterator<Item = &Shape>;

    /// Resolves a shape referenced by a shape-valued constraint.
    fn shape(&self, id: &ShapeId) -> Option<&Shape>;
}

/// Collection of shapes built from an RDF graph.
#[derive(Debug, Clone, Default)]
pub struct ShapesGraph {
    shapes: FxHashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl ShapesGraph {
    /// Creates a new empty shapes graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the shapes declared in an RDF graph.
    ///
    /// Blank nodes are relabeled with [`Graph::canonicalize`] first, so two parses of the same
    /// document give the same shape order and the same blank node ids.
    pub fn from_graph(graph: &Graph) -> Result<Self, ShapeParseError> {
        let mut graph = graph.clone();
        graph.canonicalize(CanonicalizationAlgorithm::Unstable);

        let mut ids = discover_shapes(&graph)?.into_iter().collect::<Vec<_>>();
        ids.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut shapes_graph = Self::new();
        for id in ids {
            let shape = parse_shape(&graph, id)?;
            shapes_graph.add_shape(shape);
        }
        Ok(shapes_graph)
    }

    /// Adds a shape, replacing any previous shape with the same ID.
    pub fn add_shape(&mut self, shape: Shape) {
        if !self.shapes.contains_key(&shape.id) {
            self.order.push(shape.id.clone());
        }
        self.shapes.insert(shape.id.clone(), shape);
    }

    /// Gets a shape by ID.
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Returns an iterator over all shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Returns true if the shapes graph is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Returns the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

impl ShapeProvider for ShapesGraph {
    fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.iter()
    }

    fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.get(id)
    }
}

// Shape discovery

const TARGET_PREDICATES: [NamedNodeRef<'static>; 4] = [
    sh::TARGET_NODE,
    sh::TARGET_CLASS,
    sh::TARGET_OBJECTS_OF,
    sh::TARGET_SUBJECTS_OF,
];

fn discover_shapes(graph: &Graph) -> Result<FxHashSet<ShapeId>, ShapeParseError> {
    let mut ids = FxHashSet::default();

    for class in [sh::NODE_SHAPE, sh::PROPERTY_SHAPE] {
        for subject in graph.subjects_for_predicate_object(rdf::TYPE, class) {
            ids.insert(ShapeId::try_from(Term::from(subject.into_owned()))?);
        }
    }

    for predicate in TARGET_PREDICATES.into_iter().chain([sh::PATH]) {
        for triple in graph.triples_for_predicate(predicate) {
            ids.insert(ShapeId::try_from(Term::from(triple.subject.into_owned()))?);
        }
    }

    for predicate in [sh::PROPERTY, sh::NODE, sh::NOT, sh::QUALIFIED_VALUE_SHAPE] {
        for triple in graph.triples_for_predicate(predicate) {
            ids.insert(ShapeId::try_from(triple.object.into_owned())?);
        }
    }

    for predicate in [sh::AND, sh::OR, sh::XONE] {
        for triple in graph.triples_for_predicate(predicate) {
            let owner = Term::from(triple.subject.into_owned());
            for member in parse_list(graph, triple.object.into_owned(), &owner)? {
                ids.insert(ShapeId::try_from(member)?);
            }
        }
    }

    Ok(ids)
}

// Shape parsing

fn parse_shape(graph: &Graph, id: ShapeId) -> Result<Shape, ShapeParseError> {
    let term = id.to_term();
    let mut shape = Shape::new(id);

    shape.is_property_shape = get_object(graph, &term, sh::PATH).is_some();
    parse_metadata(graph, &term, &mut shape)?;
    parse_targets(graph, &term, &mut shape);
    parse_constraints(graph, &term, &mut shape)?;

    Ok(shape)
}

fn parse_metadata(
    graph: &Graph,
    shape_term: &Term,
    shape: &mut Shape,
) -> Result<(), ShapeParseError> {
    shape.names = get_objects(graph, shape_term, sh::NAME)
        .into_iter()
        .filter_map(|t| match t {
            Term::Literal(lit) => Some(lit.value().to_owned()),
            _ => None,
        })
        .collect();

    if let Some(severity) = get_object(graph, shape_term, sh::SEVERITY) {
        let Term::NamedNode(severity) = severity else {
            return Err(ShapeParseError::invalid_property_value(
                shape_term.clone(),
                sh::SEVERITY,
                "an IRI",
                severity,
            ));
        };
        shape.severity = Severity::from_iri(severity.as_ref());
    }

    shape.description = get_objects(graph, shape_term, sh::DESCRIPTION);
    shape.message = get_objects(graph, shape_term, sh::MESSAGE);
    shape.deactivated = get_boolean(graph, shape_term, sh::DEACTIVATED).unwrap_or(false);

    Ok(())
}

fn parse_targets(graph: &Graph, shape_term: &Term, shape: &mut Shape) {
    for node in get_objects(graph, shape_term, sh::TARGET_NODE) {
        shape.add_target(Target::Node(node));
    }
    for class in get_objects(graph, shape_term, sh::TARGET_CLASS) {
        shape.add_target(Target::Class(class));
    }
    if let Term::NamedNode(n) = shape_term {
        if graph
            .objects_for_subject_predicate(n, rdf::TYPE)
            .any(|t| t == TermRef::NamedNode(rdfs::CLASS))
        {
            shape.add_target(Target::ImplicitClass(n.clone()));
        }
    }
    for predicate in get_objects(graph, shape_term, sh::TARGET_OBJECTS_OF) {
        shape.add_target(Target::ObjectsOf(predicate));
    }
    for predicate in get_objects(graph, shape_term, sh::TARGET_SUBJECTS_OF) {
        shape.add_target(Target::SubjectsOf(predicate));
    }
}

fn parse_constraints(
    graph: &Graph,
    shape_term: &Term,
    shape: &mut Shape,
) -> Result<(), ShapeParseError> {
    // Cardinality
    if let Some(n) = get_count(graph, shape_term, sh::MIN_COUNT)? {
        shape.add_constraint(Constraint::MinCount(n));
    }
    if let Some(n) = get_count(graph, shape_term, sh::MAX_COUNT)? {
        shape.add_constraint(Constraint::MaxCount(n));
    }

    // Logical
    let not = get_shape_ids(graph, shape_term, sh::NOT)?;
    if !not.is_empty() {
        shape.add_constraint(Constraint::Not(not));
    }
    if let Some(list) = get_object(graph, shape_term, sh::AND) {
        shape.add_constraint(Constraint::And(parse_shape_list(graph, list, shape_term)?));
    }
    if let Some(list) = get_object(graph, shape_term, sh::OR) {
        shape.add_constraint(Constraint::Or(parse_shape_list(graph, list, shape_term)?));
    }
    if let Some(list) = get_object(graph, shape_term, sh::XONE) {
        shape.add_constraint(Constraint::Xone(parse_shape_list(graph, list, shape_term)?));
    }

    // Property pairs
    let pairs: [(NamedNodeRef<'_>, fn(Vec<NamedNode>) -> Constraint); 4] = [
        (sh::EQUALS, Constraint::Equals),
        (sh::DISJOINT, Constraint::Disjoint),
        (sh::LESS_THAN, Constraint::LessThan),
        (sh::LESS_THAN_OR_EQUALS, Constraint::LessThanOrEquals),
    ];
    for (predicate, constraint) in pairs {
        let properties = get_named_nodes(graph, shape_term, predicate)?;
        if !properties.is_empty() {
            shape.add_constraint(constraint(properties));
        }
    }

    // Shape-based
    let properties = get_shape_ids(graph, shape_term, sh::PROPERTY)?;
    if !properties.is_empty() {
        shape.add_constraint(Constraint::Property(properties));
    }
    let nodes = get_shape_ids(graph, shape_term, sh::NODE)?;
    if !nodes.is_empty() {
        shape.add_constraint(Constraint::Node(nodes));
    }
    let qualified = get_shape_ids(graph, shape_term, sh::QUALIFIED_VALUE_SHAPE)?;
    if !qualified.is_empty() {
        shape.add_constraint(Constraint::QualifiedValueShape {
            shapes: qualified,
            min_count: get_count(graph, shape_term, sh::QUALIFIED_MIN_COUNT)?,
            max_count: get_count(graph, shape_term, sh::QUALIFIED_MAX_COUNT)?,
            disjoint: get_boolean(graph, shape_term, sh::QUALIFIED_VALUE_SHAPES_DISJOINT)
                .unwrap_or(false),
        });
    }

    // String-based
    if let Some(length) = get_object(graph, shape_term, sh::MIN_LENGTH) {
        shape.add_constraint(Constraint::MinLength(length));
    }
    if let Some(length) = get_object(graph, shape_term, sh::MAX_LENGTH) {
        shape.add_constraint(Constraint::MaxLength(length));
    }
    if let Some(pattern) = get_object(graph, shape_term, sh::PATTERN) {
        let flags = get_object(graph, shape_term, sh::FLAGS);
        shape.add_constraint(Constraint::Pattern { pattern, flags });
    }
    if let Some(list) = get_object(graph, shape_term, sh::LANGUAGE_IN) {
        shape.add_constraint(Constraint::LanguageIn(parse_list(graph, list, shape_term)?));
    }
    if get_boolean(graph, shape_term, sh::UNIQUE_LANG) == Some(true) {
        shape.add_constraint(Constraint::UniqueLang);
    }

    // Value type
    let classes = get_objects(graph, shape_term, sh::CLASS);
    if !classes.is_empty() {
        shape.add_constraint(Constraint::Class(classes));
    }
    if let Some(datatype) = get_named_nodes(graph, shape_term, sh::DATATYPE)?.into_iter().next() {
        shape.add_constraint(Constraint::Datatype(datatype));
    }
    if let Some(kind) = get_named_nodes(graph, shape_term, sh::NODE_KIND)?.into_iter().next() {
        shape.add_constraint(Constraint::NodeKind(kind));
    }

    // Value range
    let ranges: [(NamedNodeRef<'_>, fn(Vec<Term>) -> Constraint); 4] = [
        (sh::MIN_EXCLUSIVE, Constraint::MinExclusive),
        (sh::MIN_INCLUSIVE, Constraint::MinInclusive),
        (sh::MAX_EXCLUSIVE, Constraint::MaxExclusive),
        (sh::MAX_INCLUSIVE, Constraint::MaxInclusive),
    ];
    for (predicate, constraint) in ranges {
        let bounds = get_objects(graph, shape_term, predicate);
        if !bounds.is_empty() {
            shape.add_constraint(constraint(bounds));
        }
    }

    // Other
    if get_boolean(graph, shape_term, sh::CLOSED) == Some(true) {
        let ignored_properties = match get_object(graph, shape_term, sh::IGNORED_PROPERTIES) {
            Some(list) => parse_list(graph, list, shape_term)?
                .into_iter()
                .filter_map(|t| match t {
                    Term::NamedNode(n) => Some(n),
                    _ => None,
                })
                .collect(),
            None => Vec::new(),
        };
        shape.add_constraint(Constraint::Closed { ignored_properties });
    }
    let values = get_objects(graph, shape_term, sh::HAS_VALUE);
    if !values.is_empty() {
        shape.add_constraint(Constraint::HasValue(values));
    }
    if let Some(list) = get_object(graph, shape_term, sh::IN) {
        shape.add_constraint(Constraint::In(parse_list(graph, list, shape_term)?));
    }

    Ok(())
}

// Helper functions

/// All objects of the subject and predicate, sorted by their N-Triples serialization.
///
/// The graph indexes are hash based, sorting keeps the shape model independent of them.
fn get_objects(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Vec<Term> {
    let mut objects: Vec<Term> = match subject {
        Term::NamedNode(n) => graph
            .objects_for_subject_predicate(n, predicate)
            .map(TermRef::into_owned)
            .collect(),
        Term::BlankNode(b) => graph
            .objects_for_subject_predicate(b, predicate)
            .map(TermRef::into_owned)
            .collect(),
        _ => Vec::new(),
    };
    objects.sort_by_cached_key(Term::to_string);
    objects
}

fn get_object(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Option<Term> {
    get_objects(graph, subject, predicate).into_iter().next()
}

fn get_named_nodes(
    graph: &Graph,
    subject: &Term,
    predicate: NamedNodeRef<'_>,
) -> Result<Vec<NamedNode>, ShapeParseError> {
    get_objects(graph, subject, predicate)
        .into_iter()
        .map(|t| match t {
            Term::NamedNode(n) => Ok(n),
            t => Err(ShapeParseError::invalid_property_value(
                subject.clone(),
                predicate,
                "an IRI",
                t,
            )),
        })
        .collect()
}

fn get_shape_ids(
    graph: &Graph,
    subject: &Term,
    predicate: NamedNodeRef<'_>,
) -> Result<Vec<ShapeId>, ShapeParseError> {
    get_objects(graph, subject, predicate)
        .into_iter()
        .map(ShapeId::try_from)
        .collect()
}

fn get_count(
    graph: &Graph,
    subject: &Term,
    predicate: NamedNodeRef<'_>,
) -> Result<Option<u64>, ShapeParseError> {
    let Some(object) = get_object(graph, subject, predicate) else {
        return Ok(None);
    };
    if let Term::Literal(lit) = &object {
        if let Ok(n) = lit.value().parse() {
            return Ok(Some(n));
        }
    }
    Err(ShapeParseError::invalid_property_value(
        subject.clone(),
        predicate,
        "a non-negative integer",
        object,
    ))
}

fn get_boolean(graph: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Option<bool> {
    match get_object(graph, subject, predicate)? {
        Term::Literal(lit) => match lit.value() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Collects the members of an RDF list.
fn parse_list(graph: &Graph, list_head: Term, shape: &Term) -> Result<Vec<Term>, ShapeParseError> {
    let mut terms = Vec::new();
    let mut visited = FxHashSet::default();
    let mut current = list_head;

    loop {
        if let Term::NamedNode(n) = &current {
            if n.as_ref() == rdf::NIL {
                break;
            }
        }
        if !visited.insert(current.clone()) {
            return Err(ShapeParseError::invalid_rdf_list(
                shape.clone(),
                "The list loops on itself",
            ));
        }

        let first = get_object(graph, &current, rdf::FIRST).ok_or_else(|| {
            ShapeParseError::invalid_rdf_list(shape.clone(), "Missing rdf:first")
        })?;
        terms.push(first);

        current = get_object(graph, &current, rdf::REST).ok_or_else(|| {
            ShapeParseError::invalid_rdf_list(shape.clone(), "Missing rdf:rest")
        })?;
    }

    Ok(terms)
}

fn parse_shape_list(
    graph: &Graph,
    list_head: Term,
    shape: &Term,
) -> Result<Vec<ShapeId>, ShapeParseError> {
    parse_list(graph, list_head, shape)?
        .into_iter()
        .map(ShapeId::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{Literal, Triple};

    fn ex(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{name}"))
    }

    #[test]
    fn test_parse_empty_shapes_graph() {
        let graph = Graph::new();
        let shapes = ShapesGraph::from_graph(&graph).unwrap();
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_parse_simple_node_shape() {
        let mut graph = Graph::new();
        let shape_node = ex("PersonShape");

        graph.insert(&Triple::new(shape_node.clone(), rdf::TYPE, sh::NODE_SHAPE));
        graph.insert(&Triple::new(shape_node.clone(), sh::TARGET_CLASS, ex("Person")));
        graph.insert(&Triple::new(
            shape_node.clone(),
            sh::MIN_COUNT,
            Literal::from(1),
        ));

        let shapes = ShapesGraph::from_graph(&graph).unwrap();
        assert_eq!(shapes.len(), 1);

        let shape = shapes.get(&ShapeId::Named(shape_node)).unwrap();
        assert!(!shape.is_property_shape);
        assert_eq!(shape.targets, [Target::Class(ex("Person").into())]);
        assert_eq!(shape.constraints, [Constraint::MinCount(1)]);
        assert_eq!(shape.severity, Severity::Violation);
    }

    #[test]
    fn test_property_values_are_shapes() {
        let mut graph = Graph::new();
        let parent = ex("Parent");
        let child = BlankNode::new_unchecked("child");

        graph.insert(&Triple::new(parent.clone(), rdf::TYPE, sh::NODE_SHAPE));
        graph.insert(&Triple::new(parent.clone(), sh::PROPERTY, child.clone()));
        graph.insert(&Triple::new(child.clone(), sh::PATH, ex("name")));

        let shapes = ShapesGraph::from_graph(&graph).unwrap();
        let shapes = shapes.iter().collect::<Vec<_>>();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].id, ShapeId::Named(parent));
        assert!(!shapes[0].is_property_shape);
        assert!(matches!(shapes[1].id, ShapeId::Blank(_)));
        assert!(shapes[1].is_property_shape);
    }

    #[test]
    fn test_blank_node_labels_do_not_leak_into_shapes() {
        let build = |first: &str, second: &str| {
            let mut graph = Graph::new();
            let parent = ex("Parent");
            for (label, path, count) in [(first, "p", 1), (second, "q", 2)] {
                let property = BlankNode::new_unchecked(label);
                graph.insert(&Triple::new(parent.clone(), sh::PROPERTY, property.clone()));
                graph.insert(&Triple::new(property.clone(), sh::PATH, ex(path)));
                graph.insert(&Triple::new(property, sh::MIN_COUNT, Literal::from(count)));
            }
            ShapesGraph::from_graph(&graph).unwrap()
        };
        let summary = |shapes: &ShapesGraph| {
            shapes
                .iter()
                .map(|s| (s.id.clone(), s.constraints.clone()))
                .collect::<Vec<_>>()
        };
        let left = build("a", "b");
        let right = build("zz", "0");
        assert_eq!(summary(&left), summary(&right));
        assert!(
            left.iter()
                .all(|s| !matches!(&s.id, ShapeId::Blank(b) if ["a", "b"].contains(&b.as_str())))
        );
    }

    #[test]
    fn test_invalid_count_is_rejected() {
        let mut graph = Graph::new();
        let shape_node = ex("S");
        graph.insert(&Triple::new(shape_node.clone(), rdf::TYPE, sh::NODE_SHAPE));
        graph.insert(&Triple::new(
            shape_node,
            sh::MIN_COUNT,
            Literal::new_simple_literal("many"),
        ));
        assert!(matches!(
            ShapesGraph::from_graph(&graph),
            Err(ShapeParseError::InvalidPropertyValue { .. })
        ));
    }

    #[test]
    fn test_severity_from_iri() {
        assert_eq!(Severity::from_iri(sh::WARNING), Severity::Warning);
        assert_eq!(
            Severity::from_iri(ex("Fatal").as_ref()),
            Severity::Custom(ex("Fatal"))
        );
        assert_eq!(Severity::Info.iri(), sh::INFO);
    }
}
