//! Translation of shapes into Datalog programs.

use oxrdf::{Graph, Term};
use tracing::{debug, warn};

use crate::constraint::Constraint;
use crate::error::{ShaclError, TranslateError};
use crate::model::{Shape, ShapeId, ShapeProvider, ShapesGraph, Target};
use crate::name::{Namespace, is_identifier};
use crate::program::{Atom, DEFAULT_INCLUDE, Predicate, Program, Rule};
use crate::term::{quote, serialize};

/// Variable bound to the focus nodes in target rules.
const FOCUS_VARIABLE: &str = "X";
const ANONYMOUS_VARIABLE: &str = "_";

/// Options for a translation run.
///
/// ```
/// use shacl2datalog::TranslateOptions;
///
/// let options = TranslateOptions::default()
///     .with_include("lib/shacl.dl")
///     .permissive();
/// assert_eq!(options.include(), "lib/shacl.dl");
/// assert!(!options.is_strict());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    include: String,
    strict: bool,
}

impl TranslateOptions {
    /// Sets the path of the library file in the `.include` directive.
    ///
    /// Default: `shacl.dl`.
    #[must_use]
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Skips the constraints without a Datalog counterpart instead of failing.
    ///
    /// The skipped constraints are reported as `tracing` warnings.
    #[must_use]
    pub fn permissive(mut self) -> Self {
        self.strict = false;
        self
    }

    /// The path written in the `.include` directive.
    pub fn include(&self) -> &str {
        &self.include
    }

    /// Whether constraints without a Datalog counterpart abort the translation.
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.to_owned(),
            strict: true,
        }
    }
}

/// Translates every shape of the provider into a single program.
///
/// Shapes are named and translated one after the other in the provider order.
/// The first error aborts the run.
pub fn translate<P: ShapeProvider>(
    provider: &P,
    options: &TranslateOptions,
) -> Result<Program, TranslateError> {
    ShapeTranslator::new(provider, options.clone()).translate()
}

/// Builds the shapes declared in an RDF graph with [`ShapesGraph::from_graph`] and translates them.
pub fn translate_graph(graph: &Graph, options: &TranslateOptions) -> Result<Program, ShaclError> {
    let shapes = ShapesGraph::from_graph(graph)?;
    debug!(shapes = shapes.len(), "shapes graph built");
    Ok(translate(&shapes, options)?)
}

/// Compiles shapes into Datalog facts and rules.
///
/// Shape-valued constraints (`sh:property`, `sh:node`, `sh:qualifiedValueShape`)
/// are resolved with the provider and translated recursively under fresh names.
pub struct ShapeTranslator<'a, P: ShapeProvider> {
    provider: &'a P,
    options: TranslateOptions,
}

impl<'a, P: ShapeProvider> ShapeTranslator<'a, P> {
    pub fn new(provider: &'a P, options: TranslateOptions) -> Self {
        Self { provider, options }
    }

    /// Translates all the shapes of the provider.
    pub fn translate(&self) -> Result<Program, TranslateError> {
        let mut program = self.new_program();
        let mut namespace = Namespace::new();
        for shape in self.provider.shapes() {
            let (name, ns) = namespace.allocate(shape.preferred_name());
            let (fragment, ns) = self.translate_fragment(&name, shape, ns, &mut Vec::new())?;
            namespace = ns;
            program.extend(fragment);
        }
        debug!(rules = program.len(), "translated shapes graph");
        Ok(program)
    }

    /// Translates one shape already named `name`.
    ///
    /// Returns the fragment of the shape and of all the shapes it recursively references,
    /// together with the namespace updated with every name allocated on the way.
    pub fn translate_shape(
        &self,
        name: &str,
        shape: &Shape,
        namespace: Namespace,
    ) -> Result<(Program, Namespace), TranslateError> {
        if !is_identifier(name) {
            return Err(TranslateError::malformed_name(name));
        }
        self.translate_fragment(name, shape, namespace, &mut Vec::new())
    }

    fn new_program(&self) -> Program {
        Program::new().with_include(self.options.include())
    }

    fn translate_fragment(
        &self,
        name: &str,
        shape: &Shape,
        mut namespace: Namespace,
        ancestors: &mut Vec<ShapeId>,
    ) -> Result<(Program, Namespace), TranslateError> {
        debug!(shape = %shape.id, name, "translating shape");
        let mut program = self.new_program();
        emit_metadata(name, shape, &mut program)?;
        emit_targets(name, &shape.targets, &mut program)?;

        ancestors.push(shape.id.clone());
        for constraint in &shape.constraints {
            namespace = self.emit_constraint(name, constraint, namespace, ancestors, &mut program)?;
        }
        ancestors.pop();

        Ok((program, namespace))
    }

    fn emit_constraint(
        &self,
        name: &str,
        constraint: &Constraint,
        namespace: Namespace,
        ancestors: &mut Vec<ShapeId>,
        program: &mut Program,
    ) -> Result<Namespace, TranslateError> {
        let kind = constraint.name();
        match constraint {
            // Cardinality
            Constraint::MinCount(0) => (),
            Constraint::MinCount(count) => {
                emit(program, Predicate::MinCountConstr, [name.to_owned(), count.to_string()]);
            }
            Constraint::MaxCount(count) => {
                emit(program, Predicate::MaxCountConstr, [name.to_owned(), count.to_string()]);
            }

            // Logical
            Constraint::Not(shapes) => {
                for shape in shapes {
                    emit(program, Predicate::NotConstr, [name.to_owned(), constant(name, kind, &shape.to_term())?]);
                }
            }
            Constraint::And(shapes) => {
                emit_logical(name, kind, Predicate::AndConstr, Predicate::AndShape, shapes, program)?;
            }
            Constraint::Or(shapes) => {
                emit_logical(name, kind, Predicate::OrConstr, Predicate::OrShape, shapes, program)?;
            }
            Constraint::Xone(shapes) => {
                emit_logical(name, kind, Predicate::XoneConstr, Predicate::XoneShape, shapes, program)?;
            }

            // Property pairs
            Constraint::Equals(properties) => {
                emit_each(name, kind, Predicate::EqualsConstr, properties.iter().cloned().map(Term::from), program)?;
            }
            Constraint::Disjoint(properties) => {
                emit_each(name, kind, Predicate::DisjointConstr, properties.iter().cloned().map(Term::from), program)?;
            }
            Constraint::LessThan(properties) => {
                emit_each(name, kind, Predicate::LessThanConstr, properties.iter().cloned().map(Term::from), program)?;
            }
            Constraint::LessThanOrEquals(properties) => {
                emit_each(
                    name,
                    kind,
                    Predicate::LessThanOrEqConstr,
                    properties.iter().cloned().map(Term::from),
                    program,
                )?;
            }

            // Shape-based
            Constraint::Property(shapes) => {
                return self.emit_nested(name, Predicate::PropertyConstr, shapes, namespace, ancestors, program);
            }
            Constraint::Node(shapes) => {
                return self.emit_nested(name, Predicate::NodeConstr, shapes, namespace, ancestors, program);
            }
            Constraint::QualifiedValueShape {
                shapes,
                min_count,
                max_count,
                disjoint,
            } => {
                let namespace = self.emit_nested(
                    name,
                    Predicate::QualifiedValueConstr,
                    shapes,
                    namespace,
                    ancestors,
                    program,
                )?;
                if let Some(count) = min_count {
                    emit(program, Predicate::QualifiedMinCount, [name.to_owned(), count.to_string()]);
                }
                if let Some(count) = max_count {
                    emit(program, Predicate::QualifiedMaxCount, [name.to_owned(), count.to_string()]);
                }
                if *disjoint {
                    emit(program, Predicate::QualifiedValueDisjoint, [name]);
                }
                return Ok(namespace);
            }

            // String-based
            Constraint::MinLength(length) => {
                emit(program, Predicate::MinLengthConstr, [name.to_owned(), constant(name, kind, length)?]);
            }
            Constraint::MaxLength(length) => {
                emit(program, Predicate::MaxLengthConstr, [name.to_owned(), constant(name, kind, length)?]);
            }
            Constraint::Pattern { pattern, flags } => {
                if let Some(flags) = flags {
                    warn!(name, %flags, "regular expression flags have no Datalog translation, ignoring them");
                }
                emit(program, Predicate::PatternConstr, [name.to_owned(), constant(name, kind, pattern)?]);
            }
            Constraint::LanguageIn(languages) => {
                emit_each(name, kind, Predicate::ConstrLanguageTag, languages.iter().cloned(), program)?;
                emit(program, Predicate::LanguageInConstr, [name]);
            }
            Constraint::UniqueLang => {
                emit(program, Predicate::UniqueLangConstr, [name]);
            }

            // Value type
            Constraint::Class(classes) => {
                emit_each(name, kind, Predicate::ClassConstr, classes.iter().cloned(), program)?;
            }
            Constraint::Datatype(datatype) => {
                let datatype = constant(name, kind, &datatype.clone().into())?;
                emit(program, Predicate::DatatypeConstr, [name.to_owned(), datatype]);
            }
            Constraint::NodeKind(node_kind) => {
                let node_kind = constant(name, kind, &node_kind.clone().into())?;
                emit(program, Predicate::NodeKindConstr, [name.to_owned(), node_kind]);
            }

            // Value range
            Constraint::MinExclusive(bounds) => {
                emit_each(name, kind, Predicate::MinExclusiveConstr, bounds.iter().cloned(), program)?;
            }
            Constraint::MinInclusive(bounds) => {
                emit_each(name, kind, Predicate::MinInclusiveConstr, bounds.iter().cloned(), program)?;
            }
            Constraint::MaxExclusive(bounds) => {
                emit_each(name, kind, Predicate::MaxExclusiveConstr, bounds.iter().cloned(), program)?;
            }
            Constraint::MaxInclusive(bounds) => {
                emit_each(name, kind, Predicate::MaxInclusiveConstr, bounds.iter().cloned(), program)?;
            }

            // No Datalog counterpart
            Constraint::Closed { .. } | Constraint::HasValue(_) | Constraint::In(_) => {
                self.unrecognized(name, kind)?;
            }
        }
        Ok(namespace)
    }

    /// Translates the referenced shapes under fresh names and links them to `name`.
    fn emit_nested(
        &self,
        name: &str,
        predicate: Predicate,
        shapes: &[ShapeId],
        mut namespace: Namespace,
        ancestors: &mut Vec<ShapeId>,
        program: &mut Program,
    ) -> Result<Namespace, TranslateError> {
        for reference in shapes {
            if ancestors.contains(reference) {
                return Err(TranslateError::cyclic_shape_reference(name, reference.clone()));
            }
            let shape = self
                .provider
                .shape(reference)
                .ok_or_else(|| TranslateError::unknown_shape(name, reference.clone()))?;
            let (sub_name, ns) = namespace.allocate(shape.preferred_name());
            let (fragment, ns) = self.translate_fragment(&sub_name, shape, ns, ancestors)?;
            namespace = ns;
            program.extend(fragment);
            emit(program, predicate, [name.to_owned(), sub_name]);
        }
        Ok(namespace)
    }

    fn unrecognized(&self, name: &str, kind: &'static str) -> Result<(), TranslateError> {
        if self.options.is_strict() {
            return Err(TranslateError::unrecognized_constraint_kind(name, kind));
        }
        warn!(name, kind, "skipping constraint without Datalog translation");
        Ok(())
    }
}

fn emit_metadata(name: &str, shape: &Shape, program: &mut Program) -> Result<(), TranslateError> {
    emit_each(name, "description", Predicate::Description, shape.description.iter().cloned(), program)?;
    emit_each(name, "message", Predicate::Message, shape.message.iter().cloned(), program)?;
    if shape.deactivated {
        emit(program, Predicate::Deactivated, [name]);
    }
    emit(
        program,
        Predicate::Severity,
        [name.to_owned(), quote(shape.severity.iri().as_str())],
    );
    let kind = if shape.is_property_shape {
        Predicate::PropertyShape
    } else {
        Predicate::NodeShape
    };
    program.push(Rule::fact(Atom::new(kind, [name])).with_comment(shape.id.to_string()));
    Ok(())
}

fn emit_targets(name: &str, targets: &[Target], program: &mut Program) -> Result<(), TranslateError> {
    let head = || Atom::new(Predicate::Target, [name, FOCUS_VARIABLE]);
    for target in targets {
        match target {
            Target::Node(node) => {
                emit(program, Predicate::Target, [name.to_owned(), constant(name, "targetNode", node)?]);
            }
            Target::Class(class) => {
                let class = constant(name, "targetClass", class)?;
                program.push(Rule::new(
                    head(),
                    [Atom::new(Predicate::InstanceOf, [class.as_str(), FOCUS_VARIABLE])],
                ));
            }
            Target::ImplicitClass(class) => {
                let class = constant(name, "targetClass", &class.clone().into())?;
                program.push(Rule::new(
                    head(),
                    [Atom::new(Predicate::InstanceOf, [class.as_str(), FOCUS_VARIABLE])],
                ));
            }
            Target::ObjectsOf(predicate) => {
                let predicate = constant(name, "targetObjectsOf", predicate)?;
                program.push(Rule::new(
                    head(),
                    [Atom::new(
                        Predicate::Path,
                        [ANONYMOUS_VARIABLE, predicate.as_str(), FOCUS_VARIABLE],
                    )],
                ));
            }
            Target::SubjectsOf(predicate) => {
                let predicate = constant(name, "targetSubjectsOf", predicate)?;
                program.push(Rule::new(
                    head(),
                    [Atom::new(
                        Predicate::Path,
                        [FOCUS_VARIABLE, predicate.as_str(), ANONYMOUS_VARIABLE],
                    )],
                ));
            }
        }
    }
    Ok(())
}

/// Emits the `constr(N)` marker then one `shape(N, member)` fact per member.
fn emit_logical(
    name: &str,
    kind: &'static str,
    constr: Predicate,
    member: Predicate,
    shapes: &[ShapeId],
    program: &mut Program,
) -> Result<(), TranslateError> {
    emit(program, constr, [name]);
    emit_each(name, kind, member, shapes.iter().map(ShapeId::to_term), program)
}

/// Emits one `predicate(N, value)` fact per value of the `sh:<kind>` parameter.
fn emit_each(
    name: &str,
    kind: &'static str,
    predicate: Predicate,
    values: impl IntoIterator<Item = Term>,
    program: &mut Program,
) -> Result<(), TranslateError> {
    for value in values {
        emit(program, predicate, [name.to_owned(), constant(name, kind, &value)?]);
    }
    Ok(())
}

fn emit(program: &mut Program, predicate: Predicate, args: impl IntoIterator<Item = impl Into<String>>) {
    program.push_fact(Atom::new(predicate, args));
}

/// Serializes a value of the `sh:<kind>` parameter of the shape named `name`.
fn constant(name: &str, kind: &'static str, term: &Term) -> Result<String, TranslateError> {
    serialize(term).map_err(|e| TranslateError::unsupported_term_kind(name, kind, e.into_term()))
}
