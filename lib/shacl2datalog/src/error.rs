//! Error types for SHACL to Datalog translation.

use oxrdf::{NamedNode, Term};

use crate::model::ShapeId;

/// Main error type for shapes graph translation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ShaclError {
    /// Error building the shape model from an RDF graph.
    #[error(transparent)]
    Parse(#[from] ShapeParseError),

    /// Error during translation.
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// Error type for building shapes from RDF graphs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ShapeParseError {
    /// Invalid shape definition.
    #[error("Invalid shape definition for {shape}: {message}")]
    InvalidShape { shape: Term, message: String },

    /// Invalid property value.
    #[error("Invalid value for property {property} in shape {shape}: expected {expected}, got {actual}")]
    InvalidPropertyValue {
        shape: Term,
        property: NamedNode,
        expected: String,
        actual: Term,
    },

    /// Invalid RDF list.
    #[error("Invalid RDF list in shape {shape}: {message}")]
    InvalidRdfList { shape: Term, message: String },
}

/// A term without a Datalog constant form, such as an RDF 1.2 triple term.
#[derive(Debug, thiserror::Error)]
#[error("Term {term} cannot be written as a Datalog constant")]
pub struct UnsupportedTermError {
    term: Term,
}

impl UnsupportedTermError {
    #[cfg(feature = "rdf-12")]
    pub(crate) fn new(term: impl Into<Term>) -> Self {
        Self { term: term.into() }
    }

    /// The rejected term.
    pub fn into_term(self) -> Term {
        self.term
    }
}

/// Error type for the translation of a shape into Datalog.
///
/// Any of these aborts the whole run: no partial program is ever returned.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// A constraint or metadata value is not an IRI, a blank node or a literal.
    #[error("Shape {shape} has the sh:{kind} value {term} that cannot be written as a Datalog constant")]
    UnsupportedTermKind {
        shape: String,
        kind: &'static str,
        term: Term,
    },

    /// The constraint has no counterpart in the Datalog vocabulary.
    #[error("Shape {shape} uses the constraint sh:{kind} that has no Datalog translation")]
    UnrecognizedConstraintKind { shape: String, kind: &'static str },

    /// A shape reaches itself through shape-valued constraints.
    #[error("Shape {shape} references {reference} which is already being translated")]
    CyclicShapeReference { shape: String, reference: ShapeId },

    /// A shape-valued constraint points to a shape the provider does not know.
    #[error("Shape {shape} references the unknown shape {reference}")]
    UnknownShape { shape: String, reference: ShapeId },

    /// The name is not a valid Datalog identifier.
    #[error("{name:?} is not a valid Datalog identifier")]
    MalformedName { name: String },
}

impl ShapeParseError {
    /// Creates an invalid shape error.
    pub fn invalid_shape(shape: impl Into<Term>, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape: shape.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid property value error.
    pub fn invalid_property_value(
        shape: impl Into<Term>,
        property: impl Into<NamedNode>,
        expected: impl Into<String>,
        actual: impl Into<Term>,
    ) -> Self {
        Self::InvalidPropertyValue {
            shape: shape.into(),
            property: property.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an invalid RDF list error.
    pub fn invalid_rdf_list(shape: impl Into<Term>, message: impl Into<String>) -> Self {
        Self::InvalidRdfList {
            shape: shape.into(),
            message: message.into(),
        }
    }
}

impl TranslateError {
    pub fn unsupported_term_kind(
        shape: impl Into<String>,
        kind: &'static str,
        term: impl Into<Term>,
    ) -> Self {
        Self::UnsupportedTermKind {
            shape: shape.into(),
            kind,
            term: term.into(),
        }
    }

    pub fn unrecognized_constraint_kind(shape: impl Into<String>, kind: &'static str) -> Self {
        Self::UnrecognizedConstraintKind {
            shape: shape.into(),
            kind,
        }
    }

    pub fn cyclic_shape_reference(shape: impl Into<String>, reference: ShapeId) -> Self {
        Self::CyclicShapeReference {
            shape: shape.into(),
            reference,
        }
    }

    pub fn unknown_shape(shape: impl Into<String>, reference: ShapeId) -> Self {
        Self::UnknownShape {
            shape: shape.into(),
            reference,
        }
    }

    pub fn malformed_name(name: impl Into<String>) -> Self {
        Self::MalformedName { name: name.into() }
    }
}
