//! SHACL constraint definitions.
//!
//! Every SHACL Core constraint component is one variant of [`Constraint`].
//! Values are kept as RDF terms: the translator renders them to Datalog constants.

use oxrdf::{NamedNode, Term};

use crate::model::ShapeId;

/// Represents a SHACL constraint attached to a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    // === Cardinality Constraints ===
    /// sh:minCount - Minimum number of values required.
    MinCount(u64),

    /// sh:maxCount - Maximum number of values allowed.
    MaxCount(u64),

    // === Logical Constraints ===
    /// sh:not - Values must NOT conform to any of these shapes.
    Not(Vec<ShapeId>),

    /// sh:and - Values must conform to ALL listed shapes.
    And(Vec<ShapeId>),

    /// sh:or - Values must conform to AT LEAST ONE listed shape.
    Or(Vec<ShapeId>),

    /// sh:xone - Values must conform to EXACTLY ONE listed shape.
    Xone(Vec<ShapeId>),

    // === Property Pair Constraints ===
    /// sh:equals - Values must equal values of these properties.
    Equals(Vec<NamedNode>),

    /// sh:disjoint - Values must not overlap with values of these properties.
    Disjoint(Vec<NamedNode>),

    /// sh:lessThan - Values must be less than values of these properties.
    LessThan(Vec<NamedNode>),

    /// sh:lessThanOrEquals - Values must be less than or equal to values of these properties.
    LessThanOrEquals(Vec<NamedNode>),

    // === Shape-based Constraints ===
    /// sh:property - Values must conform to these property shapes.
    Property(Vec<ShapeId>),

    /// sh:node - Values must conform to these node shapes.
    Node(Vec<ShapeId>),

    /// sh:qualifiedValueShape - Qualified cardinality constraint.
    QualifiedValueShape {
        shapes: Vec<ShapeId>,
        min_count: Option<u64>,
        max_count: Option<u64>,
        disjoint: bool,
    },

    // === String-based Constraints ===
    /// sh:minLength - Minimum string length.
    MinLength(Term),

    /// sh:maxLength - Maximum string length.
    MaxLength(Term),

    /// sh:pattern - Value must match the regular expression.
    Pattern { pattern: Term, flags: Option<Term> },

    /// sh:languageIn - Language tag must be one of the listed values.
    LanguageIn(Vec<Term>),

    /// sh:uniqueLang - No duplicate language tags allowed.
    UniqueLang,

    // === Value Type Constraints ===
    /// sh:class - Values must be instances of all these classes.
    Class(Vec<Term>),

    /// sh:datatype - Values must have the specified datatype.
    Datatype(NamedNode),

    /// sh:nodeKind - Values must be of the specified node kind.
    NodeKind(NamedNode),

    // === Value Range Constraints ===
    /// sh:minExclusive
    MinExclusive(Vec<Term>),

    /// sh:minInclusive
    MinInclusive(Vec<Term>),

    /// sh:maxExclusive
    MaxExclusive(Vec<Term>),

    /// sh:maxInclusive
    MaxInclusive(Vec<Term>),

    // === Other Constraints ===
    /// sh:closed - Only the declared properties are allowed.
    Closed { ignored_properties: Vec<NamedNode> },

    /// sh:hasValue - At least one value must equal each of these values.
    HasValue(Vec<Term>),

    /// sh:in - Values must be members of this list.
    In(Vec<Term>),
}

impl Constraint {
    /// Returns the SHACL parameter name of this constraint type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MinCount(_) => "minCount",
            Self::MaxCount(_) => "maxCount",
            Self::Not(_) => "not",
            Self::And(_) => "and",
            Self::Or(_) => "or",
            Self::Xone(_) => "xone",
            Self::Equals(_) => "equals",
            Self::Disjoint(_) => "disjoint",
            Self::LessThan(_) => "lessThan",
            Self::LessThanOrEquals(_) => "lessThanOrEquals",
            Self::Property(_) => "property",
            Self::Node(_) => "node",
            Self::QualifiedValueShape { .. } => "qualifiedValueShape",
            Self::MinLength(_) => "minLength",
            Self::MaxLength(_) => "maxLength",
            Self::Pattern { .. } => "pattern",
            Self::LanguageIn(_) => "languageIn",
            Self::UniqueLang => "uniqueLang",
            Self::Class(_) => "class",
            Self::Datatype(_) => "datatype",
            Self::NodeKind(_) => "nodeKind",
            Self::MinExclusive(_) => "minExclusive",
            Self::MinInclusive(_) => "minInclusive",
            Self::MaxExclusive(_) => "maxExclusive",
            Self::MaxInclusive(_) => "maxInclusive",
            Self::Closed { .. } => "closed",
            Self::HasValue(_) => "hasValue",
            Self::In(_) => "in",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab as sh;

    #[test]
    fn test_name_is_the_parameter_local_name() {
        let constraints = [
            (Constraint::MinCount(1), sh::MIN_COUNT),
            (Constraint::UniqueLang, sh::UNIQUE_LANG),
            (Constraint::LessThanOrEquals(Vec::new()), sh::LESS_THAN_OR_EQUALS),
            (Constraint::HasValue(Vec::new()), sh::HAS_VALUE),
            (
                Constraint::QualifiedValueShape {
                    shapes: Vec::new(),
                    min_count: None,
                    max_count: None,
                    disjoint: false,
                },
                sh::QUALIFIED_VALUE_SHAPE,
            ),
        ];
        for (constraint, parameter) in constraints {
            assert_eq!(
                parameter.as_str().rsplit_once('#').map(|(_, local)| local),
                Some(constraint.name())
            );
        }
    }
}
