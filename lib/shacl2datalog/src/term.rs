//! Serialization of RDF terms into Datalog constants.

use oxrdf::vocab::xsd;
use oxrdf::{Literal, Term};
use oxsdatatypes::{Boolean, Date, DateTime, Decimal, Double, Float, Integer, Time};
use std::fmt::Write;
use std::str::FromStr;

use crate::error::UnsupportedTermError;

/// Prefix of the identifiers standing for blank nodes.
pub const BLANK_NODE_PREFIX: &str = "blank_node";

/// Writes a term as a Datalog constant.
///
/// - IRIs become quoted strings.
/// - Blank nodes become `blank_node<id>` identifiers.
/// - Literals are written according to the value their lexical form denotes (see [`LiteralValue`]).
///
/// The output only depends on the term, rules are deduplicated on their rendered text.
pub fn serialize(term: &Term) -> Result<String, UnsupportedTermError> {
    match term {
        Term::NamedNode(node) => Ok(quote(node.as_str())),
        Term::BlankNode(node) => Ok(format!("{BLANK_NODE_PREFIX}{}", node.as_str())),
        Term::Literal(literal) => Ok(LiteralValue::from(literal).to_string()),
        #[cfg(feature = "rdf-12")]
        Term::Triple(_) => Err(UnsupportedTermError::new(term.clone())),
    }
}

/// Writes a string as a double-quoted Datalog string.
pub fn quote(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    output.push('"');
    for c in value.chars() {
        match c {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(output, "\\u{:04X}", u32::from(c));
            }
            c => output.push(c),
        }
    }
    output.push('"');
    output
}

/// The value denoted by a literal, as far as Datalog cares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Boolean(Boolean),
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
    Date(Date),
    DateTime(DateTime),
    Time(Time),
    /// Any other literal, including ill-typed ones, kept as its lexical form.
    String(&'a str),
}

impl<'a> From<&'a Literal> for LiteralValue<'a> {
    fn from(literal: &'a Literal) -> Self {
        let value = literal.value();
        let datatype = literal.datatype();
        let parsed = if datatype == xsd::BOOLEAN {
            parse(value, Self::Boolean)
        } else if is_integer_datatype(datatype) {
            parse(value, Self::Integer)
        } else if datatype == xsd::DECIMAL {
            parse(value, Self::Decimal)
        } else if datatype == xsd::FLOAT {
            parse(value, Self::Float)
        } else if datatype == xsd::DOUBLE {
            parse(value, Self::Double)
        } else if datatype == xsd::DATE {
            parse(value, Self::Date)
        } else if datatype == xsd::DATE_TIME || datatype == xsd::DATE_TIME_STAMP {
            parse(value, Self::DateTime)
        } else if datatype == xsd::TIME {
            parse(value, Self::Time)
        } else {
            None
        };
        parsed.unwrap_or(Self::String(value))
    }
}

impl std::fmt::Display for LiteralValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            // INF, -INF and NaN are not Datalog numbers
            Self::Float(v) if !v.is_finite() => f.write_str(&quote(&v.to_string())),
            Self::Double(v) if !v.is_finite() => f.write_str(&quote(&v.to_string())),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            // '-' is not allowed in Datalog atoms
            Self::Date(v) => f.write_str(&v.to_string().replace('-', "_")),
            Self::DateTime(v) => f.write_str(&v.to_string().replace('-', "_")),
            Self::Time(v) => f.write_str(&v.to_string().replace('-', "_")),
            Self::String(v) => f.write_str(&quote(v)),
        }
    }
}

fn parse<'a, T: FromStr>(value: &str, wrap: fn(T) -> LiteralValue<'a>) -> Option<LiteralValue<'a>> {
    T::from_str(value).ok().map(wrap)
}

fn is_integer_datatype(datatype: oxrdf::NamedNodeRef<'_>) -> bool {
    [
        xsd::INTEGER,
        xsd::INT,
        xsd::LONG,
        xsd::SHORT,
        xsd::BYTE,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::UNSIGNED_LONG,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_BYTE,
    ]
    .contains(&datatype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{BlankNode, NamedNode};

    fn typed(value: &str, datatype: oxrdf::NamedNodeRef<'_>) -> Term {
        Literal::new_typed_literal(value, datatype).into()
    }

    #[test]
    fn test_booleans() {
        assert_eq!(serialize(&Literal::from(true).into()).unwrap(), "true");
        assert_eq!(serialize(&typed("0", xsd::BOOLEAN)).unwrap(), "false");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(serialize(&Literal::from(5).into()).unwrap(), "5");
        assert_eq!(serialize(&typed("-12", xsd::INT)).unwrap(), "-12");
        assert_eq!(serialize(&typed("007", xsd::NON_NEGATIVE_INTEGER)).unwrap(), "7");
        assert_eq!(serialize(&typed("1.50", xsd::DECIMAL)).unwrap(), "1.5");
        assert_eq!(serialize(&typed("2.5", xsd::DOUBLE)).unwrap(), "2.5");
    }

    #[test]
    fn test_special_floating_point_values_are_quoted() {
        assert_eq!(serialize(&typed("INF", xsd::DOUBLE)).unwrap(), "\"INF\"");
        assert_eq!(serialize(&typed("-INF", xsd::FLOAT)).unwrap(), "\"-INF\"");
        assert_eq!(serialize(&typed("NaN", xsd::DOUBLE)).unwrap(), "\"NaN\"");
        assert_eq!(serialize(&typed("NaN", xsd::FLOAT)).unwrap(), "\"NaN\"");
        assert_eq!(serialize(&typed("-1.5E2", xsd::FLOAT)).unwrap(), "-150");
    }

    #[test]
    fn test_temporal_values_use_underscores() {
        assert_eq!(serialize(&typed("2024-01-02", xsd::DATE)).unwrap(), "2024_01_02");
        assert_eq!(
            serialize(&typed("2024-01-02T10:11:12", xsd::DATE_TIME)).unwrap(),
            "2024_01_02T10:11:12"
        );
        assert_eq!(serialize(&typed("10:11:12", xsd::TIME)).unwrap(), "10:11:12");
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            serialize(&Literal::new_simple_literal("abc").into()).unwrap(),
            "\"abc\""
        );
        assert_eq!(
            serialize(&Literal::new_language_tagged_literal_unchecked("chat", "fr").into())
                .unwrap(),
            "\"chat\""
        );
        assert_eq!(
            serialize(&typed("P1D", xsd::DURATION)).unwrap(),
            "\"P1D\""
        );
    }

    #[test]
    fn test_ill_typed_literals_are_strings() {
        assert_eq!(serialize(&typed("five", xsd::INTEGER)).unwrap(), "\"five\"");
        assert_eq!(serialize(&typed("2024-13-45", xsd::DATE)).unwrap(), "\"2024-13-45\"");
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(
            serialize(&Literal::new_simple_literal("say \"hi\"\n\\").into()).unwrap(),
            r#""say \"hi\"\n\\""#
        );
        assert_eq!(quote("a\u{7}b"), r#""a\u0007b""#);
    }

    #[test]
    fn test_resources_and_blank_nodes() {
        assert_eq!(
            serialize(&NamedNode::new_unchecked("http://example.org/p").into()).unwrap(),
            "\"http://example.org/p\""
        );
        assert_eq!(
            serialize(&BlankNode::new_unchecked("b0").into()).unwrap(),
            "blank_nodeb0"
        );
    }

    #[test]
    fn test_serialization_is_pure() {
        let term = typed("2024-01-02", xsd::DATE);
        assert_eq!(serialize(&term).unwrap(), serialize(&term.clone()).unwrap());
    }

    #[cfg(feature = "rdf-12")]
    #[test]
    fn test_triple_terms_are_rejected() {
        let node = NamedNode::new_unchecked("http://example.org/s");
        let term = Term::from(oxrdf::Triple::new(node.clone(), node.clone(), node));
        let error = serialize(&term).unwrap_err();
        assert!(error.to_string().ends_with("cannot be written as a Datalog constant"));
        assert_eq!(error.into_term(), term);
    }
}
