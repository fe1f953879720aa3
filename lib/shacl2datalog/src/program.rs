//! Datalog programs: atoms, rules and their rendering.

use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::term::quote;

/// Library file included by default at the top of every program.
pub const DEFAULT_INCLUDE: &str = "shacl.dl";

macro_rules! predicates {
    ($($(#[$attr:meta])* $variant:ident => $name:literal,)*) => {
        /// A predicate of the Datalog SHACL library.
        ///
        /// These are the only predicates a translated program uses,
        /// their names are reserved and never given to a shape.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Predicate {
            $($(#[$attr])* $variant,)*
        }

        impl Predicate {
            /// Every predicate of the library.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The Datalog name of the predicate.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

predicates! {
    // validation
    Satisfied => "satisfied",
    Conforms => "conforms",
    Target => "target",
    ValueNode => "value_node",
    Path => "path",
    // typing
    InstanceOf => "instance_of",
    Subclass => "subclass",
    Datatype => "datatype",
    NodeKind => "node_kind",
    // literals
    Value => "value",
    Language => "language",
    // shape metadata
    Description => "description",
    Severity => "severity",
    Message => "message",
    Deactivated => "deactivated",
    NodeShape => "node_shape",
    PropertyShape => "property_shape",
    PropertyPath => "property_path",
    // constraints
    MinCountConstr => "min_count_constr",
    MaxCountConstr => "max_count_constr",
    NotConstr => "not_constr",
    AndConstr => "and_constr",
    AndShape => "and_shape",
    OrConstr => "or_constr",
    OrShape => "or_shape",
    XoneConstr => "xone_constr",
    XoneShape => "xone_shape",
    EqualsConstr => "equals_constr",
    DisjointConstr => "disjoint_constr",
    LessThanConstr => "less_than_constr",
    LessThanOrEqConstr => "less_than_or_eq_constr",
    PropertyConstr => "property_constr",
    NodeConstr => "node_constr",
    QualifiedValueConstr => "qualified_value_constr",
    QualifiedValueShape => "qualified_value_shape",
    QualifiedValueDisjoint => "qualified_value_disjoint",
    QualifiedMinCount => "qualified_min_count",
    QualifiedMaxCount => "qualified_max_count",
    MinLengthConstr => "min_length_constr",
    MaxLengthConstr => "max_length_constr",
    PatternConstr => "pattern_constr",
    /// Functor implemented natively by the library.
    RegexMatch => "regex_match",
    LanguageInConstr => "language_in_constr",
    ConstrLanguageTag => "constr_language_tag",
    UniqueLangConstr => "unique_lang_constr",
    ClassConstr => "class_constr",
    DatatypeConstr => "datatype_constr",
    NodeKindConstr => "node_kind_constr",
    MinExclusiveConstr => "min_exclusive_constr",
    MinInclusiveConstr => "min_inclusive_constr",
    MaxExclusiveConstr => "max_exclusive_constr",
    MaxInclusiveConstr => "max_inclusive_constr",
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate applied to already rendered arguments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom {
    pub predicate: Predicate,
    pub args: Vec<String>,
}

impl Atom {
    pub fn new(predicate: Predicate, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            predicate,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.predicate, self.args.join(", "))
    }
}

/// A fact (empty body) or a rule.
///
/// Two rules are equal when they have the same head and the same set of body atoms,
/// comments are ignored.
#[derive(Debug, Clone)]
pub struct Rule {
    pub comments: Vec<String>,
    pub head: Atom,
    pub body: BTreeSet<Atom>,
}

impl Rule {
    /// Creates a fact.
    pub fn fact(head: Atom) -> Self {
        Self {
            comments: Vec::new(),
            head,
            body: BTreeSet::new(),
        }
    }

    /// Creates a rule deriving `head` from the conjunction of `body`.
    pub fn new(head: Atom, body: impl IntoIterator<Item = Atom>) -> Self {
        Self {
            comments: Vec::new(),
            head,
            body: body.into_iter().collect(),
        }
    }

    /// Attaches a comment line rendered above the rule.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.body == other.body
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.head.hash(state);
        self.body.hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment in &self.comments {
            for line in comment.lines() {
                writeln!(f, "// {line}")?;
            }
        }
        let head = self.head.to_string();
        f.write_str(&head)?;
        // body atoms are aligned under the first one
        let indent = " ".repeat(head.len() + 4);
        for (i, atom) in self.body.iter().enumerate() {
            if i == 0 {
                write!(f, " :- {atom}")?;
            } else {
                write!(f, ",\n{indent}{atom}")?;
            }
        }
        f.write_str(".")
    }
}

/// An ordered set of rules with the library include directive.
///
/// Rules keep their insertion order, a rule equal to one already present is dropped.
#[derive(Debug, Clone)]
pub struct Program {
    include: String,
    rules: Vec<Rule>,
    seen: FxHashSet<Rule>,
}

impl Program {
    /// Creates an empty program including [`DEFAULT_INCLUDE`].
    pub fn new() -> Self {
        Self {
            include: DEFAULT_INCLUDE.to_owned(),
            rules: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Sets the path of the included library file.
    #[must_use]
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    pub fn include(&self) -> &str {
        &self.include
    }

    /// Adds a rule, returns false if an equal rule was already there.
    pub fn push(&mut self, rule: Rule) -> bool {
        if self.seen.contains(&rule) {
            return false;
        }
        self.seen.insert(rule.clone());
        self.rules.push(rule);
        true
    }

    /// Adds a fact.
    pub fn push_fact(&mut self, head: Atom) -> bool {
        self.push(Rule::fact(head))
    }

    /// Appends all the rules of `other` that are not already present.
    pub fn extend(&mut self, other: Self) {
        for rule in other.rules {
            self.push(rule);
        }
    }

    /// Union of two programs, keeping the include directive of `self`.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }

    /// Iterates over the rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Renders the program text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".include {}", quote(&self.include))?;
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl Extend<Rule> for Program {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        for rule in iter {
            self.push(rule);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severity(name: &str) -> Atom {
        Atom::new(Predicate::Severity, [name, "\"Violation\""])
    }

    #[test]
    fn test_predicate_names_are_unique() {
        let names = Predicate::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<FxHashSet<_>>();
        assert_eq!(names.len(), Predicate::ALL.len());
    }

    #[test]
    fn test_render_fact_and_rule() {
        let mut program = Program::new();
        program.push_fact(severity("shape"));
        program.push(Rule::new(
            Atom::new(Predicate::Target, ["shape", "X"]),
            [Atom::new(Predicate::InstanceOf, ["\"http://example.org/C\"", "X"])],
        ));
        assert_eq!(
            program.render(),
            ".include \"shacl.dl\"\nseverity(shape, \"Violation\").\ntarget(shape, X) :- instance_of(\"http://example.org/C\", X).\n"
        );
    }

    #[test]
    fn test_render_multi_atom_body_and_comments() {
        let rule = Rule::new(
            Atom::new(Predicate::Satisfied, ["s"]),
            [
                Atom::new(Predicate::Deactivated, ["s"]),
                Atom::new(Predicate::Conforms, ["s"]),
            ],
        )
        .with_comment("a shape");
        assert_eq!(
            rule.to_string(),
            "// a shape\nsatisfied(s) :- conforms(s),\n                deactivated(s)."
        );
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let mut program = Program::new();
        assert!(program.push_fact(severity("a")));
        assert!(!program.push(Rule::fact(severity("a")).with_comment("again")));
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_merge_keeps_order_and_include() {
        let mut first = Program::new().with_include("lib/shacl.dl");
        first.push_fact(severity("a"));
        first.push_fact(severity("b"));
        let mut second = Program::new();
        second.push_fact(severity("b"));
        second.push_fact(severity("c"));

        let merged = first.merge(second);
        assert_eq!(merged.include(), "lib/shacl.dl");
        let heads = merged
            .rules()
            .map(|r| r.head.args[0].clone())
            .collect::<Vec<_>>();
        assert_eq!(heads, ["a", "b", "c"]);
    }

    #[test]
    fn test_body_order_does_not_matter() {
        let a = Atom::new(Predicate::Conforms, ["x"]);
        let b = Atom::new(Predicate::Deactivated, ["x"]);
        let head = Atom::new(Predicate::Satisfied, ["x"]);
        assert_eq!(
            Rule::new(head.clone(), [a.clone(), b.clone()]),
            Rule::new(head, [b, a])
        );
    }
}
