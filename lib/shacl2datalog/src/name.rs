//! Allocation of Datalog identifiers for shapes.

use rustc_hash::FxHashSet;

use crate::program::Predicate;

/// Name used for shapes without a `sh:name`.
pub const DEFAULT_NAME: &str = "shape";

/// Character substituted for anything not allowed in an identifier.
pub const PLACEHOLDER: char = '?';

/// The set of identifiers already in use during a translation run.
///
/// It starts with the predicates of the Datalog library so that a shape can never
/// shadow one of them. Allocation consumes the namespace and returns the updated one:
/// the recursion over nested shapes threads it through every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    names: FxHashSet<String>,
}

impl Namespace {
    /// Creates a namespace containing only the reserved predicate names.
    pub fn new() -> Self {
        Self {
            names: Predicate::ALL
                .iter()
                .map(|p| p.as_str().to_owned())
                .collect(),
        }
    }

    /// Returns true if the name is already taken.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of reserved names, predicates included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: every namespace starts with the reserved predicate names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reserves a fresh identifier derived from `preferred`.
    ///
    /// The candidates are the sanitized name, then the same name followed by `0`, `1`...
    /// The first one not yet reserved is taken.
    #[must_use]
    pub fn allocate(mut self, preferred: Option<&str>) -> (String, Self) {
        let base = sanitize(preferred.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_NAME));
        let mut name = base.clone();
        let mut suffix: u64 = 0;
        while self.names.contains(&name) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }
        self.names.insert(name.clone());
        (name, self)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces the characters that are not allowed in a Datalog identifier.
///
/// An identifier starts with an ASCII letter, `_` or the placeholder and continues
/// with ASCII letters, digits, `_` or the placeholder.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            if is_identifier_char(c) && (i > 0 || !c.is_ascii_digit()) {
                c
            } else {
                PLACEHOLDER
            }
        })
        .collect()
}

/// Returns true if `name` could have been produced by [`sanitize`].
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && sanitize(name) == name
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_starts_with_the_predicates() {
        let namespace = Namespace::default();
        assert!(!namespace.is_empty());
        assert_eq!(namespace.len(), Predicate::ALL.len());
        let (_, namespace) = namespace.allocate(Some("Person"));
        assert_eq!(namespace.len(), Predicate::ALL.len() + 1);
    }

    #[test]
    fn test_default_name_and_suffixes() {
        let namespace = Namespace::new();
        let (first, namespace) = namespace.allocate(None);
        let (second, namespace) = namespace.allocate(None);
        let (third, _) = namespace.allocate(Some(""));
        assert_eq!(first, "shape");
        assert_eq!(second, "shape0");
        assert_eq!(third, "shape1");
    }

    #[test]
    fn test_reserved_names_are_avoided() {
        let (name, namespace) = Namespace::new().allocate(Some("target"));
        assert_eq!(name, "target0");
        let (name, _) = namespace.allocate(Some("min_count_constr"));
        assert_eq!(name, "min_count_constr0");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Person Shape"), "Person?Shape");
        assert_eq!(sanitize("1st"), "?st");
        assert_eq!(sanitize("_a-b"), "_a?b");
        assert_eq!(sanitize("?x"), "?x");
        assert_eq!(sanitize("caf\u{e9}"), "caf?");
    }

    #[test]
    fn test_sanitized_names_collide() {
        let (first, namespace) = Namespace::new().allocate(Some("a b"));
        let (second, _) = namespace.allocate(Some("a-b"));
        assert_eq!(first, "a?b");
        assert_eq!(second, "a?b0");
    }

    #[test]
    fn test_suffix_skips_taken_candidates() {
        let (_, namespace) = Namespace::new().allocate(Some("shape0"));
        let (_, namespace) = namespace.allocate(None);
        let (name, _) = namespace.allocate(None);
        assert_eq!(name, "shape1");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("shape0"));
        assert!(is_identifier("_x?"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("0shape"));
        assert!(!is_identifier("a b"));
    }

    #[test]
    fn test_allocation_is_deterministic() {
        let run = || {
            let mut namespace = Namespace::new();
            let mut names = Vec::new();
            for preferred in [None, Some("Person"), None, Some("Person")] {
                let (name, ns) = namespace.allocate(preferred);
                names.push(name);
                namespace = ns;
            }
            names
        };
        assert_eq!(run(), ["shape", "Person", "shape0", "Person0"]);
        assert_eq!(run(), run());
    }
}
