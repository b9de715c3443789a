use crate::common::Int;
use crate::parse::ast::{Reference, ReferenceKind};
use std::collections::HashMap;

/// Supplies the values of `${...}` references at evaluation time.
///
/// Every method defaults to resolving nothing, so an implementation only
/// needs to provide the kinds it knows about.
pub trait Resolver {
    /// `${name}`
    fn variable(&self, _name: &str) -> Option<Int> {
        None
    }

    /// `${@name}`
    fn property(&self, _name: &str) -> Option<Int> {
        None
    }

    /// `${?question}`
    fn prompt(&self, _question: &str) -> Option<Int> {
        None
    }

    fn resolve(&self, reference: &Reference) -> Option<Int> {
        match reference.kind {
            ReferenceKind::Variable => self.variable(&reference.name),
            ReferenceKind::Property => self.property(&reference.name),
            ReferenceKind::Prompt => self.prompt(&reference.name),
        }
    }
}

/// Resolves nothing.
impl Resolver for () {}

/// Resolves variables by name.
impl Resolver for HashMap<String, Int> {
    fn variable(&self, name: &str) -> Option<Int> {
        self.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sheet;

    impl Resolver for Sheet {
        fn property(&self, name: &str) -> Option<Int> {
            (name == "Strength").then(|| 3)
        }
    }

    #[test]
    fn test_resolve_kinds() {
        let vars = HashMap::from([("n".to_owned(), 4)]);
        assert_eq!(vars.resolve(&Reference::new(ReferenceKind::Variable, "n")), Some(4));
        assert_eq!(vars.resolve(&Reference::new(ReferenceKind::Property, "n")), None);

        assert_eq!(Sheet.resolve(&Reference::new(ReferenceKind::Property, "Strength")), Some(3));
        assert_eq!(Sheet.resolve(&Reference::new(ReferenceKind::Prompt, "Strength")), None);
        assert_eq!(().resolve(&Reference::new(ReferenceKind::Variable, "n")), None);
    }
}
