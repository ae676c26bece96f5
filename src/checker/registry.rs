//! Shape → checker chain map.

use once_cell::sync::Lazy;
use tracing::debug;

use super::{rules, Checker};
use crate::shape::Shape;

/// Standard registry, built on first use from [`rules::CHECKERS`].
static REGISTRY: Lazy<CheckRegistry> =
    Lazy::new(|| CheckRegistry::from_checkers(rules::CHECKERS.iter().copied()));

/// Immutable map from each shape to its ordered checker chain.
#[derive(Debug)]
pub struct CheckRegistry {
    checkers: Vec<Checker>,
    /// Indexed by shape ordinal
    chains: Vec<Vec<Checker>>,
}

impl CheckRegistry {
    /// The standard registry.
    pub fn global() -> &'static CheckRegistry {
        &REGISTRY
    }

    /// Bind each checker to every shape of its scope. Chains keep the order
    /// in which checkers are given.
    ///
    /// # Panics
    ///
    /// On a checker with an empty scope, or two checkers sharing a name.
    pub fn from_checkers(checkers: impl IntoIterator<Item = Checker>) -> Self {
        let mut registry = CheckRegistry {
            checkers: Vec::new(),
            chains: vec![Vec::new(); Shape::COUNT],
        };

        for checker in checkers {
            assert!(
                registry.checker(checker.name).is_none(),
                "Duplicate checker name {}",
                checker.name
            );
            let shapes = checker.scope.shapes();
            assert!(!shapes.is_empty(), "Checker {} has an empty scope", checker.name);

            for shape in shapes {
                registry.chains[shape.ordinal()].push(checker);
            }
            registry.checkers.push(checker);
        }

        debug!(
            checkers = registry.checkers.len(),
            shapes = registry.shapes().count(),
            "Check registry built"
        );
        registry
    }

    /// Checkers bound to `shape`, in declaration order.
    pub fn chain(&self, shape: Shape) -> &[Checker] {
        &self.chains[shape.ordinal()]
    }

    pub fn checker(&self, name: &str) -> Option<&Checker> {
        self.checkers.iter().find(|c| c.name == name)
    }

    /// All checkers, in declaration order.
    pub fn checkers(&self) -> &[Checker] {
        &self.checkers
    }

    pub fn is_checked(&self, shape: Shape) -> bool {
        !self.chain(shape).is_empty()
    }

    /// Shapes with at least one checker.
    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        Shape::ALL.iter().copied().filter(|&s| self.is_checked(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{CheckContext, Scope};
    use crate::context::GlyphView;
    use crate::evaluation::Evaluation;
    use pretty_assertions::assert_eq;

    fn chain_names(registry: &CheckRegistry, shape: Shape) -> Vec<&'static str> {
        registry.chain(shape).iter().map(|c| c.name).collect()
    }

    #[test]
    fn standard_chains() {
        let registry = CheckRegistry::global();
        assert_eq!(chain_names(registry, Shape::HwRestSet), ["NotWithinWidth", "MeasureRest"]);
        assert_eq!(
            chain_names(registry, Shape::PercussionClef),
            ["NotWithinWidth", "NotWithinStaffHeight", "NotWithinHeader"]
        );
        assert_eq!(
            chain_names(registry, Shape::Segno),
            ["NotWithinWidth", "AboveStaff", "SystemTop"]
        );
        assert_eq!(chain_names(registry, Shape::WholeRest), ["StaffGap"]);
        assert_eq!(chain_names(registry, Shape::Text), ["Text"]);
        assert!(chain_names(registry, Shape::StaffLines).is_empty());
        assert_eq!(registry.checkers().len(), rules::CHECKERS.len());
    }

    fn accept(_: &CheckContext<'_>, _: &mut Evaluation, _: &dyn GlyphView) -> bool {
        true
    }

    #[test]
    #[should_panic(expected = "Duplicate checker name")]
    fn duplicate_names_panic() {
        CheckRegistry::from_checkers([
            Checker::new("Same", Scope::Shape(Shape::Coda), accept),
            Checker::new("Same", Scope::Shape(Shape::Segno), accept),
        ]);
    }

    #[test]
    #[should_panic(expected = "empty scope")]
    fn empty_scope_panics() {
        CheckRegistry::from_checkers([Checker::new("Nothing", Scope::Shapes(&[]), accept)]);
    }
}
