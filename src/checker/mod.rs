//! Context-based checks on classifier candidates.
//!
//! A [`Checker`] is a named predicate bound to a scope of shapes. The
//! [`CheckRegistry`] maps every shape to the ordered chain of checkers whose
//! scope contains it, and [`ShapeChecker::annotate`] runs the chain selected
//! by the candidate shape against one glyph: the first rejection stops the
//! chain and is recorded on the evaluation, while an accepting checker may
//! refine the candidate into a more precise (logical) shape.

pub mod registry;
pub mod rules;

use std::fmt;

use once_cell::sync::OnceCell;
use tracing::{info, trace, warn};

use crate::config::CheckConstants;
use crate::context::{GlyphView, SystemView};
use crate::error::{Error, Result};
use crate::evaluation::{Evaluation, Failure};
use crate::shape::Shape;
use crate::shape_set::ShapeSet;

pub use registry::CheckRegistry;

/// Check function. Returning `false` rejects the candidate and should be
/// preceded by [`Evaluation::reject`] when a precise code applies.
pub type Predicate = fn(&CheckContext<'_>, &mut Evaluation, &dyn GlyphView) -> bool;

/// Shapes a checker is bound to.
#[derive(Debug, Clone, Copy)]
pub enum Scope {
    Shape(Shape),
    Shapes(&'static [Shape]),
    Set(&'static ShapeSet),
    Sets(&'static [&'static ShapeSet]),
    /// Union of groups plus a few extra shapes
    SetsAnd(&'static [&'static ShapeSet], &'static [Shape]),
    /// Every trainable shape
    AllPhysical,
}

impl Scope {
    /// Shapes of the scope, without duplicates, in declaration order.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut out = Vec::new();
        match *self {
            Scope::Shape(shape) => out.push(shape),
            Scope::Shapes(shapes) => extend_unique(&mut out, shapes.iter().copied()),
            Scope::Set(set) => extend_unique(&mut out, set.shapes()),
            Scope::Sets(sets) => {
                for set in sets {
                    extend_unique(&mut out, set.shapes());
                }
            }
            Scope::SetsAnd(sets, extra) => {
                for set in sets {
                    extend_unique(&mut out, set.shapes());
                }
                extend_unique(&mut out, extra.iter().copied());
            }
            Scope::AllPhysical => out.extend(Shape::physical_shapes().map(Shape::from)),
        }
        out
    }
}

fn extend_unique(out: &mut Vec<Shape>, shapes: impl Iterator<Item = Shape>) {
    for shape in shapes {
        if !out.contains(&shape) {
            out.push(shape);
        }
    }
}

/// A named check, bound to a scope of shapes.
#[derive(Clone, Copy)]
pub struct Checker {
    pub name: &'static str,
    pub scope: Scope,
    pub predicate: Predicate,
}

impl Checker {
    pub const fn new(name: &'static str, scope: Scope, predicate: Predicate) -> Self {
        Self {
            name,
            scope,
            predicate,
        }
    }

    pub fn check(
        &self,
        ctx: &CheckContext<'_>,
        eval: &mut Evaluation,
        glyph: &dyn GlyphView,
    ) -> bool {
        (self.predicate)(ctx, eval, glyph)
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// What a predicate may consult besides the glyph.
pub struct CheckContext<'a> {
    pub system: &'a dyn SystemView,
    pub constants: &'a CheckConstants,
}

// ── Annotator ───────────────────────────────────────────────────────

static INSTANCE: OnceCell<ShapeChecker<'static>> = OnceCell::new();

/// Runs checker chains against candidates.
#[derive(Debug, Clone)]
pub struct ShapeChecker<'r> {
    registry: &'r CheckRegistry,
    constants: CheckConstants,
}

impl<'r> ShapeChecker<'r> {
    pub fn new(registry: &'r CheckRegistry, constants: CheckConstants) -> Self {
        Self {
            registry,
            constants,
        }
    }

    pub fn registry(&self) -> &'r CheckRegistry {
        self.registry
    }

    pub fn constants(&self) -> &CheckConstants {
        &self.constants
    }

    /// Run the chain of the candidate shape against `glyph`.
    ///
    /// The chain is chosen once, from the shape held on entry. The first
    /// rejecting checker stops the chain and is recorded as the evaluation
    /// failure, with the code it set if any. When every checker accepts,
    /// the evaluation keeps its previous failure and possibly a refined
    /// shape. Nothing happens when checks are disabled or when the shape
    /// has no chain.
    pub fn annotate(&self, system: &dyn SystemView, eval: &mut Evaluation, glyph: &dyn GlyphView) {
        if !self.constants.apply_specific_check {
            return;
        }

        let chain = self.registry.chain(eval.shape);
        if chain.is_empty() {
            return;
        }

        let ctx = CheckContext {
            system,
            constants: &self.constants,
        };
        let prior = eval.failure.take();

        for checker in chain {
            if !checker.check(&ctx, eval, glyph) {
                let failure = Failure {
                    checker: Some(checker.name),
                    code: eval.failure.and_then(|f| f.code),
                };
                trace!(
                    glyph = glyph.id(),
                    shape = %eval.shape,
                    checker = checker.name,
                    reason = failure.reason(),
                    "Candidate rejected"
                );
                eval.failure = Some(failure);
                return;
            }
        }

        eval.failure = prior;
    }
}

impl ShapeChecker<'static> {
    /// The process-wide checker, built on first use with the standard
    /// registry and default constants unless [`ShapeChecker::install`] ran
    /// first.
    pub fn instance() -> &'static ShapeChecker<'static> {
        INSTANCE.get_or_init(|| ShapeChecker::new(CheckRegistry::global(), CheckConstants::default()))
    }

    /// Configure the process-wide checker. Only possible once, before any
    /// use of [`ShapeChecker::instance`].
    pub fn install(constants: CheckConstants) -> Result<&'static ShapeChecker<'static>> {
        constants.validate()?;

        let mut installed = false;
        let checker = INSTANCE.get_or_init(|| {
            installed = true;
            ShapeChecker::new(CheckRegistry::global(), constants)
        });

        if !installed {
            warn!("Shape checker already initialized, constants ignored");
            return Err(Error::AlreadyInitialized);
        }

        info!(
            apply_specific_check = checker.constants.apply_specific_check,
            "Shape checker installed"
        );
        Ok(checker)
    }
}
