//! Kind-to-factory resolution.
//!
//! Factories come from a static table. Each kind's factory is looked up at
//! most once per registry and cached in its own slot, so concurrent first use
//! of different kinds never contends and the same kind is never resolved twice.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use once_cell::sync::Lazy;

use crate::HandlerKind;
use crate::error::HandlerError;
use crate::handler::{self, BuildContext, Handler, HandlerFactory};

static BUILTIN: &[(HandlerKind, HandlerFactory)] = &[
    (HandlerKind::Archive, handler::archive::build),
    (HandlerKind::ClassFile, handler::classfile::build),
    (HandlerKind::Manifest, handler::manifest::build),
    (HandlerKind::Signature, handler::signature::build),
    (HandlerKind::Simple, handler::simple::build),
];

static GLOBAL: Lazy<Arc<HandlerRegistry>> = Lazy::new(|| Arc::new(HandlerRegistry::new()));

pub struct HandlerRegistry {
    overrides:   [Option<HandlerFactory>; HandlerKind::COUNT],
    slots:       [OnceLock<HandlerFactory>; HandlerKind::COUNT],
    resolutions: AtomicUsize,
}

impl Default for HandlerRegistry {
    fn default() -> Self { Self::new() }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            overrides:   [None; HandlerKind::COUNT],
            slots:       std::array::from_fn(|_| OnceLock::new()),
            resolutions: AtomicUsize::new(0),
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<HandlerRegistry> { Arc::clone(&GLOBAL) }

    /// Replace the built-in factory for `kind`.
    pub fn with_factory(mut self, kind: HandlerKind, factory: HandlerFactory) -> Self {
        self.overrides[kind.index()] = Some(factory);
        self
    }

    /// Factory for `kind`, resolving it on first use.
    pub fn resolve(&self, kind: HandlerKind) -> HandlerFactory {
        *self.slots[kind.index()].get_or_init(|| {
            self.resolutions.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(%kind, "resolving handler factory");
            self.overrides[kind.index()]
                .or_else(|| {
                    BUILTIN
                        .iter()
                        .find(|(registered, _)| *registered == kind)
                        .map(|(_, factory)| *factory)
                })
                .unwrap_or(handler::simple::build)
        })
    }

    /// Build a fresh handler of `kind`.
    pub fn instantiate(&self, kind: HandlerKind, ctx: &BuildContext<'_>) -> Result<Handler, HandlerError> {
        (self.resolve(kind))(ctx)
    }

    pub fn is_resolved(&self, kind: HandlerKind) -> bool { self.slots[kind.index()].get().is_some() }

    /// How many kinds have been resolved so far.
    pub fn resolutions(&self) -> usize { self.resolutions.load(Ordering::Relaxed) }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved: Vec<_> = HandlerKind::ALL
            .into_iter()
            .filter(|kind| self.is_resolved(*kind))
            .collect();
        f.debug_struct("HandlerRegistry")
            .field("resolved", &resolved)
            .finish()
    }
}
