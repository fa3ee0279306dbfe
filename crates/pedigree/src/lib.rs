//! Recursive artifact classification with content-addressed provenance.
//!
//! # Architecture
//!
//! - `classify.rs` - Extension table and ignore set
//! - `registry.rs` - Memoized kind-to-factory resolution
//! - `handler/` - One factory per handler kind
//! - `persist.rs` - Memory, disk or transient backing
//! - `artifact.rs` - Fingerprinted artifacts and their children
//! - `strategy.rs` - Archive first, extension fallback
//! - `walk.rs` - Depth-first traversal helper
//!
//! # Example
//!
//! ```no_run
//! use pedigree::{SnoopOptions, classify_path};
//!
//! let options = SnoopOptions::default();
//! let root = classify_path("app.jar", &options)?;
//! for child in root.children()? {
//!     let child = pedigree::classify(child?, &options)?;
//!     assert_eq!(child.parent_digest(), root.digest());
//! }
//! # Ok::<(), pedigree::Error>(())
//! ```

pub use artifact::{Artifact, ArtifactInput, Children};
pub use classify::{Classifier, ExtensionList, extension_of, normalize_extension};
pub use error::{Error, HandlerError, Result};
pub use event::{Event, EventSink, TracingSink};
pub use handler::{BuildContext, Handler, HandlerFactory};
pub use kind::HandlerKind;
pub use options::{DEFAULT_TEMP_PREFIX, SnoopOptions};
pub use persist::{Content, ReadSeek, Storage, TransientStorage};
pub use record::ArtifactRecord;
pub use registry::HandlerRegistry;
pub use strategy::{classify, classify_path};
pub use walk::{ErrorPolicy, Visit, WalkOptions, WalkSummary, walk};

pub use pedigree_archive::{ArchiveFormat, ArchiveOptions, Compression};
pub use pedigree_verify::{Algorithm, ChecksumProvider, DigestSet, REQUIRED_ALGORITHMS};

mod artifact;
mod classify;
mod error;
mod event;
pub mod handler;
mod kind;
mod options;
mod persist;
mod record;
mod registry;
mod strategy;
mod walk;
