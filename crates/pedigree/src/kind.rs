use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminator of the closed set of artifact handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandlerKind {
    Archive,
    ClassFile,
    Manifest,
    Signature,
    Simple,
}

impl HandlerKind {
    pub const COUNT: usize = 5;

    pub const ALL: [HandlerKind; Self::COUNT] = [
        HandlerKind::Archive,
        HandlerKind::ClassFile,
        HandlerKind::Manifest,
        HandlerKind::Signature,
        HandlerKind::Simple,
    ];

    /// The catch-all kind.
    pub const DEFAULT: HandlerKind = HandlerKind::Simple;

    pub(crate) fn index(self) -> usize {
        match self {
            HandlerKind::Archive => 0,
            HandlerKind::ClassFile => 1,
            HandlerKind::Manifest => 2,
            HandlerKind::Signature => 3,
            HandlerKind::Simple => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerKind::Archive => "Archive",
            HandlerKind::ClassFile => "ClassFile",
            HandlerKind::Manifest => "Manifest",
            HandlerKind::Signature => "Signature",
            HandlerKind::Simple => "Simple",
        }
    }

    pub fn is_container(&self) -> bool { matches!(self, HandlerKind::Archive) }

    /// Whether the handler needs a real file rather than in-memory bytes.
    pub fn requires_disk(&self) -> bool { matches!(self, HandlerKind::Archive) }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
