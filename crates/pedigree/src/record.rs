use pedigree_verify::DigestSet;
use serde::{Deserialize, Serialize};

use crate::HandlerKind;

/// Serializable summary of one artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub relative_path: Vec<String>,
    pub name:          String,
    /// Lowercase extension with leading dot, or empty.
    pub kind:          String,
    /// Strongest digest of the container this came from; absent for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent:        Option<String>,
    pub digests:       DigestSet,
    pub handler:       HandlerKind,
}
