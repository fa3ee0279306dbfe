//! Depth-first traversal of a provenance tree.

use crate::artifact::{Artifact, ArtifactInput};
use crate::error::{Error, Result};
use crate::{SnoopOptions, strategy};

/// What to do with an artifact's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    Descend,
    /// Do not enumerate this artifact's children.
    Skip,
    /// End the whole walk.
    Stop,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    Abort,
    /// Record the failure and carry on with the next sibling.
    Skip,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WalkOptions {
    /// Deepest level visited; the root is depth 0.
    pub max_depth: Option<usize>,
    pub on_error:  ErrorPolicy,
}

impl WalkOptions {
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }
}

#[derive(Debug, Default)]
pub struct WalkSummary {
    pub visited: usize,
    /// Failures below the root tolerated under [`ErrorPolicy::Skip`].
    pub skipped: Vec<Error>,
    pub stopped: bool,
}

/// Classify `root` and everything beneath it, calling `visit` for each
/// artifact before its children.
///
/// A failure at the root is always returned. Each artifact's transient
/// storage is released as soon as its subtree is done.
pub fn walk<F>(root: ArtifactInput, options: &SnoopOptions, walk_options: WalkOptions, mut visit: F) -> Result<WalkSummary>
where
    F: FnMut(&Artifact, usize) -> Visit,
{
    let root = strategy::classify(root, options)?;
    let mut summary = WalkSummary::default();
    descend(root, 0, options, &walk_options, &mut visit, &mut summary)?;
    Ok(summary)
}

fn descend<F>(
    artifact: Artifact,
    depth: usize,
    options: &SnoopOptions,
    walk_options: &WalkOptions,
    visit: &mut F,
    summary: &mut WalkSummary,
) -> Result<()>
where
    F: FnMut(&Artifact, usize) -> Visit,
{
    summary.visited += 1;
    match visit(&artifact, depth) {
        Visit::Stop => {
            summary.stopped = true;
            return Ok(());
        }
        Visit::Skip => return Ok(()),
        Visit::Descend => {}
    }

    if !artifact.is_container() || walk_options.max_depth.is_some_and(|max| depth >= max) {
        return Ok(());
    }

    let children = match artifact.children() {
        Ok(children) => children,
        Err(e) => return tolerate(e, walk_options, summary),
    };

    for child in children {
        let child = child.and_then(|input| strategy::classify(input, options));
        match child {
            Ok(child) => descend(child, depth + 1, options, walk_options, visit, summary)?,
            Err(e) => tolerate(e, walk_options, summary)?,
        }
        if summary.stopped {
            break;
        }
    }
    Ok(())
}

fn tolerate(err: Error, walk_options: &WalkOptions, summary: &mut WalkSummary) -> Result<()> {
    match walk_options.on_error {
        ErrorPolicy::Abort => Err(err),
        ErrorPolicy::Skip => {
            tracing::debug!(error = %err, "skipping artifact");
            summary.skipped.push(err);
            Ok(())
        }
    }
}
