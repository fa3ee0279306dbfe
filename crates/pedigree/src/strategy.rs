//! Forced-archive-first decomposition.
//!
//! Every input is first tried as a container regardless of its name. Only a
//! "not a container" failure falls back to the kind its extension resolves
//! to; everything else reaches the caller.

use std::path::{Path, PathBuf};

use crate::artifact::{Artifact, ArtifactInput};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::{HandlerKind, SnoopOptions};

/// Classify one input into an artifact.
pub fn classify(input: ArtifactInput, options: &SnoopOptions) -> Result<Artifact> {
    let path = input.path.clone();

    let artifact = match Artifact::build(input.clone(), HandlerKind::Archive, options) {
        Ok(artifact) => artifact,
        Err(Error::NotAContainer { source, .. }) => {
            let resolved = fallback_kind(options, &path);
            options.sink.emit(&Event::Fallback {
                path: path.clone(),
                attempted: HandlerKind::Archive,
                resolved,
                reason: source.to_string(),
            });
            Artifact::build(input, resolved, options).map_err(|e| report(options, e, resolved))?
        }
        Err(e) => return Err(report(options, e, HandlerKind::Archive)),
    };

    tracing::debug!(
        path = %path.display(),
        handler = %artifact.handler_kind(),
        parent = artifact.parent_digest().unwrap_or("-"),
        "classified artifact"
    );
    Ok(artifact)
}

/// Classify the file at `path` with no parent.
pub fn classify_path(path: impl Into<PathBuf>, options: &SnoopOptions) -> Result<Artifact> {
    classify(ArtifactInput::from_path(path), options)
}

/// Extension-resolved kind, never Archive: the content already failed as one.
fn fallback_kind(options: &SnoopOptions, path: &Path) -> HandlerKind {
    match options.classifier.resolve_path(path) {
        HandlerKind::Archive => options.classifier.default_kind(),
        kind => kind,
    }
}

fn report(options: &SnoopOptions, err: Error, kind: HandlerKind) -> Error {
    if let Some(path) = err.path() {
        options.sink.emit(&Event::IoFailure {
            path: path.to_path_buf(),
            kind: err.kind().unwrap_or(kind),
            error: err.to_string(),
        });
    }
    err
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::classify::Classifier;
    use crate::event::EventSink;

    #[derive(Debug, Default)]
    struct Collect(Mutex<Vec<Event>>);

    impl EventSink for Collect {
        fn emit(&self, event: &Event) { self.0.lock().push(event.clone()); }
    }

    #[test]
    fn non_archive_falls_back_by_extension() {
        let sink = Arc::new(Collect::default());
        let options = SnoopOptions::default().sink(sink.clone());

        let artifact = classify(ArtifactInput::from_bytes("MANIFEST.MF", &b"A: b\n"[..]), &options).unwrap();
        assert_eq!(artifact.handler_kind(), HandlerKind::Manifest);

        let events = sink.0.lock();
        assert!(matches!(
            &events[..],
            [Event::Fallback {
                attempted: HandlerKind::Archive,
                resolved: HandlerKind::Manifest,
                ..
            }]
        ));
    }

    #[test]
    fn archive_extension_without_archive_content_uses_default() {
        let options = SnoopOptions::default();
        let artifact = classify(ArtifactInput::from_bytes("broken.jar", &b"nope"[..]), &options).unwrap();
        assert_eq!(artifact.handler_kind(), HandlerKind::Simple);
        assert_eq!(artifact.kind(), ".jar");
    }

    #[test]
    fn ignored_extension_falls_back_to_default() {
        let classifier = Arc::new(Classifier::new());
        classifier.register_ignored(".mf");
        let options = SnoopOptions::default().classifier(classifier);

        let artifact = classify(ArtifactInput::from_bytes("MANIFEST.MF", &b"A: b\n"[..]), &options).unwrap();
        assert_eq!(artifact.handler_kind(), HandlerKind::Simple);
        assert_eq!(artifact.kind(), ".mf");
    }

    #[test]
    fn missing_file_is_reported() {
        let sink = Arc::new(Collect::default());
        let options = SnoopOptions::default().sink(sink.clone());

        let err = classify_path("/no/such/dir/app.jar", &options).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));
        assert!(matches!(&sink.0.lock()[..], [Event::IoFailure { .. }]));
    }
}
