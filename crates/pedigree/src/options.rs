use std::sync::Arc;

use pedigree_archive::ArchiveOptions;
use pedigree_verify::{Algorithm, ChecksumProvider, REQUIRED_ALGORITHMS, StandardChecksums};

use crate::classify::Classifier;
use crate::event::{EventSink, TracingSink};
use crate::registry::HandlerRegistry;

pub const DEFAULT_TEMP_PREFIX: &str = "pedigree.persist.";

/// Settings shared by every artifact in one classification run.
///
/// Cloning is cheap; collaborators are reference counted.
#[derive(Clone, Debug)]
pub struct SnoopOptions {
    pub algorithms:  Vec<Algorithm>,
    pub temp_prefix: String,
    pub archive:     ArchiveOptions,
    pub checksums:   Arc<dyn ChecksumProvider>,
    pub sink:        Arc<dyn EventSink>,
    pub classifier:  Arc<Classifier>,
    pub registry:    Arc<HandlerRegistry>,
}

impl Default for SnoopOptions {
    fn default() -> Self {
        Self {
            algorithms:  REQUIRED_ALGORITHMS.to_vec(),
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            archive:     ArchiveOptions::default(),
            checksums:   Arc::new(StandardChecksums),
            sink:        Arc::new(TracingSink),
            classifier:  Classifier::global(),
            registry:    HandlerRegistry::global(),
        }
    }
}

impl SnoopOptions {
    /// Digest algorithms to compute; duplicates are dropped, order kept.
    pub fn algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        let mut unique = Vec::new();
        for algorithm in algorithms {
            if !unique.contains(&algorithm) {
                unique.push(algorithm);
            }
        }
        self.algorithms = unique;
        self
    }

    pub fn temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    pub fn archive_options(mut self, options: ArchiveOptions) -> Self {
        self.archive = options;
        self
    }

    pub fn max_member_size(mut self, bytes: u64) -> Self {
        self.archive = self.archive.max_member_size(bytes);
        self
    }

    pub fn checksums(mut self, provider: Arc<dyn ChecksumProvider>) -> Self {
        self.checksums = provider;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn classifier(mut self, classifier: Arc<Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn registry(mut self, registry: Arc<HandlerRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Algorithm whose digest links children to this artifact.
    pub fn lineage_algorithm(&self) -> Option<Algorithm> { Algorithm::strongest(&self.algorithms) }
}
