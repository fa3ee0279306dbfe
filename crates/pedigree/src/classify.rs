//! Extension classification table.
//!
//! Maps a normalized extension (lowercase, leading dot) to a [`HandlerKind`].
//! The table itself is fixed at construction; the ignore set is the only
//! mutable piece and forces the default kind for the extensions it holds.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::HandlerKind;

static DEFAULT_TABLE: &[(&str, HandlerKind)] = &[
    (".mf", HandlerKind::Manifest),
    (".rsa", HandlerKind::Signature),
    (".dsa", HandlerKind::Signature),
    (".ec", HandlerKind::Signature),
    (".class", HandlerKind::ClassFile),
    (".zip", HandlerKind::Archive),
    (".gz", HandlerKind::Archive),
    (".tgz", HandlerKind::Archive),
    (".bz2", HandlerKind::Archive),
    (".tar", HandlerKind::Archive),
    (".jar", HandlerKind::Archive),
    (".war", HandlerKind::Archive),
    (".ear", HandlerKind::Archive),
    (".sar", HandlerKind::Archive),
];

static GLOBAL: Lazy<Arc<Classifier>> = Lazy::new(|| Arc::new(Classifier::new()));

#[derive(Debug)]
pub struct Classifier {
    table:        HashMap<String, HandlerKind>,
    default_kind: HandlerKind,
    ignored:      RwLock<BTreeSet<String>>,
}

impl Default for Classifier {
    fn default() -> Self { Self::new() }
}

impl Classifier {
    /// A classifier over the built-in table with an empty ignore set.
    pub fn new() -> Self {
        Self::with_table(DEFAULT_TABLE.iter().copied(), HandlerKind::DEFAULT)
    }

    pub fn with_table<I, S>(entries: I, default_kind: HandlerKind) -> Self
    where
        I: IntoIterator<Item = (S, HandlerKind)>,
        S: AsRef<str>,
    {
        let table = entries
            .into_iter()
            .map(|(ext, kind)| (normalize_extension(ext.as_ref()), kind))
            .collect();

        Self {
            table,
            default_kind,
            ignored: RwLock::new(BTreeSet::new()),
        }
    }

    /// The process-wide classifier.
    pub fn global() -> Arc<Classifier> { Arc::clone(&GLOBAL) }

    pub fn default_kind(&self) -> HandlerKind { self.default_kind }

    /// Resolve an extension to a handler kind. Never fails.
    pub fn resolve_kind(&self, extension: &str) -> HandlerKind {
        let extension = normalize_extension(extension);
        if self.ignored.read().contains(&extension) {
            return self.default_kind;
        }
        self.table
            .get(&extension)
            .copied()
            .unwrap_or(self.default_kind)
    }

    pub fn resolve_path(&self, path: impl AsRef<Path>) -> HandlerKind {
        self.resolve_kind(&extension_of(path))
    }

    pub fn known_extensions(&self) -> BTreeSet<String> { self.table.keys().cloned().collect() }

    pub fn register_ignored(&self, extensions: impl ExtensionList) {
        let extensions = extensions.into_extensions();
        let mut ignored = self.ignored.write();
        for ext in extensions {
            ignored.insert(normalize_extension(&ext));
        }
    }

    pub fn unregister_ignored(&self, extensions: impl ExtensionList) {
        let extensions = extensions.into_extensions();
        let mut ignored = self.ignored.write();
        for ext in extensions {
            ignored.remove(&normalize_extension(&ext));
        }
    }

    pub fn ignored_extensions(&self) -> BTreeSet<String> { self.ignored.read().clone() }

    pub fn is_ignored(&self, extension: &str) -> bool {
        self.ignored.read().contains(&normalize_extension(extension))
    }
}

/// One extension or a collection of them.
pub trait ExtensionList {
    fn into_extensions(self) -> Vec<String>;
}

impl ExtensionList for &str {
    fn into_extensions(self) -> Vec<String> { vec![self.to_string()] }
}

impl ExtensionList for String {
    fn into_extensions(self) -> Vec<String> { vec![self] }
}

impl<S: AsRef<str>> ExtensionList for &[S] {
    fn into_extensions(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> ExtensionList for [S; N] {
    fn into_extensions(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> ExtensionList for Vec<S> {
    fn into_extensions(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

/// Lowercase with a single leading dot; blank input stays empty.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Normalized extension of the last path segment, or `""` when it has none.
///
/// A leading dot alone does not start an extension (`.profile` has none).
pub fn extension_of(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_extensions_case_insensitively() {
        let classifier = Classifier::new();
        assert_eq!(classifier.resolve_kind(".MF"), HandlerKind::Manifest);
        assert_eq!(classifier.resolve_kind("jar"), HandlerKind::Archive);
        assert_eq!(classifier.resolve_kind(".Class"), HandlerKind::ClassFile);
        assert_eq!(classifier.resolve_kind(".RSA"), HandlerKind::Signature);
    }

    #[test]
    fn unknown_and_malformed_extensions_use_default() {
        let classifier = Classifier::new();
        for ext in [".zzz", "", ".", "   ", "..jar", ".ja r", "\u{1F980}"] {
            assert_eq!(classifier.resolve_kind(ext), HandlerKind::Simple, "{ext:?}");
        }
    }

    #[test]
    fn ignored_extension_uses_default() {
        let classifier = Classifier::new();
        classifier.register_ignored(".JAR");
        assert!(classifier.is_ignored(".jar"));
        assert_eq!(classifier.resolve_kind(".jar"), HandlerKind::Simple);

        classifier.unregister_ignored("jar");
        assert_eq!(classifier.resolve_kind(".jar"), HandlerKind::Archive);
    }

    #[test]
    fn register_and_unregister_are_idempotent() {
        let classifier = Classifier::new();
        let known = classifier.known_extensions();

        classifier.register_ignored([".mf", ".class"]);
        classifier.register_ignored(vec![".mf"]);
        classifier.register_ignored(&[".MF"][..]);
        assert_eq!(
            classifier.ignored_extensions(),
            BTreeSet::from([".class".to_string(), ".mf".to_string()])
        );

        classifier.unregister_ignored(".sar");
        classifier.unregister_ignored(String::from(".class"));
        classifier.unregister_ignored(".class");
        assert_eq!(classifier.ignored_extensions(), BTreeSet::from([".mf".to_string()]));
        assert_eq!(classifier.known_extensions(), known);
    }

    #[test]
    fn known_extensions_cover_table() {
        let known = Classifier::new().known_extensions();
        assert!(known.contains(".jar"));
        assert!(known.contains(".mf"));
        assert!(!known.contains(".zzz"));
        assert_eq!(known.len(), DEFAULT_TABLE.len());
    }

    #[test]
    fn custom_table_and_default() {
        let classifier = Classifier::with_table([("JSON", HandlerKind::Manifest)], HandlerKind::Signature);
        assert_eq!(classifier.resolve_kind(".json"), HandlerKind::Manifest);
        assert_eq!(classifier.resolve_kind(".jar"), HandlerKind::Signature);
        assert_eq!(classifier.default_kind(), HandlerKind::Signature);
    }

    #[test]
    fn extension_of_paths() {
        assert_eq!(extension_of("lib/app.JAR"), ".jar");
        assert_eq!(extension_of("bundle.tar.gz"), ".gz");
        assert_eq!(extension_of(".profile"), "");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of("META-INF/MANIFEST.MF"), ".mf");
    }

    #[test]
    fn concurrent_reads_during_mutation() {
        let classifier = Arc::new(Classifier::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let classifier = Arc::clone(&classifier);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        if i == 0 {
                            classifier.register_ignored(".mf");
                            classifier.unregister_ignored(".mf");
                        } else {
                            let kind = classifier.resolve_kind(".mf");
                            assert!(matches!(kind, HandlerKind::Manifest | HandlerKind::Simple));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(!classifier.is_ignored(".mf"));
    }
}
