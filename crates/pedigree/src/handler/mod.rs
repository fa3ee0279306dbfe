//! Per-kind handlers.
//!
//! Each submodule exposes a `build` factory with the [`HandlerFactory`]
//! signature. Factories inspect content but never own it; storage stays with
//! the artifact.

use std::path::Path;

use crate::HandlerKind;
use crate::error::HandlerError;
use crate::options::SnoopOptions;
use crate::persist::Content;

pub mod archive;
pub mod classfile;
pub mod manifest;
pub mod signature;
pub mod simple;

pub use archive::ArchiveInfo;
pub use classfile::{ClassFileInfo, ClassVersion};
pub use manifest::ManifestInfo;
pub use signature::{SignatureAlgorithm, SignatureInfo};

/// Everything a factory may look at.
#[derive(Clone, Copy, Debug)]
pub struct BuildContext<'a> {
    /// Logical path of the artifact.
    pub path:    &'a Path,
    pub content: Content<'a>,
    pub options: &'a SnoopOptions,
}

pub type HandlerFactory = fn(&BuildContext<'_>) -> Result<Handler, HandlerError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handler {
    Archive(ArchiveInfo),
    ClassFile(ClassFileInfo),
    Manifest(ManifestInfo),
    Signature(SignatureInfo),
    Simple,
}

impl Handler {
    pub fn kind(&self) -> HandlerKind {
        match self {
            Handler::Archive(_) => HandlerKind::Archive,
            Handler::ClassFile(_) => HandlerKind::ClassFile,
            Handler::Manifest(_) => HandlerKind::Manifest,
            Handler::Signature(_) => HandlerKind::Signature,
            Handler::Simple => HandlerKind::Simple,
        }
    }

    pub fn is_container(&self) -> bool { self.kind().is_container() }

    pub fn as_archive(&self) -> Option<&ArchiveInfo> {
        match self {
            Handler::Archive(info) => Some(info),
            _ => None,
        }
    }
}
