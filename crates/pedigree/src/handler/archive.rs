use pedigree_archive::{Archive, ArchiveFormat, ArchiveOptions};

use super::{BuildContext, Handler};
use crate::error::HandlerError;

/// A structurally valid container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveInfo {
    pub format:       ArchiveFormat,
    pub member_count: usize,
    pub options:      ArchiveOptions,
}

pub(crate) fn build(ctx: &BuildContext<'_>) -> Result<Handler, HandlerError> {
    let reader = ctx.content.reader()?;
    let options = ctx.options.archive;
    let archive = Archive::open_with(reader, options)?;

    tracing::trace!(
        path = %ctx.path.display(),
        format = ?archive.format(),
        members = archive.member_count(),
        "opened container"
    );

    Ok(Handler::Archive(ArchiveInfo {
        format: archive.format(),
        member_count: archive.member_count(),
        options,
    }))
}
