use super::{BuildContext, Handler};
use crate::error::HandlerError;

const MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];
const HEADER_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClassVersion {
    pub major: u16,
    pub minor: u16,
}

impl ClassVersion {
    /// Java feature release that introduced this major version (52 is 8).
    pub fn java_release(&self) -> Option<u16> { self.major.checked_sub(44).filter(|r| *r > 0) }
}

/// Class-file metadata. `version` is `None` when the header is missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassFileInfo {
    pub version: Option<ClassVersion>,
}

pub(crate) fn build(ctx: &BuildContext<'_>) -> Result<Handler, HandlerError> {
    let head = ctx.content.head(HEADER_LEN)?;
    Ok(Handler::ClassFile(ClassFileInfo {
        version: parse_header(&head),
    }))
}

fn parse_header(head: &[u8]) -> Option<ClassVersion> {
    if head.len() < HEADER_LEN || head[..4] != MAGIC {
        return None;
    }
    Some(ClassVersion {
        minor: u16::from_be_bytes([head[4], head[5]]),
        major: u16::from_be_bytes([head[6], head[7]]),
    })
}
