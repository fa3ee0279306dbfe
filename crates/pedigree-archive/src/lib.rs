//! Container detection and member enumeration.
//!
//! # Architecture
//!
//! - `format.rs` - Magic-byte detection and compression decoders
//! - `archive.rs` - Validating open and member iteration
//! - `sanitize.rs` - Member path sanitization (zip-slip prevention)
//! - `members/` - Per-format implementations
//!
//! Recognition is by content, never by file name: a renamed or extensionless
//! jar is still a zip. Failures that mean "this is not a container" are told
//! apart from environment failures by [`Error::is_format_error`].

pub use archive::{Archive, ArchiveOptions, DEFAULT_MAX_MEMBER_SIZE, Member, Members};
pub use error::{Error, Result};
pub use format::{ArchiveFormat, Compression, DETECT_LEN, detect_format, detect_from_reader};
pub use sanitize::{sanitize_member_path, stream_member_name};

mod archive;
mod error;
mod format;
mod members;
mod sanitize;
