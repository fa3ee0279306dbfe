//! Transient on-disk backing for in-memory artifacts.
//!
//! Handlers that need a real file get one inside a [`TransientDir`]; the
//! directory belongs to a single owner and disappears with it.

pub use error::{Error, Result};
pub use rw::{ensure_file, read_file, write_file};
pub use transient::{TransientDir, mirror_path};

mod error;
mod rw;
mod transient;
