//! Per-format member enumeration.

#[cfg(feature = "tar")]
pub(crate) mod tar;
#[cfg(feature = "zip")]
pub(crate) mod zip;
