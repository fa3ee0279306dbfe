use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BuildContext, Handler};
use crate::classify::extension_of;
use crate::error::HandlerError;

/// DER SEQUENCE tag; PKCS#7 signature blocks start with it.
const DER_SEQUENCE: u8 = 0x30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignatureAlgorithm {
    Rsa,
    Dsa,
    Ec,
}

impl SignatureAlgorithm {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".rsa" => Some(Self::Rsa),
            ".dsa" => Some(Self::Dsa),
            ".ec" => Some(Self::Ec),
            _ => None,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Ec => "EC",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignatureInfo {
    pub algorithm: Option<SignatureAlgorithm>,
    pub looks_der: bool,
}

pub(crate) fn build(ctx: &BuildContext<'_>) -> Result<Handler, HandlerError> {
    let head = ctx.content.head(1)?;
    Ok(Handler::Signature(SignatureInfo {
        algorithm: SignatureAlgorithm::from_extension(&extension_of(ctx.path)),
        looks_der: head.first() == Some(&DER_SEQUENCE),
    }))
}
