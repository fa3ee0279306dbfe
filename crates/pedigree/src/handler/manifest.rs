use super::{BuildContext, Handler};
use crate::error::HandlerError;

/// Manifests larger than this are only parsed up to the limit.
const READ_LIMIT: usize = 1 << 20;

/// Main-section attributes and the count of per-entry sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestInfo {
    pub attributes: Vec<(String, String)>,
    pub sections:   usize,
}

impl ManifestInfo {
    /// Attribute names compare case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub(crate) fn build(ctx: &BuildContext<'_>) -> Result<Handler, HandlerError> {
    let bytes = ctx.content.read_to_limit(READ_LIMIT)?;
    Ok(Handler::Manifest(parse(&String::from_utf8_lossy(&bytes))))
}

fn parse(text: &str) -> ManifestInfo {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut info = ManifestInfo::default();
    let mut in_main = true;
    let mut section_has_content = false;
    let mut current: Option<(String, String)> = None;

    for line in text.split('\n') {
        if let Some(rest) = line.strip_prefix(' ') {
            if let Some((_, value)) = current.as_mut() {
                value.push_str(rest);
            }
            continue;
        }

        let finished = current.take();
        if in_main {
            info.attributes.extend(finished);
        }

        if line.is_empty() {
            if section_has_content && !in_main {
                info.sections += 1;
            }
            if section_has_content || !in_main {
                in_main = false;
            }
            section_has_content = false;
            continue;
        }

        section_has_content = true;
        if let Some((key, value)) = line.split_once(':') {
            current = Some((key.trim().to_string(), value.strip_prefix(' ').unwrap_or(value).to_string()));
        }
    }

    if in_main {
        info.attributes.extend(current);
    } else if section_has_content {
        info.sections += 1;
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_attributes_with_continuation() {
        let info = parse(
            "Manifest-Version: 1.0\r\nCreated-By: 17.0.2 (Eclipse\r\n  Adoptium)\r\nMain-Class: com.e\r\n xample.App\r\n\r\n",
        );
        assert_eq!(info.get("manifest-version"), Some("1.0"));
        assert_eq!(info.get("Created-By"), Some("17.0.2 (Eclipse Adoptium)"));
        assert_eq!(info.get("Main-Class"), Some("com.example.App"));
        assert_eq!(info.sections, 0);
    }

    #[test]
    fn counts_entry_sections() {
        let info = parse(
            "Manifest-Version: 1.0\n\nName: a/A.class\nSHA-256-Digest: abc=\n\nName: b/B.class\nSHA-256-Digest: def=\n",
        );
        assert_eq!(info.attributes.len(), 1);
        assert_eq!(info.sections, 2);
    }

    #[test]
    fn empty_and_garbage_input() {
        assert_eq!(parse(""), ManifestInfo::default());
        let info = parse("no colon here\n");
        assert!(info.attributes.is_empty());
        assert_eq!(info.sections, 0);
    }
}
