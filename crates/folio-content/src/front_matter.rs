//! Front matter parsing for content pages.

use serde::Deserialize;

/// Front matter fields relevant to navigation.
///
/// Other keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub sidebar_label: Option<String>,
}

/// Return the YAML block between a leading `---` line and the next `---` line.
pub(crate) fn extract_block(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parse navigation fields from page content.
///
/// Returns `None` if the page has no front matter or it is not valid YAML.
pub(crate) fn parse(content: &str) -> Option<FrontMatter> {
    let block = extract_block(content)?;
    if block.trim().is_empty() {
        return Some(FrontMatter::default());
    }
    serde_yaml::from_str(block).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_extract_block() {
        let content = "---\nid: intro\n---\n# Intro\n";
        assert_eq!(extract_block(content), Some("id: intro\n"));
    }

    #[test]
    fn test_extract_block_crlf() {
        let content = "---\r\ntitle: Hi\r\n---\r\nBody";
        assert_eq!(extract_block(content), Some("title: Hi\r\n"));
    }

    #[test]
    fn test_no_front_matter() {
        assert_eq!(extract_block("# Title\n---\n"), None);
        assert_eq!(parse("# Title"), None);
    }

    #[test]
    fn test_unterminated_front_matter() {
        assert_eq!(extract_block("---\nid: a\n# Title"), None);
    }

    #[test]
    fn test_parse_fields() {
        let fm = parse("---\nid: overview\ntitle: Overview\nsidebar_label: Start here\ntags: [a]\n---\n")
            .unwrap();
        assert_eq!(
            fm,
            FrontMatter {
                id: Some("overview".to_owned()),
                title: Some("Overview".to_owned()),
                sidebar_label: Some("Start here".to_owned()),
            }
        );
    }

    #[test]
    fn test_empty_front_matter() {
        assert_eq!(parse("---\n---\n# Page"), Some(FrontMatter::default()));
    }

    #[test]
    fn test_invalid_yaml_is_ignored() {
        assert_eq!(parse("---\nid: [unclosed\n---\n"), None);
    }
}
