use crate::config::CheckConfig;

/// One comma-separated entry of the declaration header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub raw: String,
    /// Last directory component before the base name; empty when the token has none.
    pub parent_directory_name: String,
    pub base_name: String,
    pub has_wildcard: bool,
    pub is_global_wildcard: bool,
    pub has_xml_extension: bool,
}

impl Declaration {
    pub fn parse(raw: &str, config: &CheckConfig) -> Self {
        let raw = raw.trim();
        let (dir, base_name) = match raw.rsplit_once('/') {
            Some((dir, base)) => (dir, base),
            None => ("", raw),
        };
        let parent_directory_name = dir
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("")
            .to_string();
        let has_xml_extension = base_name.ends_with(&config.descriptor_extension);
        Self {
            raw: raw.to_string(),
            parent_directory_name,
            base_name: base_name.to_string(),
            has_wildcard: base_name.contains('*'),
            is_global_wildcard: has_xml_extension && base_name == config.global_wildcard_token,
            has_xml_extension,
        }
    }

    pub fn in_descriptors_folder(&self, config: &CheckConfig) -> bool {
        self.parent_directory_name == config.descriptors_folder
    }

    /// Base name without the descriptor extension.
    pub fn stem<'a>(&'a self, config: &CheckConfig) -> &'a str {
        self.base_name
            .strip_suffix(&config.descriptor_extension)
            .unwrap_or(&self.base_name)
    }
}

/// Split a header value into declarations, preserving token order. An absent header
/// yields no declarations; empty segments are skipped.
pub fn tokenize_header(value: Option<&str>, config: &CheckConfig) -> Vec<Declaration> {
    let Some(value) = value else {
        return Vec::new();
    };
    let declarations: Vec<Declaration> = value
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .map(|seg| Declaration::parse(seg, config))
        .collect();
    tracing::debug!(
        header = %config.header,
        tokens = declarations.len(),
        "tokenized declaration header"
    );
    declarations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(value: &str) -> Vec<Declaration> {
        tokenize_header(Some(value), &CheckConfig::default())
    }

    #[test]
    fn absent_header_has_no_declarations() {
        assert!(tokenize_header(None, &CheckConfig::default()).is_empty());
    }

    #[test]
    fn tokens_keep_order_and_skip_empty_segments() {
        let got = decls(" OSGI-INF/b.xml, ,OSGI-INF/a.xml,, ");
        let names: Vec<&str> = got.iter().map(|d| d.base_name.as_str()).collect();
        assert_eq!(names, vec!["b.xml", "a.xml"]);
        assert!(got.iter().all(|d| !d.raw.is_empty()));
    }

    #[test]
    fn path_components_are_split() {
        let d = &decls("OSGI-INF/services/a.xml")[0];
        assert_eq!(d.parent_directory_name, "services");
        assert_eq!(d.base_name, "a.xml");
        assert!(d.has_xml_extension);
        assert!(!d.has_wildcard);

        let d = &decls("a.xml")[0];
        assert_eq!(d.parent_directory_name, "");
        assert_eq!(d.base_name, "a.xml");
    }

    #[test]
    fn wildcards_are_classified() {
        let d = &decls("OSGI-INF/*.xml")[0];
        assert!(d.is_global_wildcard);
        assert!(d.has_wildcard);

        let d = &decls("OSGI-INF/service*.xml")[0];
        assert!(!d.is_global_wildcard);
        assert!(d.has_wildcard);
        assert_eq!(d.stem(&CheckConfig::default()), "service*");

        let d = &decls("OSGI-INF/*.txt")[0];
        assert!(!d.is_global_wildcard);
        assert!(!d.has_xml_extension);
    }
}
