use regex::Regex;

/// Patterns used when none are given on the command line.
pub(crate) const DEFAULT_PATTERNS: &[&str] = &[
    r#"api_key\s*=\s*["'].+["']"#,
    r#"password\s*=\s*["'].+["']"#,
];

/// Pre-scan run over the raw export before it is parsed.
///
/// Implementations are heuristics: returning `None` means nothing was
/// recognised, not that the content is clean.
pub trait SensitiveDataPolicy {
    /// Return a description of the first rule that matched `content`.
    fn scan(&self, content: &str) -> Option<String>;
}

/// Policy flagging content that matches any of a set of regular expressions.
pub struct PatternPolicy {
    patterns: Vec<Regex>,
}

impl PatternPolicy {
    pub(crate) fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }
}

impl SensitiveDataPolicy for PatternPolicy {
    fn scan(&self, content: &str) -> Option<String> {
        self.patterns
            .iter()
            .find(|re| re.is_match(content))
            .map(|re| re.as_str().to_string())
    }
}
