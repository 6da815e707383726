use once_cell::sync::Lazy;
use regex::Regex;

/// Length of the short SHA-512 hash that ends every full identifier
pub const SHORT_HASH_LEN: usize = 15;

// Whitespace is ASCII only: space, tab, newline, vertical tab, form feed, carriage return.

static SEMANTIC_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid regex"));
static LOOSE_SEMANTIC_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+[a-zA-Z0-9\-+._ \t\n\x0B\x0C\r]*$").expect("valid regex")
});
static FULL_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[a-z0-9\-_]+:[a-z0-9\-_]+:[a-z0-9]{{{}}}$", SHORT_HASH_LEN))
        .expect("valid regex")
});
static GENERIC_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9\-_]+:[a-z0-9\-_]+$").expect("valid regex"));
static HUMAN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\-_ \t\n\x0B\x0C\r]+$").expect("valid regex"));
static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid regex"));
static URL_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\-_:/?&]+$").expect("valid regex"));
static SHORT_HASH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[a-z0-9]{{{}}}$", SHORT_HASH_LEN)).expect("valid regex")
});

/// The fixed set of field grammars used by index and manifest documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `MAJOR.MINOR.PATCH`, nothing else
    SemanticVersion,
    /// `MAJOR.MINOR.PATCH` followed by an optional free-form suffix ("1.19.4-pre1")
    LooseSemanticVersion,
    /// `modloader:modname:hash`
    FullIdentifier,
    /// `modloader:modname`
    GenericIdentifier,
    /// Letters, digits, dash, underscore and whitespace
    HumanName,
    Alphanumeric,
    /// Letters, digits, dash, underscore, colon, slash, question mark and ampersand
    UrlToken,
    /// Exactly 15 lowercase alphanumeric characters
    ShortHash,
}

impl Grammar {
    pub const ALL: [Grammar; 8] = [
        Grammar::SemanticVersion,
        Grammar::LooseSemanticVersion,
        Grammar::FullIdentifier,
        Grammar::GenericIdentifier,
        Grammar::HumanName,
        Grammar::Alphanumeric,
        Grammar::UrlToken,
        Grammar::ShortHash,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            Grammar::SemanticVersion => &*SEMANTIC_VERSION,
            Grammar::LooseSemanticVersion => &*LOOSE_SEMANTIC_VERSION,
            Grammar::FullIdentifier => &*FULL_IDENTIFIER,
            Grammar::GenericIdentifier => &*GENERIC_IDENTIFIER,
            Grammar::HumanName => &*HUMAN_NAME,
            Grammar::Alphanumeric => &*ALPHANUMERIC,
            Grammar::UrlToken => &*URL_TOKEN,
            Grammar::ShortHash => &*SHORT_HASH,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grammar::SemanticVersion => "semantic version",
            Grammar::LooseSemanticVersion => "loose semantic version",
            Grammar::FullIdentifier => "full identifier",
            Grammar::GenericIdentifier => "generic identifier",
            Grammar::HumanName => "name",
            Grammar::Alphanumeric => "alphanumeric",
            Grammar::UrlToken => "url",
            Grammar::ShortHash => "short hash",
        }
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
