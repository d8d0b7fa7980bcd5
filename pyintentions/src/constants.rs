use regex::Regex;
use std::sync::OnceLock;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = ".pyintentions.toml";

/// Default pyproject filename.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Modules whose `Optional` and `Union` are recognized unless configured otherwise.
pub const DEFAULT_TYPING_MODULES: &[&str] = &["typing", "typing_extensions"];

/// Module new typing imports are written against.
pub const TYPING_MODULE: &str = "typing";

pub const OPTIONAL: &str = "Optional";
pub const UNION: &str = "Union";

/// Name of the export list dunder.
pub const ALL: &str = "__all__";

/// Regex for a PEP 263 source encoding declaration.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_coding_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"^[ \t\f]*#.*?coding[:=][ \t]*[-_.a-zA-Z0-9]+")
            .expect("Invalid coding line regex pattern")
    })
}
