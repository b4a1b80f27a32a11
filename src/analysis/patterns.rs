//! Static pattern tables used to classify diffs.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Extension (with leading dot) to a human-readable language label.
pub const FILE_TYPES: &[(&str, &str)] = &[
    (".js", "JavaScript"),
    (".ts", "TypeScript"),
    (".jsx", "React"),
    (".tsx", "React TypeScript"),
    (".py", "Python"),
    (".java", "Java"),
    (".rs", "Rust"),
    (".go", "Go"),
    (".css", "CSS"),
    (".scss", "SCSS"),
    (".html", "HTML"),
    (".md", "Markdown"),
    (".json", "JSON"),
    (".xml", "XML"),
    (".sql", "SQL"),
    (".sh", "Shell Script"),
    (".yml", "YAML"),
    (".yaml", "YAML"),
];

pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];

/// Endings accepted after a keyword root ("fix" matches "fixes", "fixed").
pub const KEYWORD_SUFFIXES: &[&str] = &[
    "s", "es", "d", "ed", "ing", "ion", "ions", "ation", "ations",
];
/// Endings accepted after a root's final `e` is dropped ("cache" matches "caching").
const SILENT_E_SUFFIXES: &[&str] = &["ing", "ion", "ions", "ation", "ations"];
/// Endings accepted after a root's final `y` is dropped ("memory" matches "memories").
const Y_SUFFIXES: &[&str] = &["ies", "ied"];

/// Keyword families searched for on changed lines.
pub const KEYWORD_FAMILIES: &[&[&str]] = &[
    // bug fixes
    &["fix", "bug", "error", "issue", "resolve", "patch"],
    // performance
    &["optimize", "performance", "speed", "cache", "memory"],
    // security
    &["auth", "security", "token", "password", "encrypt", "vulnerability", "exploit"],
    // refactoring
    &["refactor", "restructure", "reorganize", "move", "rename"],
    // urgency
    &["hotfix", "critical", "urgent", "emergency"],
    // reverts
    &["revert", "undo", "rollback"],
    // unfinished work
    &["wip", "todo", "fixme"],
];

// Line patterns. Each one is matched against the content of a single added line.
pub static NEW_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*\b(?:function|def|fn|const|let|var)\s+(\w+)").unwrap()
});
pub static NEW_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*\b(?:class|interface)\s+(\w+)").unwrap());
pub static IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import|require|from|\buse\s").unwrap());
pub static EXPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export|module\.exports|\bpub\s").unwrap());
pub static API_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"fetch|axios|api|http").unwrap());
pub static DATABASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sql|query|database|db\.|collection").unwrap());
pub static TEST_CONSTRUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"test|spec|describe|it\(|expect").unwrap());

// Path patterns consulted by the change type rules.
pub static BUILD_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)webpack|babel|rollup|vite|package\.json|tsconfig|build").unwrap()
});
pub static CI_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.github|gitlab-ci|jenkins|workflow|pipeline|docker").unwrap()
});
/// CI paths for picking an alternative type; container files do not count.
pub static ALT_CI_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.github|gitlab-ci|jenkins|workflow|pipeline").unwrap()
});
pub static DEPENDENCY_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)package\.json|yarn\.lock|package-lock\.json|pnpm-lock\.yaml|requirements\.txt|pom\.xml|cargo\.toml|cargo\.lock|go\.mod|go\.sum|gemfile\.lock|poetry\.lock",
    )
    .unwrap()
});

/// Whether `token` is one of `roots` or a derived form of one.
pub fn token_matches(token: &str, roots: &[&str]) -> bool {
    roots.iter().any(|root| is_derived_from(token, root))
}

fn is_derived_from(token: &str, root: &str) -> bool {
    let ends_with = |stem: &str, suffixes: &[&str]| {
        token
            .strip_prefix(stem)
            .is_some_and(|rest| suffixes.contains(&rest))
    };

    if token == root || ends_with(root, KEYWORD_SUFFIXES) {
        return true;
    }
    if let Some(stem) = root.strip_suffix('e') {
        return ends_with(stem, SILENT_E_SUFFIXES);
    }
    if let Some(stem) = root.strip_suffix('y') {
        return ends_with(stem, Y_SUFFIXES);
    }
    false
}

/// Lowercased words of a line. Identifiers are split at `_` and at camelCase
/// boundaries, so `password_hash` and `fixOverflow` both yield two words.
pub fn word_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in line.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Keyword tokens of a line: every word belonging to one of [`KEYWORD_FAMILIES`].
pub fn keyword_tokens(line: &str) -> impl Iterator<Item = String> {
    word_tokens(line)
        .into_iter()
        .filter(|token| KEYWORD_FAMILIES.iter().any(|roots| token_matches(token, roots)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(line: &str) -> Vec<String> {
        keyword_tokens(line).collect()
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        assert_eq!(keywords("check the auth header"), vec!["auth"]);
        assert!(keywords("authenticateUser(email)").is_empty());
        assert!(keywords("prefix the author").is_empty());
    }

    #[test]
    fn test_keywords_accept_inflections() {
        assert_eq!(
            keywords("fixed the bugs and resolved an issue"),
            vec!["fixed", "bugs", "resolved", "issue"]
        );
    }

    #[test]
    fn test_keywords_accept_derived_forms() {
        assert_eq!(keywords("encryption of stored secrets"), vec!["encryption"]);
        assert_eq!(keywords("add caching layer"), vec!["caching"]);
        assert_eq!(keywords("query optimization"), vec!["optimization"]);
        assert_eq!(keywords("patch vulnerabilities"), vec!["patch", "vulnerabilities"]);
        assert_eq!(keywords("fewer memories"), vec!["memories"]);
    }

    #[test]
    fn test_keywords_inside_identifiers() {
        assert_eq!(keywords("let password_hash = hash(input);"), vec!["password"]);
        assert_eq!(keywords("fix_overflow(total);"), vec!["fix"]);
        assert_eq!(keywords("if (tokenExpired) refreshToken()"), vec!["token", "token"]);
    }

    #[test]
    fn test_word_tokens_split_identifiers() {
        assert_eq!(
            word_tokens("parseHTTPHeader(my_value, v2Token)"),
            vec!["parse", "httpheader", "my", "value", "v2", "token"]
        );
        assert!(word_tokens("  // -- ").is_empty());
    }

    #[test]
    fn test_new_function_captures_identifier() {
        let caps = NEW_FUNCTION.captures("export function authenticateUser(email) {").unwrap();
        assert_eq!(&caps[1], "authenticateUser");

        let caps = NEW_FUNCTION.captures("pub fn parse_header(input: &str) {").unwrap();
        assert_eq!(&caps[1], "parse_header");
    }

    #[test]
    fn test_token_matches_roots_and_suffixes() {
        assert!(token_matches("fix", &["fix"]));
        assert!(token_matches("fixes", &["fix"]));
        assert!(!token_matches("fixme", &["fix"]));
        assert!(!token_matches("prefix", &["fix"]));
        assert!(token_matches("optimizing", &["optimize"]));
        assert!(!token_matches("authenticate", &["auth"]));
    }

    #[test]
    fn test_dependency_path_matches_lockfiles() {
        assert!(DEPENDENCY_PATH.is_match("Cargo.lock"));
        assert!(DEPENDENCY_PATH.is_match("frontend/yarn.lock"));
        assert!(!DEPENDENCY_PATH.is_match("src/lock.rs"));
    }
}
