//! Scope inference for the `type(scope): description` header.

use crate::analysis::{CodeChanges, FileCategory, FileChanges};

/// Categories consulted for the scope, in priority order.
const CATEGORY_SCOPES: &[(FileCategory, &str)] = &[
    (FileCategory::Test, "test"),
    (FileCategory::Docs, "docs"),
    (FileCategory::Config, "config"),
    (FileCategory::Ui, "ui"),
    (FileCategory::Api, "api"),
    (FileCategory::Utils, "utils"),
    (FileCategory::Style, "style"),
    (FileCategory::Build, "build"),
    (FileCategory::Security, "security"),
];

/// Path fragment and the scope it implies. Paths are checked one at a time
/// against the whole table, so the first path decides.
const PATH_SCOPES: &[(&str, &str)] = &[
    // auth
    ("auth", "auth"),
    ("login", "auth"),
    ("oauth", "auth"),
    ("jwt", "auth"),
    ("session", "auth"),
    // users
    ("user", "user"),
    ("profile", "user"),
    ("account", "user"),
    ("admin", "admin"),
    ("dashboard", "admin"),
    ("management", "admin"),
    // frontend
    ("component", "ui"),
    ("view", "ui"),
    ("template", "ui"),
    ("layout", "ui"),
    ("page", "ui"),
    ("form", "ui"),
    ("modal", "ui"),
    ("button", "ui"),
    // backend
    ("service", "service"),
    ("controller", "controller"),
    ("model", "model"),
    ("repository", "data"),
    ("entity", "model"),
    ("dto", "model"),
    ("route", "api"),
    ("endpoint", "api"),
    ("middleware", "api"),
    ("handler", "api"),
    // storage
    ("migration", "database"),
    ("schema", "database"),
    ("seed", "database"),
    ("query", "database"),
    ("db", "database"),
    // configuration and build
    ("config", "config"),
    ("setting", "config"),
    ("env", "config"),
    ("docker", "config"),
    ("webpack", "build"),
    ("babel", "build"),
    ("tsconfig", "config"),
    ("github", "ci"),
    ("gitlab", "ci"),
    ("jenkins", "ci"),
    ("workflow", "ci"),
    ("pipeline", "ci"),
    ("deploy", "deploy"),
    // shared code
    ("util", "utils"),
    ("helper", "utils"),
    ("lib", "utils"),
    ("common", "utils"),
    // observability
    ("log", "logging"),
    ("monitor", "monitoring"),
    ("metric", "monitoring"),
    ("analytics", "analytics"),
    // security
    ("security", "security"),
    ("crypto", "security"),
    ("encrypt", "security"),
    ("permission", "security"),
    ("role", "security"),
    // performance
    ("cache", "performance"),
    ("optimize", "performance"),
    ("perf", "performance"),
    // testing
    ("spec", "test"),
    ("mock", "test"),
    ("fixture", "test"),
    // localization
    ("i18n", "localization"),
    ("locale", "localization"),
    ("translation", "localization"),
    // notifications
    ("email", "notification"),
    ("mail", "notification"),
    ("notification", "notification"),
    ("alert", "notification"),
    // commerce
    ("payment", "payment"),
    ("billing", "payment"),
    ("order", "order"),
    ("cart", "cart"),
    ("product", "product"),
];

/// Extension groups checked after the path table, in order.
const EXTENSION_SCOPES: &[(&[&str], &str)] = &[
    (&["css", "scss", "sass", "less", "styl"], "style"),
    (&["json", "yaml", "yml", "toml", "ini"], "config"),
    (&["md", "rst", "txt", "doc"], "docs"),
    (&["sql", "db"], "database"),
];

/// Infer the scope of a change.
///
/// The cascade goes from what happened to the files (created, removed,
/// renamed), through code signals and file categories, to path fragments and
/// extensions, ending with "update" or "core".
pub fn detect_action(files: &FileChanges, code: &CodeChanges) -> &'static str {
    if !files.added.is_empty() && files.modified.is_empty() {
        return "create";
    }
    if !files.deleted.is_empty() {
        return "remove";
    }
    if !files.renamed.is_empty() {
        return "refactor";
    }

    if code.has_new_definitions() {
        return "implement";
    }
    if code.tests > 0 {
        return "test";
    }
    if code.database > 0 {
        return "database";
    }
    if code.api_calls > 0 {
        return "api";
    }

    if let Some((_, scope)) = CATEGORY_SCOPES
        .iter()
        .find(|(category, _)| files.has_category(*category))
    {
        return scope;
    }

    if let Some(scope) = files.touched_paths().find_map(path_scope) {
        return scope;
    }

    let extensions: Vec<String> = files
        .touched_paths()
        .map(|p| last_segment_after_dot(p).to_lowercase())
        .collect();
    if let Some((_, scope)) = EXTENSION_SCOPES
        .iter()
        .find(|(group, _)| extensions.iter().any(|e| group.contains(&e.as_str())))
    {
        return scope;
    }

    if files.modified.len() > files.added.len() {
        "update"
    } else {
        "core"
    }
}

/// Scope implied by a single path, if any fragment in the table appears in it.
pub fn path_scope(path: &str) -> Option<&'static str> {
    let lower = path.to_lowercase();
    PATH_SCOPES
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, scope)| *scope)
}

pub fn category_description(category: FileCategory) -> &'static str {
    match category {
        FileCategory::Test => "test coverage",
        FileCategory::Docs => "documentation",
        FileCategory::Config => "configuration",
        FileCategory::Build => "build system",
        FileCategory::Style => "styling",
        FileCategory::Ui => "user interface",
        FileCategory::Api => "API endpoints",
        FileCategory::Database => "database operations",
        FileCategory::Security => "security measures",
        FileCategory::Utils => "utility functions",
        FileCategory::Code => "code",
    }
}

/// Base name up to the first dot, with `-` and `_` turned into spaces.
///
/// ```
/// use quill::message::scope::readable_file_name;
/// assert_eq!(readable_file_name("src/user-profile_card.test.js"), "user profile card");
/// ```
pub fn readable_file_name(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem = file_name.split('.').next().unwrap_or(file_name);
    stem.replace(['-', '_'], " ").to_lowercase()
}

fn last_segment_after_dot(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
