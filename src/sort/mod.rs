//! Heuristic file ordering.
//!
//! Guarantees the excerpt opens with program entry logic and closes with
//! data files and tests. Classification uses path/name/extension metadata
//! only, never content, and yields a total, stable, idempotent order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::SourceFile;
use crate::utils::paths::{normalize_path, path_depth};

/// Exact entry-point file names, in priority order. List position is the
/// tiebreak among them.
const ENTRY_EXACT_NAMES: &[&str] = &[
    "main.rs", "main.go", "main.py", "main.c", "main.cpp", "main.java",
    "Main.java", "Main.kt", "App.java", "Application.java",
    "main.js", "main.ts", "main.jsx", "main.tsx",
    "index.js", "index.ts", "index.jsx", "index.tsx",
    "index.html", "index.htm",
    "App.vue", "App.jsx", "App.tsx", "App.js", "App.ts",
    "app.py", "app.js", "app.ts",
    "manage.py", "wsgi.py", "asgi.py",
    "server.js", "server.ts", "server.go",
    "Program.cs", "Startup.cs",
    "lib.rs", "mod.rs",
];

/// Entry-point basenames for the fuzzy match (extension stripped,
/// case-insensitive).
const ENTRY_FUZZY_NAMES: &[&str] = &[
    "main", "index", "app", "application", "program", "server", "bootstrap", "startup", "init",
    "entry",
];

/// Data/config extensions are not source code and sort near the end even
/// when their names would match an earlier band.
const DATA_FILE_EXTS: &[&str] = &[
    ".json", ".yaml", ".yml", ".toml", ".ini", ".cfg", ".conf", ".xml", ".svg", ".csv", ".md",
    ".txt", ".log", ".lock", ".env",
];

static BUILD_CONFIG_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(vite|webpack|rollup|tsconfig|babel|next|nuxt|tailwind|postcss|jest|vitest)\.config",
        r"(?i)config\.(js|ts)$",
        r"(?i)settings\.(py|js|ts)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("config pattern"))
    .collect()
});

static STYLESHEET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(css|scss|sass|less|styl)$").expect("stylesheet pattern"));

static TEST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\.test\.(js|ts|jsx|tsx|py)$",
        r"(?i)\.spec\.(js|ts|jsx|tsx)$",
        r"(?i)test_.*\.py$",
        r"(?i).*_test\.py$",
        r"(?i).*_test\.go$",
        r"(?i).*Test\.java$",
        r"(?i)^tests?/",
        r"(?i)^__tests__/",
        r"(?i)^spec/",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("test pattern"))
    .collect()
});

/// Ordered sort bands, earliest first. Pure configuration data: the
/// classification below never mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortBand {
    EntryExact,
    EntryFuzzy,
    BuildConfig,
    Router,
    Layout,
    Component,
    Service,
    Utility,
    Stylesheet,
    DataFile,
    Test,
    Other,
}

/// Classify a file into its sort band. Predicates run in fixed priority:
/// the data-extension check first, so a `routes.json` can never claim the
/// router band, then entry matches, then the path-segment bands.
pub fn classify(relative_path: &str, file_name: &str, ext: &str) -> SortBand {
    let path = normalize_path(relative_path);
    let path_lower = path.to_ascii_lowercase();
    let name_lower = file_name.to_ascii_lowercase();

    if DATA_FILE_EXTS.contains(&ext) {
        return SortBand::DataFile;
    }
    if ENTRY_EXACT_NAMES.contains(&file_name) {
        return SortBand::EntryExact;
    }
    let basename = match name_lower.rfind('.') {
        Some(idx) if idx > 0 => &name_lower[..idx],
        _ => name_lower.as_str(),
    };
    if ENTRY_FUZZY_NAMES.contains(&basename) {
        return SortBand::EntryFuzzy;
    }
    if BUILD_CONFIG_PATTERNS.iter().any(|p| p.is_match(file_name)) {
        return SortBand::BuildConfig;
    }
    if ["router", "routes", "routing"].iter().any(|kw| name_lower.contains(kw)) {
        return SortBand::Router;
    }
    if ["layout", "page", "view"].iter().any(|kw| path_lower.contains(kw)) {
        return SortBand::Layout;
    }
    if ["component", "widget", "module"].iter().any(|kw| path_lower.contains(kw)) {
        return SortBand::Component;
    }
    if ["service", "api", "repository", "dao", "mapper"].iter().any(|kw| path_lower.contains(kw)) {
        return SortBand::Service;
    }
    if ["util", "helper", "lib", "common", "shared", "constant", "enum", "type"]
        .iter()
        .any(|kw| path_lower.contains(kw))
    {
        return SortBand::Utility;
    }
    if STYLESHEET_PATTERN.is_match(file_name) {
        return SortBand::Stylesheet;
    }
    if TEST_PATTERNS.iter().any(|p| p.is_match(file_name) || p.is_match(&path)) {
        return SortBand::Test;
    }
    SortBand::Other
}

/// Numeric sort weight: smaller sorts earlier. Band bases leave room for
/// the depth and entry-list tiebreaks without bands colliding.
pub fn sort_weight(relative_path: &str, file_name: &str, ext: &str) -> u64 {
    let depth = path_depth(relative_path) as u64;
    match classify(relative_path, file_name, ext) {
        SortBand::EntryExact => {
            let idx = ENTRY_EXACT_NAMES.iter().position(|n| *n == file_name).unwrap_or(0) as u64;
            idx * 10 + depth
        }
        SortBand::EntryFuzzy => 100_000 + depth * 10_000,
        SortBand::BuildConfig => 200_000,
        SortBand::Router => 300_000,
        SortBand::Layout => 400_000 + depth * 5_000,
        SortBand::Component => 500_000 + depth * 5_000,
        SortBand::Service => 600_000 + depth * 5_000,
        SortBand::Utility => 700_000 + depth * 5_000,
        SortBand::Stylesheet => 800_000,
        SortBand::DataFile => 850_000 + depth * 5_000,
        SortBand::Test => 900_000 + depth * 5_000,
        SortBand::Other => 500_000 + depth * 5_000,
    }
}

/// Sort any collection whose items expose (relative_path, name, ext).
/// Equal weights fall back to lexical comparison of the normalized path,
/// so the order is total and sorting twice changes nothing.
pub fn sort_by_weight<T, F>(items: &mut [T], meta: F)
where
    F: Fn(&T) -> (&str, &str, &str),
{
    items.sort_by(|a, b| {
        let (pa, na, ea) = meta(a);
        let (pb, nb, eb) = meta(b);
        sort_weight(pa, na, ea)
            .cmp(&sort_weight(pb, nb, eb))
            .then_with(|| normalize_path(pa).cmp(&normalize_path(pb)))
    });
}

/// Order source files so entry points lead and tests trail.
pub fn sort_files(files: &mut [SourceFile]) {
    sort_by_weight(files, |f| (f.relative_path.as_str(), f.name.as_str(), f.ext.as_str()));
}
