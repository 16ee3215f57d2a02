//! Comment syntax tables, keyed by file extension.

/// Markers recognized by one comment family.
#[derive(Debug, Clone, Copy)]
pub struct CommentSyntax {
    /// Markers that discard the remainder of a line.
    pub line_markers: &'static [&'static str],
    /// Block comment start/end pair, when the family has one.
    pub block: Option<(&'static str, &'static str)>,
    /// String delimiters whose interior is never scanned for markers.
    pub string_delimiters: &'static [&'static str],
}

/// Closed set of comment families. Every supported extension maps to
/// exactly one variant; everything else is passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageRule {
    CStyle,
    Python,
    Html,
    Css,
    Scss,
    Sql,
    Shell,
    Ruby,
    Lua,
    Php,
    Haskell,
    Clojure,
    Erlang,
    /// Component files (vue/svelte/astro): markup with embedded script and
    /// style regions, each stripped by its own family.
    Markup,
}

impl LanguageRule {
    /// Look up the rule for a lowercase extension with leading dot.
    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext {
            ".js" | ".jsx" | ".ts" | ".tsx" | ".java" | ".c" | ".cpp" | ".cc" | ".cxx" | ".h"
            | ".hpp" | ".cs" | ".go" | ".rs" | ".swift" | ".kt" | ".kts" | ".scala" | ".dart"
            | ".m" | ".mm" | ".groovy" | ".gradle" | ".prisma" | ".proto" | ".ml" | ".fs"
            | ".fsx" => Some(Self::CStyle),
            ".py" => Some(Self::Python),
            ".html" | ".htm" | ".xml" | ".wxml" => Some(Self::Html),
            ".css" | ".wxss" => Some(Self::Css),
            ".scss" | ".sass" | ".less" => Some(Self::Scss),
            ".sql" => Some(Self::Sql),
            ".sh" | ".bash" | ".zsh" | ".bat" | ".cmd" | ".ps1" | ".r" | ".pl" | ".pm" | ".ex"
            | ".exs" | ".tf" | ".graphql" | ".gql" => Some(Self::Shell),
            ".rb" => Some(Self::Ruby),
            ".lua" => Some(Self::Lua),
            ".php" => Some(Self::Php),
            ".hs" => Some(Self::Haskell),
            ".clj" | ".cljs" => Some(Self::Clojure),
            ".erl" | ".hrl" => Some(Self::Erlang),
            ".vue" | ".svelte" | ".astro" => Some(Self::Markup),
            _ => None,
        }
    }

    /// The marker set this family recognizes.
    pub fn syntax(self) -> CommentSyntax {
        match self {
            Self::CStyle => CommentSyntax {
                line_markers: &["//"],
                block: Some(("/*", "*/")),
                string_delimiters: &["\"", "'", "`"],
            },
            Self::Python => CommentSyntax {
                line_markers: &["#"],
                block: None,
                string_delimiters: &["\"", "'"],
            },
            Self::Html | Self::Markup => CommentSyntax {
                line_markers: &[],
                block: Some(("<!--", "-->")),
                string_delimiters: &["\"", "'"],
            },
            Self::Css => CommentSyntax {
                line_markers: &[],
                block: Some(("/*", "*/")),
                string_delimiters: &["\"", "'"],
            },
            Self::Scss => CommentSyntax {
                line_markers: &["//"],
                block: Some(("/*", "*/")),
                string_delimiters: &["\"", "'"],
            },
            Self::Sql => CommentSyntax {
                line_markers: &["--"],
                block: Some(("/*", "*/")),
                string_delimiters: &["'"],
            },
            Self::Shell => CommentSyntax {
                line_markers: &["#"],
                block: None,
                string_delimiters: &["\"", "'"],
            },
            Self::Ruby => CommentSyntax {
                line_markers: &["#"],
                block: Some(("=begin", "=end")),
                string_delimiters: &["\"", "'"],
            },
            Self::Lua => CommentSyntax {
                line_markers: &["--"],
                block: Some(("--[[", "]]")),
                string_delimiters: &["\"", "'"],
            },
            Self::Php => CommentSyntax {
                line_markers: &["//", "#"],
                block: Some(("/*", "*/")),
                string_delimiters: &["\"", "'"],
            },
            Self::Haskell => CommentSyntax {
                line_markers: &["--"],
                block: Some(("{-", "-}")),
                string_delimiters: &["\""],
            },
            Self::Clojure => CommentSyntax {
                line_markers: &[";"],
                block: None,
                string_delimiters: &["\""],
            },
            Self::Erlang => CommentSyntax {
                line_markers: &["%"],
                block: None,
                string_delimiters: &["\""],
            },
        }
    }
}
