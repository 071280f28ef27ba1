// src/catalog.rs
// =============================================================================
// The fixed list of languages a user can pick from.
//
// The session core never looks at this list: it only needs a non-empty
// language code. The catalog exists for the CLI, which lists the choices and
// turns what the user typed ("C#", "go", "Kotlin") into a code.
//
// Rust concepts:
// - const slices: Static data baked into the binary, no allocation
// - Iterators: .iter().find() for lookups
// =============================================================================

/// One selectable language: what we show, and what we send to the search API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Display name, e.g. "C++"
    pub name: &'static str,
    /// Language code used in the search query, e.g. "c++"
    pub code: &'static str,
}

/// Every language the CLI offers, in display order
pub const LANGUAGES: &[Language] = &[
    Language { name: "JavaScript", code: "javascript" },
    Language { name: "Python", code: "python" },
    Language { name: "Java", code: "java" },
    Language { name: "C++", code: "c++" },
    Language { name: "C#", code: "csharp" },
    Language { name: "Ruby", code: "ruby" },
    Language { name: "PHP", code: "php" },
    Language { name: "Go", code: "go" },
    Language { name: "Swift", code: "swift" },
    Language { name: "Kotlin", code: "kotlin" },
];

// Resolves user input against the catalog
//
// Matches either the code or the display name, ignoring case and
// surrounding whitespace.
//
// Example:
//   resolve("C#")     -> Some(Language { name: "C#", code: "csharp" })
//   resolve(" go ")   -> Some(Language { name: "Go", code: "go" })
//   resolve("cobol")  -> None
pub fn resolve(input: &str) -> Option<&'static Language> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    LANGUAGES.iter().find(|lang| {
        lang.code.eq_ignore_ascii_case(input) || lang.name.eq_ignore_ascii_case(input)
    })
}

/// Display name for a code, falling back to the code itself
pub fn display_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|lang| lang.code == code)
        .map(|lang| lang.name)
        .unwrap_or(code)
}
