// src/render.rs
// =============================================================================
// Turns session state into text for the terminal.
//
// Nothing here changes state; it only reads a SessionState snapshot.
// =============================================================================

use crate::catalog::{self, LANGUAGES};
use crate::github::RepositoryRecord;
use crate::session::{SessionState, Status};

pub fn render_state(state: &SessionState) -> String {
    match &state.status {
        Status::Idle => "Please select a language".to_string(),
        Status::Loading => {
            let name = state
                .selected_language
                .as_ref()
                .map(|code| catalog::display_name(code.as_str()))
                .unwrap_or("?");
            format!("⏳ Loading {} repositories, please wait..", name)
        }
        Status::Success(repo) => render_repo(repo),
        Status::Empty => "⚠️  No repositories found for this language.".to_string(),
        Status::Error(err) => format!(
            "❌ Error fetching repositories: {}\n   Type 'r' to retry",
            err
        ),
    }
}

// Prints one repository as a small card
//
// Example:
//   📦 alpha
//      A fast thing
//      Go  ⭐ 500  🍴 50  🐛 5
//      https://github.com/acme/alpha
pub fn render_repo(repo: &RepositoryRecord) -> String {
    let mut out = format!("📦 {}\n", repo.name);

    if let Some(description) = &repo.description {
        out.push_str(&format!("   {}\n", description));
    }

    out.push_str(&format!(
        "   {}  ⭐ {}  🍴 {}  🐛 {}",
        repo.language.as_deref().unwrap_or("-"),
        repo.stars,
        repo.forks,
        repo.open_issues
    ));

    if let Some(url) = &repo.html_url {
        out.push_str(&format!("\n   {}", url));
    }

    out
}

pub fn render_languages() -> String {
    let mut out = format!("{:<12} {}\n", "LANGUAGE", "CODE");
    out.push_str(&"=".repeat(24));
    for lang in LANGUAGES {
        out.push_str(&format!("\n{:<12} {}", lang.name, lang.code));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{LanguageCode, SearchError};

    fn state_with(status: Status) -> SessionState {
        SessionState {
            selected_language: LanguageCode::new("csharp"),
            status,
            ..SessionState::new()
        }
    }

    #[test]
    fn test_idle_prompts_for_language() {
        assert_eq!(render_state(&SessionState::new()), "Please select a language");
    }

    #[test]
    fn test_loading_uses_display_name() {
        assert!(render_state(&state_with(Status::Loading)).contains("C#"));
    }

    #[test]
    fn test_error_mentions_status_and_retry() {
        let text = render_state(&state_with(Status::Error(SearchError::Http(503))));
        assert!(text.contains("503"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn test_empty_message() {
        let text = render_state(&state_with(Status::Empty));
        assert!(text.contains("No repositories found"));
    }

    #[test]
    fn test_repo_card() {
        let repo = RepositoryRecord {
            name: "alpha".to_string(),
            description: None,
            language: None,
            stars: 500,
            forks: 50,
            open_issues: 5,
            html_url: Some("https://github.com/acme/alpha".to_string()),
        };

        let text = render_state(&state_with(Status::Success(repo)));
        assert!(text.starts_with("📦 alpha\n"));
        assert!(text.contains("⭐ 500"));
        assert!(text.contains("🍴 50"));
        assert!(text.contains("🐛 5"));
        assert!(text.ends_with("https://github.com/acme/alpha"));
    }

    #[test]
    fn test_languages_table_lists_catalog() {
        let text = render_languages();
        for lang in LANGUAGES {
            assert!(text.contains(lang.code));
        }
    }
}
