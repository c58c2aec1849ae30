//! Actions
//!
//! The prefix names the category (`SearchSubmit`, `SearchDidLoad` are both
//! `search`); `Did` marks an async completion coming back from a task.

use crate::state::WeatherResult;

#[derive(skycast_macros::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search =====
    /// The search bar text changed
    SearchInputChange(String),

    /// Submit the current query
    SearchSubmit,

    /// Lookup succeeded; `hour` is the local hour when it completed
    SearchDidLoad {
        generation: u64,
        weather: WeatherResult,
        hour: u32,
    },

    /// Lookup failed with a user-facing message
    SearchDidError { generation: u64, message: String },

    // ===== Error screen =====
    /// "Try again" was activated
    #[action(category = "error")]
    ErrorRetry,

    // ===== UI =====
    UiResize(u16, u16),

    // ===== Global =====
    /// Move focus between the search bar and the "Try again" button
    FocusToggle,

    /// Animation frame
    Tick,

    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Action as _;

    #[test]
    fn test_names_and_categories() {
        assert_eq!(Action::SearchSubmit.name(), "SearchSubmit");
        assert_eq!(Action::SearchSubmit.category(), Some("search"));
        assert_eq!(
            Action::SearchDidError {
                generation: 1,
                message: String::new()
            }
            .category(),
            Some("search")
        );
        assert_eq!(Action::UiResize(80, 24).category(), Some("ui"));
        assert_eq!(Action::ErrorRetry.category(), Some("error"));
        assert_eq!(Action::Tick.category(), None);
    }
}
