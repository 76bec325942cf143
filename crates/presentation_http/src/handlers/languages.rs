//! Static catalog endpoints used by the overlay client

use axum::Json;
use domain::Language;
use serde::Serialize;

/// Example questions shown to new players
pub const SUGGESTIONS: [&str; 4] = [
    "What's the best second item for me here?",
    "What should we do after taking mid inhib?",
    "Should I freeze or push the wave right now?",
    "Who should I focus in teamfights?",
];

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub iso_code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
    pub default: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<&'static str>,
}

/// List the languages the coach can answer in
pub async fn list_languages() -> Json<LanguagesResponse> {
    let languages: Vec<LanguageInfo> = Language::all()
        .iter()
        .map(|lang| LanguageInfo {
            code: lang.code(),
            name: lang.display_name(),
            iso_code: lang.iso_code(),
        })
        .collect();

    Json(LanguagesResponse {
        count: languages.len(),
        languages,
        default: Language::default().code(),
    })
}

/// Example questions
pub async fn list_suggestions() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: SUGGESTIONS.to_vec(),
    })
}
