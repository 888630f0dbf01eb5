use serde::{Deserialize, Serialize};

/// A professor as returned by the review directory search.
///
/// Immutable once fetched; `_id` is an opaque identifier owned by the
/// directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A single free-text student review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment: String,
}

/// Envelope used by every directory endpoint: `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// Cache key for summary generation. At most one external call is ever
/// issued per distinct key; identical keys reuse the prior outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryRequestKey {
    pub professor_id: String,
    pub credential: String,
    pub extra_arguments: String,
}

// Gemini generateContent wire format (v1beta REST).

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// Build a single-turn request with every harm-category filter at its
    /// most permissive level. Student reviews trip the default filters
    /// routinely; this mirrors the deployed configuration.
    pub fn single_turn(prompt: String) -> Self {
        let categories = [
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_HARASSMENT",
        ];
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            safety_settings: categories
                .into_iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: "BLOCK_NONE".to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateCandidate {
    pub content: GeminiContent,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GenerateCandidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if the model returned one.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
    }
}
