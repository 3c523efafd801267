use serde::{Deserialize, Serialize};

/// One message in the Gemini wire format: a role plus text parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_with_camel_case_wire_names() {
        let request = GenerateContentRequest {
            contents: vec![Content::text("user", "What changed this year?")],
            system_instruction: Some(Content::text("user", "You are an analyst.")),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert!(json.get("system_instruction").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "What changed this year?");
    }

    #[test]
    fn test_request_omits_absent_system_instruction() {
        let request = GenerateContentRequest {
            contents: vec![Content::text("user", "hi")],
            system_instruction: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_parses_candidate_text() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Assets grew 20%."}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let candidates = response.candidates.unwrap();
        assert_eq!(candidates[0].content.parts[0].text, "Assets grew 20%.");
    }

    #[test]
    fn test_response_tolerates_missing_parts() {
        let raw = r#"{"candidates":[{"content":{"role":"model"}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(response.candidates.unwrap()[0].content.parts.is_empty());
    }
}
