use serde::{Deserialize, Serialize};

/// The witty two-line read of the ledger produced by the insight service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub message: String,
    pub advice: String,
}

pub mod generate {
    //! Wire types for the `models/{model}:generateContent` endpoint.
    //!
    //! Only the fields Hisab sends or reads are modelled; unknown response
    //! fields are ignored.
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerateContentRequest {
        pub contents: Vec<Content>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub generation_config: Option<GenerationConfig>,
    }

    impl GenerateContentRequest {
        /// A single-turn text prompt.
        pub fn from_prompt(prompt: impl Into<String>) -> Self {
            Self {
                contents: vec![Content {
                    role: Some("user".to_string()),
                    parts: vec![Part {
                        text: Some(prompt.into()),
                    }],
                }],
                generation_config: None,
            }
        }

        pub fn with_config(mut self, config: GenerationConfig) -> Self {
            self.generation_config = Some(config);
            self
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Content {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub role: Option<String>,
        #[serde(default)]
        pub parts: Vec<Part>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Part {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub text: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerationConfig {
        pub response_mime_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub response_schema: Option<Schema>,
    }

    impl GenerationConfig {
        /// Ask for a JSON object matching `schema`.
        pub fn json(schema: Schema) -> Self {
            Self {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(schema),
            }
        }
    }

    /// Subset of the OpenAPI schema object accepted by the endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Schema {
        #[serde(rename = "type")]
        pub kind: SchemaType,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        pub properties: BTreeMap<String, Schema>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub required: Vec<String>,
    }

    impl Schema {
        pub fn string() -> Self {
            Self {
                kind: SchemaType::String,
                properties: BTreeMap::new(),
                required: Vec::new(),
            }
        }

        /// An object whose listed fields are all required strings.
        pub fn object_of_strings(fields: &[&str]) -> Self {
            Self {
                kind: SchemaType::Object,
                properties: fields
                    .iter()
                    .map(|name| (name.to_string(), Schema::string()))
                    .collect(),
                required: fields.iter().map(|name| name.to_string()).collect(),
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum SchemaType {
        Object,
        String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
    }

    impl GenerateContentResponse {
        /// Text of the first part of the first candidate, if any.
        pub fn first_text(&self) -> Option<&str> {
            self.candidates
                .first()
                .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_deref()))
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Candidate {
        #[serde(default)]
        pub content: Content,
    }
}

#[cfg(test)]
mod tests {
    use super::generate::*;

    #[test]
    fn request_uses_the_endpoint_field_names() {
        let request = GenerateContentRequest::from_prompt("hello").with_config(
            GenerationConfig::json(Schema::object_of_strings(&["message", "advice"])),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["contents"][0]["role"], "user");
        let config = &json["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["properties"]["advice"]["type"],
            "STRING"
        );
        assert_eq!(
            config["responseSchema"]["required"],
            serde_json::json!(["message", "advice"])
        );
    }

    #[test]
    fn response_exposes_first_text_and_ignores_extra_fields() {
        let raw = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"message\":\"m\"}"}]},
                 "finishReason": "STOP"}
            ],
            "usageMetadata": {"promptTokenCount": 12}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text(), Some(r#"{"message":"m"}"#));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_text(), None);
    }
}
