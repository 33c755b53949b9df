//! Client for the generative model behind syllabus extraction.
//!
//! Talks to the Google Generative Language REST API. The extraction
//! flow sends one fixed prompt wrapped around the raw syllabus text
//! and expects the model to answer with a single flat JSON object.

use regex::Regex;
use serde_json::Value;

/// Public REST endpoint of the generative language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for syllabus extraction unless configured otherwise.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Fixed preamble of the extraction prompt. The JSON skeleton doubles
/// as the response schema; the rules pin down how loose syllabus text
/// maps onto it.
const PROMPT_PREAMBLE: &str = r#"Extract the following syllabus data. Respond with ONLY a valid JSON object (no markdown, no explanation):

{
  "title": "",
  "subject": "",
  "objectives": "",
  "courseDescription": "",
  "prerequisites": "",
  "unit1Name": "", "unit1Hours": "", "unit1Content": "",
  "unit2Name": "", "unit2Hours": "", "unit2Content": "",
  "unit3Name": "", "unit3Hours": "", "unit3Content": "",
  "unit4Name": "", "unit4Hours": "", "unit4Content": "",
  "unit5Name": "", "unit5Hours": "", "unit5Content": "",
  "theoryPeriods": "", "practicalExercises": "", "practicalPeriods": "", "totalPeriods": "",
  "courseFormat": "", "assessments": "",
  "courseOutcomes": "",
  "textBooks": "", "references": "",
  "ytResources": "", "webResources": "", "listOfSoftwares": "", "eBook": "",
  "L": "", "T": "", "P": "", "C": ""
}
rules:
1) for practical exercises, map the content under them until the next section header arrives.
2) the content may not be structured; while passing as JSON make it structured, for example when it has multiple points.
3) in the subject field pass the course code.
4) separate content in course objectives, course outcomes, text books, references, web resources, list of softwares, e-book onto separate lines; each new point starts on a new line. Remove any numbering like "1.", "2)", "-", "*", "CO1:", "CO2:", etc.
5) if the content is not present in the syllabus, pass it as an empty string. Never pass null or undefined.
6) practical exercises and coding exercises are not the same; do not treat them as the same.
7) structure every field properly if it is unstructured, except for unit contents.
8) do not map coding exercises to practical exercises.
9) for unit contents take everything under them until the next header, including coding exercises or assignments; map all of it as that unit's content.
10) if total periods is not present, pass theory periods + practical periods.
11) in course outcomes, if CO[x] appears, map its text to that outcome until the next CO[x] or section header.
TEXT:
"#;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("model response carried no candidate text")]
    EmptyResponse,
    #[error("failed to extract a JSON object from model output")]
    NoJsonObject,
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Thin client around the `generateContent` endpoint.
pub struct ModelClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ModelClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    /// Send a prompt and concatenate the first candidate's text parts.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Requesting model completion");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        let text = candidate_text(&payload).ok_or(ModelError::EmptyResponse)?;
        Ok(text)
    }
}

/// Build the extraction prompt around the raw syllabus text.
pub fn syllabus_prompt(raw_text: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_PREAMBLE.len() + raw_text.len() + 1);
    prompt.push_str(PROMPT_PREAMBLE);
    prompt.push_str(raw_text);
    prompt.push('\n');
    prompt
}

/// Locate and parse the first JSON object in raw model output.
///
/// The match is lazy from the first opening brace: the expected object
/// is flat, so the first closing brace ends it. Tolerates code fences
/// and prose around the object.
pub fn extract_json_object(raw: &str) -> Result<Value, ModelError> {
    let first_object = Regex::new(r"(?s)\{.*?\}").expect("valid literal regex");
    let found = first_object.find(raw).ok_or(ModelError::NoJsonObject)?;
    Ok(serde_json::from_str(found.as_str())?)
}

// ---- private helpers ----

fn candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .pointer("/candidates/0/content/parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// ---------------------------------------------------------------------------
