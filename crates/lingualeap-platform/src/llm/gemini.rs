//! Gemini (Generative Language API) adapter.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility.
//! - `generate_json` calls `:generateContent` with a response schema
//! - `stream_reply` calls `:streamGenerateContent?alt=sse` and reads the
//!   response body incrementally through a `ReadableStream` reader

use std::collections::VecDeque;
use std::pin::Pin;
use async_trait::async_trait;
use futures::stream::{self, Stream};
use gloo_net::http::Request;
use js_sys::{Reflect, Uint8Array};
use serde::Deserialize;
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::ReadableStreamDefaultReader;

use lingualeap_core::ports::*;
use lingualeap_types::{
    LingoError, Result,
    config::LlmConfig,
    message::{DialogueLine, Sender},
};
use crate::sse::SseDecoder;

pub struct GeminiProvider {
    config: LlmConfig,
}

impl GeminiProvider {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/v1beta/models/{}:{}",
            self.config.base_url().trim_end_matches('/'),
            self.config.model,
            method
        )
    }

    fn ensure_api_key(&self) -> Result<()> {
        if self.config.api_key.trim().is_empty() {
            return Err(LingoError::Config("Gemini API key is not set".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl GenerativePort for GeminiProvider {
    async fn generate_json(&self, req: JsonRequest) -> Result<String> {
        self.ensure_api_key()?;
        let url = self.endpoint("generateContent");
        let body = build_json_body(&req, self.config.temperature);
        log::debug!("Gemini generateContent: model={}", self.config.model);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .map_err(|e| LingoError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| LingoError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LingoError::Llm(format!(
                "HTTP {}: {}",
                status,
                api_error_message(&text)
            )));
        }

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LingoError::Llm(e.to_string()))?;

        let text = data.text();
        if text.is_empty() {
            return Err(LingoError::Llm(match data.block_reason() {
                Some(reason) => format!("Prompt blocked: {}", reason),
                None => "Empty response".to_string(),
            }));
        }
        Ok(text)
    }

    fn stream_reply(
        &self,
        session: &SessionContext,
        user_text: &str,
    ) -> Pin<Box<dyn Stream<Item = ReplyEvent>>> {
        if let Err(e) = self.ensure_api_key() {
            return Box::pin(stream::once(async move { ReplyEvent::Error(e.to_string()) }));
        }

        let state = StreamState::Connect {
            url: format!("{}?alt=sse", self.endpoint("streamGenerateContent")),
            api_key: self.config.api_key.clone(),
            body: build_chat_body(session, user_text, self.config.temperature),
        };
        Box::pin(stream::unfold(state, next_event))
    }
}

// ─── Streaming ───────────────────────────────────────────────

enum StreamState {
    Connect {
        url: String,
        api_key: String,
        body: Value,
    },
    Reading {
        reader: ReadableStreamDefaultReader,
        decoder: SseDecoder,
        pending: VecDeque<ReplyEvent>,
    },
    Finished,
}

/// Produce the next event, reading more of the body only when nothing is
/// pending. Terminal events (`Done`, `Error`) move the state to `Finished`.
async fn next_event(mut state: StreamState) -> Option<(ReplyEvent, StreamState)> {
    loop {
        state = match state {
            StreamState::Finished => return None,
            StreamState::Connect { url, api_key, body } => {
                match open_stream(&url, &api_key, &body).await {
                    Ok(reader) => StreamState::Reading {
                        reader,
                        decoder: SseDecoder::new(),
                        pending: VecDeque::new(),
                    },
                    Err(e) => return Some((ReplyEvent::Error(e.to_string()), StreamState::Finished)),
                }
            }
            StreamState::Reading {
                reader,
                mut decoder,
                mut pending,
            } => {
                if let Some(event) = pending.pop_front() {
                    let next = match event {
                        ReplyEvent::Done | ReplyEvent::Error(_) => StreamState::Finished,
                        ReplyEvent::Delta(_) => StreamState::Reading {
                            reader,
                            decoder,
                            pending,
                        },
                    };
                    return Some((event, next));
                }

                match read_chunk(&reader).await {
                    Ok(Some(bytes)) => {
                        pending.extend(decoder.push(&bytes).iter().filter_map(|p| payload_event(p)));
                    }
                    Ok(None) => {
                        pending.extend(decoder.finish().iter().filter_map(|p| payload_event(p)));
                        pending.push_back(ReplyEvent::Done);
                    }
                    Err(e) => return Some((ReplyEvent::Error(e.to_string()), StreamState::Finished)),
                }
                StreamState::Reading {
                    reader,
                    decoder,
                    pending,
                }
            }
        };
    }
}

async fn open_stream(url: &str, api_key: &str, body: &Value) -> Result<ReadableStreamDefaultReader> {
    log::debug!("Opening reply stream: {}", url);
    let response = Request::post(url)
        .header("Content-Type", "application/json")
        .header("x-goog-api-key", api_key)
        .json(body)
        .map_err(|e| LingoError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| LingoError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(LingoError::Llm(format!(
            "HTTP {}: {}",
            status,
            api_error_message(&text)
        )));
    }

    let body = response
        .body()
        .ok_or_else(|| LingoError::Llm("Response has no body".to_string()))?;
    Ok(body.get_reader().unchecked_into::<ReadableStreamDefaultReader>())
}

/// Read the next chunk of the body; `None` once the stream is exhausted.
async fn read_chunk(reader: &ReadableStreamDefaultReader) -> Result<Option<Vec<u8>>> {
    let result = JsFuture::from(reader.read()).await.map_err(js_error)?;
    let done = Reflect::get(&result, &JsValue::from_str("done"))
        .map_err(js_error)?
        .as_bool()
        .unwrap_or(true);
    if done {
        return Ok(None);
    }
    let value = Reflect::get(&result, &JsValue::from_str("value")).map_err(js_error)?;
    Ok(Some(Uint8Array::new(&value).to_vec()))
}

fn js_error(e: JsValue) -> LingoError {
    LingoError::JsInterop(format!("{:?}", e))
}

/// Map one SSE data payload to a reply event. Payloads carrying no text
/// (e.g. a final chunk with only a finish reason) yield nothing.
pub(crate) fn payload_event(payload: &str) -> Option<ReplyEvent> {
    if let Ok(err) = serde_json::from_str::<ApiErrorEnvelope>(payload) {
        return Some(ReplyEvent::Error(err.error.message));
    }
    match serde_json::from_str::<GenerateContentResponse>(payload) {
        Ok(chunk) => {
            let text = chunk.text();
            if text.is_empty() {
                None
            } else {
                Some(ReplyEvent::Delta(text))
            }
        }
        Err(e) => Some(ReplyEvent::Error(format!("Malformed stream chunk: {}", e))),
    }
}

// ─── Request bodies ──────────────────────────────────────────

pub(crate) fn build_json_body(req: &JsonRequest, temperature: Option<f32>) -> Value {
    let mut generation_config = json!({
        "responseMimeType": "application/json",
        "responseSchema": req.response_schema,
    });
    if let Some(t) = temperature {
        generation_config["temperature"] = json!(t);
    }

    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": req.prompt }],
        }],
        "generationConfig": generation_config,
    })
}

pub(crate) fn build_chat_body(
    session: &SessionContext,
    user_text: &str,
    temperature: Option<f32>,
) -> Value {
    let mut contents: Vec<Value> = session.history().iter().map(line_to_content).collect();
    contents.push(json!({
        "role": "user",
        "parts": [{ "text": user_text }],
    }));

    let mut body = json!({
        "systemInstruction": {
            "parts": [{ "text": session.system_instruction() }],
        },
        "contents": contents,
    });
    if let Some(t) = temperature {
        body["generationConfig"] = json!({ "temperature": t });
    }
    body
}

fn line_to_content(line: &DialogueLine) -> Value {
    let role = match line.sender {
        Sender::User => "user",
        Sender::Assistant => "model",
    };
    json!({
        "role": role,
        "parts": [{ "text": line.text }],
    })
}

pub(crate) fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<ApiPromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts
    pub(crate) fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[derive(Deserialize)]
struct ApiCandidate {
    #[serde(default)]
    content: Option<ApiContent>,
}

#[derive(Deserialize)]
struct ApiContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Deserialize)]
struct ApiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiPromptFeedback {
    #[serde(rename = "blockReason", default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}
