//! The fixed scenario catalog
//!
//! One ordered table per emulated endpoint. Lookup walks the table in order
//! and the first exact key match wins; anything else selects the endpoint's
//! "no scenario" response. Tables are built once and never mutated.

use std::fmt;

use axum::http::Method;
use once_cell::sync::Lazy;
use serde::Serialize;

use super::behavior::{Behavior, UploadRule};
use crate::providers::{self, anthropic, openai, ProviderFamily};

/// Upload size above which `LARGE_FILE_UPLOAD` is rejected (100 MiB)
pub const LARGE_FILE_LIMIT: u64 = 100 * 1024 * 1024;

/// An emulated provider operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    ChatCompletions,
    GeminiGenerateContent,
    GeminiStreamGenerateContent,
    Messages,
    ListModels,
    FileUpload,
    GeminiFileUpload,
    GeminiCountTokens,
    AnthropicCountTokens,
}

impl Endpoint {
    /// Every endpoint, in catalog order
    pub const ALL: [Endpoint; 9] = [
        Endpoint::ChatCompletions,
        Endpoint::GeminiGenerateContent,
        Endpoint::GeminiStreamGenerateContent,
        Endpoint::Messages,
        Endpoint::ListModels,
        Endpoint::FileUpload,
        Endpoint::GeminiFileUpload,
        Endpoint::GeminiCountTokens,
        Endpoint::AnthropicCountTokens,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn family(self) -> ProviderFamily {
        match self {
            Self::ChatCompletions | Self::ListModels | Self::FileUpload => ProviderFamily::OpenAI,
            Self::GeminiGenerateContent
            | Self::GeminiStreamGenerateContent
            | Self::GeminiFileUpload
            | Self::GeminiCountTokens => ProviderFamily::Gemini,
            Self::Messages | Self::AnthropicCountTokens => ProviderFamily::Anthropic,
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::ListModels => Method::GET,
            _ => Method::POST,
        }
    }

    /// Paths as a client writes them; `{model}` is any model id
    pub fn paths(self) -> &'static [&'static str] {
        match self {
            Self::ChatCompletions => &["/v1/chat/completions", "/chat/completions"],
            Self::GeminiGenerateContent => &[
                "/v1/models/{model}:generateContent",
                "/models/{model}:generateContent",
            ],
            Self::GeminiStreamGenerateContent => &[
                "/v1/models/{model}:streamGenerateContent",
                "/models/{model}:streamGenerateContent",
            ],
            Self::Messages => &["/v1/messages", "/messages"],
            Self::ListModels => &["/v1/models", "/models"],
            Self::FileUpload => &["/v1/files", "/files"],
            Self::GeminiFileUpload => &["/v1/files:upload"],
            Self::GeminiCountTokens => &[
                "/v1/models/{model}:countTokens",
                "/models/{model}:countTokens",
            ],
            Self::AnthropicCountTokens => &["/v1/messages/count_tokens", "/messages/count_tokens"],
        }
    }

    /// Name used in the "no scenario" body
    pub fn label(self) -> &'static str {
        match self {
            Self::ChatCompletions => "chat completions",
            Self::GeminiGenerateContent => "Gemini completions",
            Self::GeminiStreamGenerateContent => "Gemini streaming completions",
            Self::Messages => "Anthropic completions",
            Self::ListModels => "models",
            Self::FileUpload => "files",
            Self::GeminiFileUpload => "files:upload",
            Self::GeminiCountTokens => "countTokens",
            Self::AnthropicCountTokens => "Anthropic count_tokens",
        }
    }

    /// Ordered scenario entries for this endpoint
    fn entries(self) -> Vec<ScenarioEntry> {
        let auth = |family: ProviderFamily, key: &'static str| {
            ScenarioEntry::new(key, Behavior::Static(family.auth_failure()), "401 with the provider's auth error envelope")
        };
        let zero_byte = ScenarioEntry::new(
            "ZERO_BYTE_FILE",
            Behavior::Upload(UploadRule::RejectEmpty {
                accepted: openai::SMALL_FILE_RECEIPT,
            }),
            "400 when the upload is empty, otherwise 200 echoing the byte count",
        );
        let large_file = ScenarioEntry::new(
            "LARGE_FILE_UPLOAD",
            Behavior::Upload(UploadRule::RejectAbove {
                limit: LARGE_FILE_LIMIT,
                accepted: openai::LARGE_FILE_RECEIPT,
            }),
            "413 when the upload exceeds 100 MiB, otherwise 200 echoing the byte count",
        );

        match self {
            Self::ChatCompletions => vec![
                ScenarioEntry::new(
                    "NON_JSON_ERROR",
                    Behavior::Static(openai::html_server_error()),
                    "500 with an HTML body",
                ),
                ScenarioEntry::new(
                    "ABRUPT_STREAM",
                    Behavior::Stream(openai::abrupt_stream()),
                    "one valid chunk, then a truncated chunk and no [DONE]",
                ),
                ScenarioEntry::new(
                    "RATE_LIMIT_COMPLETION",
                    Behavior::Static(openai::rate_limit()),
                    "429 with a rate limit envelope",
                ),
                auth(ProviderFamily::OpenAI, "AUTH_FAILURE_OPENAI"),
            ],
            Self::GeminiGenerateContent
            | Self::GeminiStreamGenerateContent
            | Self::GeminiCountTokens => vec![auth(ProviderFamily::Gemini, "AUTH_FAILURE_GEMINI")],
            Self::Messages => vec![
                auth(ProviderFamily::Anthropic, "AUTH_FAILURE_ANTHROPIC"),
                ScenarioEntry::new(
                    "STREAM_ERROR_ANTHROPIC",
                    Behavior::Stream(anthropic::mid_stream_error()),
                    "partial content, then an error event and no message_stop",
                ),
                ScenarioEntry::new(
                    "STREAM_PING_ANTHROPIC",
                    Behavior::Stream(anthropic::ping_stream()),
                    "complete stream with a ping between the text deltas",
                ),
            ],
            Self::ListModels => vec![
                ScenarioEntry::new(
                    "EMPTY_LIST",
                    Behavior::Static(openai::empty_model_list()),
                    "200 with an empty model list",
                ),
                ScenarioEntry::new(
                    "RATE_LIMIT_LIST_MODELS",
                    Behavior::Static(openai::rate_limit()),
                    "429 with a rate limit envelope",
                ),
                auth(ProviderFamily::OpenAI, "AUTH_FAILURE_OPENAI"),
                auth(ProviderFamily::OpenAI, "AUTH_FAILURE_GEMINI"),
                auth(ProviderFamily::Anthropic, "AUTH_FAILURE_ANTHROPIC"),
            ],
            Self::FileUpload => vec![
                zero_byte,
                large_file,
                auth(ProviderFamily::OpenAI, "AUTH_FAILURE_OPENAI"),
            ],
            Self::GeminiFileUpload => vec![
                zero_byte,
                large_file,
                auth(ProviderFamily::Gemini, "AUTH_FAILURE_GEMINI"),
            ],
            Self::AnthropicCountTokens => vec![auth(ProviderFamily::Anthropic, "AUTH_FAILURE_ANTHROPIC")],
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.paths()[0])
    }
}

/// A (key, behavior) pair in an endpoint table
#[derive(Debug, Clone)]
pub struct ScenarioEntry {
    pub key: &'static str,
    pub behavior: Behavior,
    pub summary: &'static str,
}

impl ScenarioEntry {
    fn new(key: &'static str, behavior: Behavior, summary: &'static str) -> Self {
        Self {
            key,
            behavior,
            summary,
        }
    }
}

/// The outcome of a lookup
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    /// Matched scenario, `None` for the fallback
    pub scenario: Option<&'static str>,
    pub behavior: &'a Behavior,
}

impl Selection<'_> {
    pub fn is_miss(&self) -> bool {
        self.scenario.is_none()
    }
}

/// One endpoint's ordered scenarios plus its fallback
#[derive(Debug, Clone)]
pub struct ScenarioTable {
    endpoint: Endpoint,
    entries: Vec<ScenarioEntry>,
    miss: Behavior,
}

impl ScenarioTable {
    fn build(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            entries: endpoint.entries(),
            miss: Behavior::Static(providers::no_scenario(endpoint.label())),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn entries(&self) -> &[ScenarioEntry] {
        &self.entries
    }

    /// First entry whose key equals `key` exactly
    pub fn select(&self, key: Option<&str>) -> Selection<'_> {
        let matched = key.and_then(|k| self.entries.iter().find(|e| e.key == k));
        match matched {
            Some(entry) => Selection {
                scenario: Some(entry.key),
                behavior: &entry.behavior,
            },
            None => Selection {
                scenario: None,
                behavior: &self.miss,
            },
        }
    }
}

/// All endpoint tables
#[derive(Debug)]
pub struct Catalog {
    tables: Vec<ScenarioTable>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

/// The process-wide catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    fn build() -> Self {
        Self {
            tables: Endpoint::ALL.iter().map(|ep| ScenarioTable::build(*ep)).collect(),
        }
    }

    pub fn table(&self, endpoint: Endpoint) -> &ScenarioTable {
        &self.tables[endpoint.index()]
    }

    pub fn tables(&self) -> &[ScenarioTable] {
        &self.tables
    }

    pub fn select(&self, endpoint: Endpoint, key: Option<&str>) -> Selection<'_> {
        self.table(endpoint).select(key)
    }

    /// Flattened listing for display
    pub fn summaries(&self) -> Vec<ScenarioSummary> {
        self.tables
            .iter()
            .flat_map(|table| {
                table.entries.iter().map(move |entry| ScenarioSummary {
                    endpoint: table.endpoint,
                    method: table.endpoint.method().to_string(),
                    path: table.endpoint.paths()[0],
                    scenario: entry.key,
                    kind: entry.behavior.kind(),
                    status: entry.behavior.fixed_status().map(|s| s.as_u16()),
                    summary: entry.summary,
                })
            })
            .collect()
    }
}

/// Serializable catalog row
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub endpoint: Endpoint,
    pub method: String,
    pub path: &'static str,
    pub scenario: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub summary: &'static str,
}
