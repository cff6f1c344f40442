//! OpenAI-format chat-completions client.

use std::env;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use restyle_core::{
    retry_with_backoff, BackoffPolicy, GenerationRequest, Generator, Message, RestyleError,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Client for an OpenAI-compatible chat-completions endpoint. The sole point
/// of contact with the remote service; every call is independently wrapped by
/// the backoff retrier with rate limiting as the only transient failure.
#[derive(Clone, Debug)]
pub struct ChatClient {
    http: Client,
    base_url: String,
    api_key: Secret<String>,
    organization: Option<String>,
    model: String,
    temperature: f32,
    system_message: Option<String>,
    timeout: Duration,
    backoff: BackoffPolicy,
}

impl ChatClient {
    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            organization: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 1.0,
            system_message: None,
            timeout: Duration::from_secs(60),
            backoff: BackoffPolicy::default(),
        }
    }

    /// Builds a client from `OPENAI_API_KEY` and, when set,
    /// `OPENAI_ORGANIZATION`.
    pub fn from_env() -> Result<Self, RestyleError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| RestyleError::InvalidConfig("OPENAI_API_KEY is not set".to_string()))?;
        let mut builder = Self::builder().api_key(api_key);
        if let Ok(organization) = env::var("OPENAI_ORGANIZATION") {
            builder = builder.organization(organization);
        }
        builder.build()
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn wire_request(&self, request: GenerationRequest) -> ChatCompletionRequest {
        let GenerationRequest {
            model,
            messages,
            max_tokens,
            temperature,
        } = request;
        let model = if model.is_empty() {
            self.model.clone()
        } else {
            model
        };
        let mut turns = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = &self.system_message {
            turns.push(Message::system(system.clone()));
        }
        turns.extend(messages);
        ChatCompletionRequest {
            model,
            messages: turns,
            temperature: temperature.unwrap_or(self.temperature),
            max_tokens,
        }
    }

    async fn send(&self, body: &ChatCompletionRequest) -> Result<String, RestyleError> {
        let mut request = self
            .http
            .post(self.completions_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(body);
        if let Some(organization) = &self.organization {
            request = request.header("OpenAI-Organization", organization);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                RestyleError::Timeout(self.timeout)
            } else {
                RestyleError::Provider(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {text}"));
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(RestyleError::RateLimited(message));
            }
            return Err(RestyleError::Provider(message));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| RestyleError::Provider(err.to_string()))?;

        // The service occasionally returns a choice with no content; a reply
        // is either wholly valid or a failure.
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| RestyleError::Provider("no completion content in response".to_string()))
    }
}

#[async_trait::async_trait]
impl Generator for ChatClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, RestyleError> {
        let body = self.wire_request(request);
        debug!(
            model = %body.model,
            turns = body.messages.len(),
            max_tokens = body.max_tokens,
            "requesting completion"
        );
        retry_with_backoff(&self.backoff, RestyleError::is_rate_limited, || {
            self.send(&body)
        })
        .await
    }
}

#[derive(Debug)]
pub struct ChatClientBuilder {
    base_url: String,
    api_key: Option<Secret<String>>,
    organization: Option<String>,
    model: String,
    temperature: f32,
    system_message: Option<String>,
    timeout: Duration,
    backoff: BackoffPolicy,
}

impl ChatClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Result<Self, RestyleError> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|err| {
            RestyleError::InvalidConfig(format!("invalid base url {base_url}: {err}"))
        })?;
        self.base_url = base_url;
        Ok(self)
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Prepended to every conversation sent through this client.
    pub fn system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn build(self) -> Result<ChatClient, RestyleError> {
        let ChatClientBuilder {
            base_url,
            api_key,
            organization,
            model,
            temperature,
            system_message,
            timeout,
            backoff,
        } = self;
        let api_key = api_key
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| RestyleError::InvalidConfig("an API key is required".to_string()))?;
        backoff.validate()?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RestyleError::InvalidConfig(format!("http client: {err}")))?;
        Ok(ChatClient {
            http,
            base_url,
            api_key,
            organization,
            model,
            temperature,
            system_message,
            timeout,
            backoff,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
