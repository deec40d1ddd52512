//! The single configured HTTP transport shared by all resource clients.
//!
//! # Design
//! `Transport` owns the live `SdkConfig` and one `Executor`. Base URL,
//! `Authorization` and timeout are read from the config on every `send`,
//! so `update` takes effect on the next request without rebuilding the
//! underlying agent. The proxy is fixed at construction.
//!
//! `send` is the only path to the network: it prepares the request,
//! executes it once and classifies the outcome once.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::config::{ConfigUpdate, EnvDefaults, ProxySettings, SdkConfig, USER_AGENT};
use crate::error::{SeeError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a fully prepared request. `request.path` is an absolute URL and
/// `request.headers` holds every header to send.
pub trait Executor: Send + Sync {
    fn execute(&self, request: HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

/// Blocking executor backed by a `ureq` agent.
pub struct UreqExecutor {
    agent: ureq::Agent,
    proxy: Option<ProxySettings>,
}

impl UreqExecutor {
    pub fn new(proxy: Option<&ProxySettings>) -> Self {
        let accepted = proxy.and_then(|settings| match ureq::Proxy::new(&settings.to_url()) {
            Ok(proxy) => {
                info!(
                    protocol = %settings.protocol,
                    host = %settings.host,
                    port = settings.port,
                    "Proxy configured"
                );
                Some((proxy, settings.clone()))
            }
            Err(e) => {
                warn!(proxy = %settings.to_url(), error = %e, "Unsupported proxy, continuing without proxy");
                None
            }
        });
        let (proxy, settings) = accepted.unzip();

        // Status codes are data here; the classifier decides what is an error.
        // Setting the proxy explicitly also stops ureq from reading proxy
        // variables on its own.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .proxy(proxy)
            .build()
            .new_agent();

        Self { agent, proxy: settings }
    }

    /// The proxy the agent actually routes through.
    pub fn proxy(&self) -> Option<&ProxySettings> {
        self.proxy.as_ref()
    }
}

impl Executor for UreqExecutor {
    fn execute(&self, request: HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let url = request.path.as_str();
        let headers = request.headers.as_slice();

        let result = match (request.method, request.body) {
            (HttpMethod::Get, None) => with_settings(self.agent.get(url), headers, timeout).call(),
            (HttpMethod::Get, Some(body)) => {
                with_settings(self.agent.get(url).force_send_body(), headers, timeout).send(body)
            }
            (HttpMethod::Delete, None) => with_settings(self.agent.delete(url), headers, timeout).call(),
            (HttpMethod::Delete, Some(body)) => {
                with_settings(self.agent.delete(url).force_send_body(), headers, timeout).send(body)
            }
            (HttpMethod::Post, Some(body)) => with_settings(self.agent.post(url), headers, timeout).send(body),
            (HttpMethod::Post, None) => with_settings(self.agent.post(url), headers, timeout).send_empty(),
            (HttpMethod::Put, Some(body)) => with_settings(self.agent.put(url), headers, timeout).send(body),
            (HttpMethod::Put, None) => with_settings(self.agent.put(url), headers, timeout).send_empty(),
        };

        let mut response = result.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body {
                status,
                message: e.to_string(),
            })?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_settings<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
    timeout: Duration,
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.config().timeout_global(Some(timeout)).build()
}

fn transport_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::HostNotFound => TransportError::Connect("host not found".to_string()),
        ureq::Error::ConnectionFailed => TransportError::Connect("connection refused".to_string()),
        ureq::Error::Io(e) => TransportError::Io(e.to_string()),
        other => TransportError::Other(other.to_string()),
    }
}

/// Shared, configured transport.
///
/// Not internally synchronized: `update` needs `&mut self`, so a client
/// shared across threads and also reconfigured must sit behind the
/// caller's own lock. The last update wins.
pub struct Transport {
    config: SdkConfig,
    proxy: Option<ProxySettings>,
    executor: Box<dyn Executor>,
}

impl Transport {
    /// Build from `config` and the current process environment.
    pub fn new(config: SdkConfig) -> Self {
        Self::with_env(config, &EnvDefaults::from_process())
    }

    pub fn with_env(config: SdkConfig, env: &EnvDefaults) -> Self {
        let executor = UreqExecutor::new(env.proxy_settings().as_ref());
        Self {
            config: config.resolve(env),
            proxy: executor.proxy().cloned(),
            executor: Box::new(executor),
        }
    }

    /// Use a custom executor. The environment is not consulted for the
    /// proxy; the base URL still falls back to `API_BASE_URL`.
    pub fn with_executor(config: SdkConfig, executor: impl Executor + 'static) -> Self {
        let env = EnvDefaults {
            proxy: None,
            ..EnvDefaults::from_process()
        };
        Self {
            config: config.resolve(&env),
            proxy: None,
            executor: Box::new(executor),
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn proxy(&self) -> Option<&ProxySettings> {
        self.proxy.as_ref()
    }

    /// Merge `update` into the live configuration.
    pub fn update(&mut self, update: ConfigUpdate) {
        self.config.merge(update);
        debug!(base_url = %self.config.base_url, timeout = ?self.config.timeout, "Transport reconfigured");
    }

    /// Headers attached to every request unless overridden.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), self.config.api_key.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ]
    }

    /// Resolve the path against the base URL and merge headers. Per-request
    /// headers replace defaults of the same name.
    pub fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        let path = request.path.trim_start_matches('/');
        request.path = format!("{}/{path}", self.config.base_url);

        let mut headers: Vec<(String, String)> = self
            .default_headers()
            .into_iter()
            .filter(|(name, _)| request.header(name).is_none())
            .collect();
        headers.append(&mut request.headers);
        request.headers = headers;
        request
    }

    /// Execute one request and classify the outcome.
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, SeeError> {
        let request = self.prepare(request);
        debug!(method = %request.method, url = %request.path, "Sending request");
        let outcome = self.executor.execute(request, self.config.timeout);
        if let Ok(response) = &outcome {
            debug!(status = response.status, "Response received");
        }
        classify(outcome)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}
