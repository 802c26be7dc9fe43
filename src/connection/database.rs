//! Database handle and HTTP transport

use crate::config::ConnectionConfig;
use crate::cursor::{Cursor, CursorResponse};
use crate::error::{Error, Result};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

/// A captured server response: HTTP status plus decoded JSON body
///
/// Protocol outcomes are data at this layer: a non-2xx status or an inline
/// error flag in the body is returned to the caller for interpretation, not
/// raised as an error.
#[derive(Debug, Clone)]
pub struct ServerResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body; `Value::Null` when the body was empty or not JSON
    pub body: Value,
}

impl ServerResponse {
    /// Decode the body into a target type
    ///
    /// A shape mismatch between the body and the target surfaces as a
    /// decode error, never a silent default.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone()).map_err(Error::Decode)
    }

    /// Whether the body carries the server's inline error flag
    pub fn is_server_error(&self) -> bool {
        self.body.get("error").and_then(Value::as_bool) == Some(true)
    }
}

/// Handle to one ArangoDB database over HTTP
///
/// Cheap to clone; all clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    config: ConnectionConfig,
    endpoint: Url,
}

impl Database {
    /// Connect to a database
    ///
    /// Validates the endpoint URL and builds the HTTP client. No request is
    /// issued; the first operation performs the first round trip.
    pub fn connect(config: ConnectionConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Name of the database this handle targets
    pub fn name(&self) -> &str {
        &self.config.database
    }

    /// Issue a request against an API resource
    ///
    /// The path is `/_db/{database}/_api/{resource}/{id}`; an empty `id`
    /// addresses the resource collection itself.
    pub async fn send(
        &self,
        resource: &str,
        id: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<ServerResponse> {
        self.request(resource, id, method, &[], body).await
    }

    /// Read-only variant of [`send`](Self::send): always GET, no body
    pub async fn get(
        &self,
        resource: &str,
        id: &str,
        query: &[(&str, &str)],
    ) -> Result<ServerResponse> {
        self.request(resource, id, Method::GET, query, None).await
    }

    /// Open an AQL query as a server-side cursor
    ///
    /// POSTs to `/_api/cursor` and absorbs the first batch. The server's
    /// inline error echo maps to [`Error::Server`].
    pub async fn query(&self, aql: &str, bind_vars: Option<Value>) -> Result<Cursor> {
        self.query_batched(aql, bind_vars, None).await
    }

    /// Open an AQL query with an explicit server-side batch size
    pub async fn query_batched(
        &self,
        aql: &str,
        bind_vars: Option<Value>,
        batch_size: Option<u32>,
    ) -> Result<Cursor> {
        let mut payload = json!({
            "query": aql,
            "count": true,
        });
        if let Some(vars) = bind_vars {
            payload["bindVars"] = vars;
        }
        if let Some(size) = batch_size {
            payload["batchSize"] = json!(size);
        }

        let res = self
            .send("cursor", "", Method::POST, Some(payload))
            .await?;

        if res.is_server_error() {
            let error_num = res.body.get("errorNum").and_then(Value::as_i64).unwrap_or(0);
            let message = res
                .body
                .get("errorMessage")
                .and_then(Value::as_str)
                .unwrap_or("unknown server error")
                .to_string();
            return Err(Error::server(res.status, error_num, message));
        }
        if res.status >= 400 {
            return Err(Error::server(res.status, 0, "cursor open failed"));
        }

        let response: CursorResponse = res.decode()?;
        Ok(Cursor::from_response(self.clone(), response))
    }

    async fn request(
        &self,
        resource: &str,
        id: &str,
        method: Method,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<ServerResponse> {
        let url = self.build_url(resource, id);

        let mut req = self.client.request(method.clone(), &url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(ref body) = body {
            req = req.json(body);
        }
        if let Some((username, password)) = &self.config.credentials {
            req = req.basic_auth(username, Some(password));
        }

        let response = req.send().await.map_err(Error::Http)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(Error::Http)?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        debug!(%method, %url, status, "request completed");
        if body.get("error").and_then(Value::as_bool) == Some(true) {
            warn!(
                %url,
                status,
                message = body
                    .get("errorMessage")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or(""),
                "server reported an error"
            );
        }

        Ok(ServerResponse { status, body })
    }

    /// Build full URL for an API resource path
    fn build_url(&self, resource: &str, id: &str) -> String {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let database = &self.config.database;
        if id.is_empty() {
            format!("{base}/_db/{database}/_api/{resource}")
        } else {
            format!("{base}/_db/{database}/_api/{resource}/{id}")
        }
    }
}
