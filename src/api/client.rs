use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response};

use super::classify::{classify, Operation};
use super::{AdminApi, ApiError, Credentials, REPLACEMENT_PARAM};
use crate::models::{AdminProfile, Collection, LoginRequest, Record};

/// Shared HTTP client for the backend. One per process; cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind the client to one browser's backend credentials.
    pub fn session(&self, credentials: Option<Credentials>) -> BackendSession<'_> {
        BackendSession { client: self, credentials }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Exchange email and password for a backend session cookie.
    pub async fn login(&self, email: &str, password: &str) -> Result<(AdminProfile, Credentials), ApiError> {
        let req = self.http.post(self.url("login")).json(&LoginRequest { email, password });
        let resp = send(req, None, Operation::Login).await?;

        let credentials = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(Credentials::from_set_cookie)
            .ok_or_else(|| ApiError::Transport("Backend did not issue a session cookie".to_string()))?;

        let profile = resp.json::<AdminProfile>().await.map_err(|e| ApiError::MalformedResponse {
            endpoint: "/login".to_string(),
            detail: e.to_string(),
        })?;

        Ok((profile, credentials))
    }
}

pub struct BackendSession<'a> {
    client: &'a BackendClient,
    credentials: Option<Credentials>,
}

impl BackendSession<'_> {
    pub async fn logout(&self) -> Result<(), ApiError> {
        let req = self.client.http.post(self.client.url("logout"));
        send(req, self.credentials.as_ref(), Operation::Logout).await.map(|_| ())
    }
}

impl AdminApi for BackendSession<'_> {
    async fn me(&self) -> Result<AdminProfile, ApiError> {
        let req = self.client.http.get(self.client.url("me"));
        let resp = send(req, self.credentials.as_ref(), Operation::Me).await?;
        resp.json::<AdminProfile>().await.map_err(|e| ApiError::MalformedResponse {
            endpoint: "/me".to_string(),
            detail: e.to_string(),
        })
    }

    async fn list<R: Record>(&self) -> Result<Vec<R>, ApiError> {
        let collection = R::COLLECTION;
        let req = self.client.http.get(self.client.url(collection.path()));
        let resp = send(req, self.credentials.as_ref(), Operation::List(collection)).await?;

        let endpoint = format!("/{}", collection.path());
        let value: serde_json::Value = resp.json().await.map_err(|e| ApiError::MalformedResponse {
            endpoint: endpoint.clone(),
            detail: e.to_string(),
        })?;
        if !value.is_array() {
            return Err(ApiError::MalformedResponse {
                endpoint,
                detail: "expected a JSON array".to_string(),
            });
        }
        serde_json::from_value(value).map_err(|e| ApiError::MalformedResponse {
            endpoint,
            detail: e.to_string(),
        })
    }

    async fn update<R: Record>(&self, record: &R) -> Result<(), ApiError> {
        let collection = R::COLLECTION;
        let path = format!("{}/{}", collection.path(), record.id());
        let req = self.client.http.put(self.client.url(&path)).json(record);
        send(req, self.credentials.as_ref(), Operation::Update(collection)).await.map(|_| ())
    }

    async fn delete(
        &self,
        collection: Collection,
        id: i64,
        replacement: Option<i64>,
    ) -> Result<(), ApiError> {
        let path = format!("{}/{}", collection.path(), id);
        let mut req = self.client.http.delete(self.client.url(&path));
        if let Some(replacement) = replacement {
            req = req.query(&[(REPLACEMENT_PARAM, replacement)]);
        }
        let op = Operation::Delete { collection, reassigning: replacement.is_some() };
        send(req, self.credentials.as_ref(), op).await.map(|_| ())
    }
}

async fn send(
    req: RequestBuilder,
    credentials: Option<&Credentials>,
    op: Operation,
) -> Result<Response, ApiError> {
    let req = match credentials {
        Some(c) => req.header(COOKIE, c.header_value()),
        None => req,
    };

    let resp = req.send().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(e.to_string())
        }
    })?;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    log::debug!("backend {op:?} answered {status}: {body}");
    Err(classify(status.as_u16(), &body, op))
}
