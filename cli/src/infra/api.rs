//! Infrastructure implementation of the control-plane and identity ports.
//!
//! `HttpControlPlane` routes every external call through one configured
//! `reqwest::Client`. The wire protocol is a plain JSON API; an identifier
//! collision comes back as HTTP 409 and is classified at this boundary so
//! the service layer never parses transport details.

use anyhow::{Context, Result};
use reqwest::StatusCode;

use dbup_common::{CreateInstance, CreateReply, Identity, InstanceDescription};

use crate::application::ports::{CreateFault, IdentityApi, ProvisioningApi};

/// Per-request timeout. Describe calls that exceed it surface as transient
/// errors, which the poll loop absorbs.
const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// HTTP adapter for the managed-database control plane.
pub struct HttpControlPlane {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpControlPlane {
    /// Create a client against `base_url`, authenticating with `token`
    /// when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("dbup/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn error_body(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        if body.is_empty() {
            format!("control plane returned {status}")
        } else {
            format!("control plane returned {status}: {body}")
        }
    }
}

impl ProvisioningApi for HttpControlPlane {
    async fn create_instance(
        &self,
        request: &CreateInstance,
    ) -> Result<CreateReply, CreateFault> {
        let url = format!("{}/v1/instances", self.base_url);
        let response = self
            .authorize(self.http.post(&url))
            .json(request)
            .send()
            .await
            .context("create call")
            .map_err(CreateFault::Other)?;

        if response.status() == StatusCode::CONFLICT {
            return Err(CreateFault::AlreadyExists);
        }
        if !response.status().is_success() {
            return Err(CreateFault::Other(anyhow::anyhow!(
                Self::error_body(response).await
            )));
        }
        response
            .json::<CreateReply>()
            .await
            .context("parsing create reply")
            .map_err(CreateFault::Other)
    }

    async fn describe_instance(&self, identifier: &str) -> Result<InstanceDescription> {
        let url = format!("{}/v1/instances/{identifier}", self.base_url);
        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .context("describe call")?;
        if !response.status().is_success() {
            anyhow::bail!(Self::error_body(response).await);
        }
        response
            .json::<InstanceDescription>()
            .await
            .context("parsing describe payload")
    }
}

impl IdentityApi for HttpControlPlane {
    async fn whoami(&self) -> Result<Identity> {
        let url = format!("{}/v1/identity", self.base_url);
        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .context("identity call")?;
        if !response.status().is_success() {
            anyhow::bail!(Self::error_body(response).await);
        }
        response
            .json::<Identity>()
            .await
            .context("parsing identity payload")
    }
}
