// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::list::list_cluster;
use crate::builder::Builder;
use crate::error::Result;
use crate::kubernetes::ApiClient;
use crate::types::oauth::{GrantMethod, OAuthClient};
use kube::api::ListParams;
use tracing::debug;

pub type OAuthClientBuilder = Builder<OAuthClient>;

impl Builder<OAuthClient> {
    pub fn new(api_client: impl Into<Option<ApiClient>>, name: &str) -> Self {
        debug!("Initializing new oauthclient {}", name);

        Builder::from_definition(api_client.into(), OAuthClient::new(name))
    }

    pub fn with_secret(&mut self, secret: &str) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if secret.is_empty() {
            self.record_empty("secret");
            return self;
        }

        if let Some(client) = self.definition.as_mut() {
            client.secret = Some(secret.to_string());
        }

        self
    }

    /// Replace the URIs the OAuth server may redirect to after authorization
    pub fn with_redirect_uris(&mut self, uris: Vec<String>) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if uris.is_empty() || uris.iter().any(String::is_empty) {
            self.record_empty("redirectURIs");
            return self;
        }

        if let Some(client) = self.definition.as_mut() {
            client.redirect_uris = uris;
        }

        self
    }

    pub fn with_grant_method(&mut self, method: GrantMethod) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if let Some(client) = self.definition.as_mut() {
            client.grant_method = Some(method);
        }

        self
    }
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
) -> Result<OAuthClientBuilder> {
    Builder::pull(api_client.into(), name, "").await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<OAuthClientBuilder>> {
    list_cluster(api_client, options).await
}
