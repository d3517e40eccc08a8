// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read access to the cluster-wide proxy configuration.
//!
//! The accessors report the effective settings from the observed status,
//! which may differ from the requested spec while a rollout is in progress.

use crate::builder::Builder;
use crate::constants::names::CLUSTER;
use crate::error::Result;
use crate::kubernetes::ApiClient;
use crate::types::config::{Proxy, ProxyStatus};

pub type ProxyBuilder = Builder<Proxy>;

impl Builder<Proxy> {
    fn status(&self) -> Option<&ProxyStatus> {
        self.object().and_then(|proxy| proxy.status.as_ref())
    }

    pub fn http_proxy(&self) -> Option<&str> {
        self.status().and_then(|s| s.http_proxy.as_deref())
    }

    pub fn https_proxy(&self) -> Option<&str> {
        self.status().and_then(|s| s.https_proxy.as_deref())
    }

    pub fn no_proxy(&self) -> Option<&str> {
        self.status().and_then(|s| s.no_proxy.as_deref())
    }
}

/// Pull the proxy configuration singleton
pub async fn pull(api_client: impl Into<Option<ApiClient>>) -> Result<ProxyBuilder> {
    Builder::pull(api_client.into(), CLUSTER, "").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeApiServer;
    use crate::types::config::ProxySpec;

    #[tokio::test]
    async fn test_effective_settings() {
        let server = FakeApiServer::new();
        let mut proxy = Proxy::new(
            CLUSTER,
            ProxySpec {
                http_proxy: Some("http://proxy.example.com:3128".to_string()),
                ..Default::default()
            },
        );
        proxy.status = Some(ProxyStatus {
            http_proxy: Some("http://proxy.example.com:3128".to_string()),
            https_proxy: None,
            no_proxy: Some(".cluster.local,.svc,10.0.0.0/16".to_string()),
        });
        server.seed(&proxy);

        let builder = pull(server.api_client()).await.unwrap();

        assert_eq!(builder.http_proxy(), Some("http://proxy.example.com:3128"));
        assert_eq!(builder.https_proxy(), None);
        assert_eq!(builder.no_proxy(), Some(".cluster.local,.svc,10.0.0.0/16"));
    }

    #[tokio::test]
    async fn test_unset_proxy() {
        let server = FakeApiServer::new();
        server.seed(&Proxy::new(CLUSTER, ProxySpec::default()));

        let builder = pull(server.api_client()).await.unwrap();
        assert_eq!(builder.http_proxy(), None);
        assert_eq!(builder.no_proxy(), None);
    }
}
