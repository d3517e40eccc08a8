// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::list::{list_all_namespaces, list_namespaced};
use crate::builder::Builder;
use crate::error::Result;
use crate::kubernetes::ApiClient;
use k8s_openapi::api::core::v1::{LocalObjectReference, ServiceAccount};
use kube::api::{ListParams, ObjectMeta};
use tracing::debug;

pub type ServiceAccountBuilder = Builder<ServiceAccount>;

impl Builder<ServiceAccount> {
    pub fn new(api_client: impl Into<Option<ApiClient>>, name: &str, namespace: &str) -> Self {
        debug!("Initializing new serviceaccount {} in namespace {}", name, namespace);

        Builder::from_definition(
            api_client.into(),
            ServiceAccount {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    namespace: Some(namespace.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
    }

    /// Add a secret used when pulling images for pods running as this account
    pub fn with_image_pull_secret(&mut self, secret: &str) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if secret.is_empty() {
            self.record_empty("imagePullSecret");
            return self;
        }

        if let Some(sa) = self.definition.as_mut() {
            sa.image_pull_secrets
                .get_or_insert_with(Vec::new)
                .push(LocalObjectReference {
                    name: secret.to_string().into(),
                });
        }

        self
    }
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
    namespace: &str,
) -> Result<ServiceAccountBuilder> {
    Builder::pull(api_client.into(), name, namespace).await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    namespace: &str,
    options: &[ListParams],
) -> Result<Vec<ServiceAccountBuilder>> {
    list_namespaced(api_client, namespace, options).await
}

pub async fn list_in_all_namespaces(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<ServiceAccountBuilder>> {
    list_all_namespaces(api_client, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeApiServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_with_image_pull_secret() {
        let server = FakeApiServer::new();
        let mut builder = ServiceAccountBuilder::new(server.api_client(), "builder", "testns");

        builder
            .with_image_pull_secret("registry-creds")
            .with_image_pull_secret("mirror-creds")
            .create()
            .await
            .unwrap();

        let stored = server.object::<ServiceAccount>(Some("testns"), "builder").unwrap();
        assert_eq!(
            serde_json::to_value(stored.image_pull_secrets).unwrap(),
            json!([{ "name": "registry-creds" }, { "name": "mirror-creds" }])
        );
    }

    #[tokio::test]
    async fn test_empty_secret_is_rejected() {
        let server = FakeApiServer::new();
        let mut builder = ServiceAccountBuilder::new(server.api_client(), "builder", "testns");

        builder.with_image_pull_secret("");

        assert_eq!(
            builder.error_msg(),
            Some("serviceaccount 'imagePullSecret' cannot be empty")
        );
        assert!(builder.create().await.is_err());
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn test_constructor_reports_empty_namespace() {
        let server = FakeApiServer::new();
        let builder = ServiceAccountBuilder::new(server.api_client(), "builder", "");

        assert_eq!(builder.error_msg(), Some("serviceaccount 'nsname' cannot be empty"));
    }

    #[tokio::test]
    async fn test_list_in_all_namespaces() {
        let server = FakeApiServer::new();
        ServiceAccountBuilder::new(server.api_client(), "default", "ns-a")
            .create()
            .await
            .unwrap();
        ServiceAccountBuilder::new(server.api_client(), "default", "ns-b")
            .create()
            .await
            .unwrap();

        assert_eq!(list(server.api_client(), "ns-a", &[]).await.unwrap().len(), 1);
        assert_eq!(list_in_all_namespaces(server.api_client(), &[]).await.unwrap().len(), 2);
    }
}
