// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::list::{list_all_namespaces, list_namespaced};
use crate::builder::Builder;
use crate::error::Result;
use crate::kubernetes::ApiClient;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::api::{ListParams, ObjectMeta};
use std::collections::BTreeMap;
use tracing::debug;

pub type ConfigMapBuilder = Builder<ConfigMap>;

impl Builder<ConfigMap> {
    pub fn new(api_client: impl Into<Option<ApiClient>>, name: &str, namespace: &str) -> Self {
        debug!("Initializing new configmap {} in namespace {}", name, namespace);

        Builder::from_definition(
            api_client.into(),
            ConfigMap {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    namespace: Some(namespace.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
    }

    /// Replace the data of the configmap
    pub fn with_data(&mut self, data: BTreeMap<String, String>) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if data.is_empty() {
            self.record_empty("data");
            return self;
        }

        if let Some(cm) = self.definition.as_mut() {
            cm.data = Some(data);
        }

        self
    }
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
    namespace: &str,
) -> Result<ConfigMapBuilder> {
    Builder::pull(api_client.into(), name, namespace).await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    namespace: &str,
    options: &[ListParams],
) -> Result<Vec<ConfigMapBuilder>> {
    list_namespaced(api_client, namespace, options).await
}

pub async fn list_in_all_namespaces(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<ConfigMapBuilder>> {
    list_all_namespaces(api_client, options).await
}
