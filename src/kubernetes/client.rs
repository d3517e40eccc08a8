// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API client creation and object-keyed access to attached kinds

use super::kind::ResourceKind;
use super::scheme::{describe, Scheme};
use crate::config::Config;
use crate::error::{BuilderError, Result};
use kube::{
    api::{DeleteParams, DynamicObject, ListParams, PostParams},
    config::{KubeConfigOptions, Kubeconfig},
    core::GroupVersionKind,
    Api, Client,
};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Shared handle to the cluster API.
///
/// Cheap to clone; clones share the underlying connection pool and scheme.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
    scheme: Scheme,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

/// Identity of an object addressed through the scheme
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectKey {
    pub gvk: GroupVersionKind,
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectKey {
    pub fn new(gvk: GroupVersionKind, namespace: Option<&str>, name: &str) -> Self {
        ObjectKey {
            gvk,
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }
}

impl ApiClient {
    pub fn new(client: Client) -> Self {
        Self::with_config(client, Config::default())
    }

    pub fn with_config(client: Client, config: Config) -> Self {
        ApiClient {
            client,
            config,
            scheme: Scheme::default(),
        }
    }

    /// Connect using the inferred kubeconfig or in-cluster environment
    pub async fn try_default() -> Result<Self> {
        let config = Config::from_env().map_err(|e| BuilderError::Config(format!("{:#}", e)))?;
        let client = Client::try_default().await?;
        info!("Connected to cluster API");
        Ok(Self::with_config(client, config))
    }

    /// Connect using a kubeconfig file on disk
    pub async fn from_kubeconfig_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kubeconfig = std::fs::read_to_string(path).map_err(|e| {
            BuilderError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_kubeconfig(&kubeconfig).await
    }

    /// Connect using kubeconfig text
    pub async fn from_kubeconfig(kubeconfig: &str) -> Result<Self> {
        let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
            .map_err(|e| BuilderError::KubeconfigError(e.to_string()))?;

        let client_config =
            kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
                .await
                .map_err(|e| {
                    BuilderError::KubeconfigError(format!("Failed to create config: {}", e))
                })?;

        debug!("Creating client for cluster {}", client_config.cluster_url);

        let client = Client::try_from(client_config).map_err(|e| {
            BuilderError::KubeconfigError(format!("Failed to create client: {}", e))
        })?;
        let config = Config::from_env().map_err(|e| BuilderError::Config(format!("{:#}", e)))?;

        Ok(Self::with_config(client, config))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Typed sub-client for `K`; `namespace` is ignored for cluster-scoped kinds
    pub fn api<K: ResourceKind>(&self, namespace: &str) -> Api<K> {
        K::api(self.client.clone(), namespace)
    }

    /// Typed sub-client for `K` across all namespaces
    pub fn api_all<K: ResourceKind>(&self) -> Api<K> {
        Api::all(self.client.clone())
    }

    /// Register `K` so it can be addressed by object key
    pub fn attach_scheme<K: ResourceKind>(&self) {
        self.scheme.attach::<K>();
    }

    fn dynamic_api(
        &self,
        gvk: &GroupVersionKind,
        namespace: Option<&str>,
    ) -> Result<Api<DynamicObject>> {
        let registered = self
            .scheme
            .resolve(gvk)
            .ok_or_else(|| BuilderError::KindNotAttached(describe(gvk)))?;

        Ok(match namespace {
            Some(ns) if registered.namespaced => {
                Api::namespaced_with(self.client.clone(), ns, &registered.resource)
            }
            _ => Api::all_with(self.client.clone(), &registered.resource),
        })
    }

    #[instrument(skip(self), fields(kind = %describe(&key.gvk)))]
    pub async fn get_object(&self, key: &ObjectKey) -> Result<DynamicObject> {
        let api = self.dynamic_api(&key.gvk, key.namespace.as_deref())?;
        Ok(api.get(&key.name).await?)
    }

    /// List objects of an attached kind, in one namespace or cluster-wide
    #[instrument(skip(self, params), fields(kind = %describe(gvk)))]
    pub async fn list_objects(
        &self,
        gvk: &GroupVersionKind,
        namespace: Option<&str>,
        params: &ListParams,
    ) -> Result<Vec<DynamicObject>> {
        let api = self.dynamic_api(gvk, namespace)?;
        Ok(api.list(params).await?.items)
    }

    /// Replace an object of an attached kind; the key comes from the object itself
    pub async fn update_object(&self, object: &DynamicObject) -> Result<DynamicObject> {
        let types = object.types.as_ref().ok_or_else(|| {
            BuilderError::Invalid("object is missing apiVersion and kind".to_string())
        })?;
        let (group, version) = match types.api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", types.api_version.as_str()),
        };
        let gvk = GroupVersionKind::gvk(group, version, &types.kind);
        let name = object
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| BuilderError::Invalid("object is missing metadata.name".to_string()))?;

        debug!("Updating {} {}", describe(&gvk), name);

        let api = self.dynamic_api(&gvk, object.metadata.namespace.as_deref())?;
        Ok(api.replace(name, &PostParams::default(), object).await?)
    }

    #[instrument(skip(self), fields(kind = %describe(&key.gvk)))]
    pub async fn delete_object(&self, key: &ObjectKey) -> Result<()> {
        let api = self.dynamic_api(&key.gvk, key.namespace.as_deref())?;
        api.delete(&key.name, &DeleteParams::default()).await?;
        Ok(())
    }
}
