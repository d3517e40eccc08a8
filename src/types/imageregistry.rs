// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Configuration of the integrated image registry operator

use super::{conditions_of, StatusCondition};
use crate::conditions::{Condition, HasConditions};
use crate::kubernetes::ResourceKind;
use kube::{Api, Client, CustomResource};
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "imageregistry.operator.openshift.io", version = "v1", kind = "Config")]
#[kube(status = "ImageRegistryConfigStatus")]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct ImageRegistryConfigSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_state: Option<ManagementState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<ImageRegistryConfigStorage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_route: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// The registry operator names its kind `Config`
pub type ImageRegistryConfig = Config;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum ManagementState {
    Managed,
    Unmanaged,
    Removed,
    Force,
}

/// Storage backend of the registry; exactly one backend is expected to be set
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRegistryConfigStorage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<EmptyDirStorage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pvc: Option<PvcStorage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Storage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_state: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct EmptyDirStorage {}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct PvcStorage {
    #[serde(default)]
    pub claim: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct S3Storage {
    pub bucket: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypt: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRegistryConfigStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<StatusCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<ImageRegistryConfigStorage>,
}

impl ResourceKind for ImageRegistryConfig {
    const KIND_NAME: &'static str = "imageregistry";
    const NAMESPACED: bool = false;

    fn api(client: Client, _namespace: &str) -> Api<Self> {
        Api::all(client)
    }
}

impl HasConditions for ImageRegistryConfig {
    fn conditions(&self) -> Vec<Condition> {
        conditions_of(self.status.as_ref().map(|s| &s.conditions))
    }
}
