// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster-wide configuration resources of the `config.openshift.io` group

use super::{conditions_of, StatusCondition};
use crate::conditions::{Condition, HasConditions};
use crate::kubernetes::ResourceKind;
use kube::{Api, Client, CustomResource};
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "config.openshift.io", version = "v1", kind = "ClusterOperator")]
#[kube(status = "ClusterOperatorStatus")]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
pub struct ClusterOperatorSpec {}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOperatorStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<StatusCondition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<OperandVersion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_objects: Vec<RelatedObject>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct OperandVersion {
    pub name: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct RelatedObject {
    pub group: String,
    pub resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceKind for ClusterOperator {
    const KIND_NAME: &'static str = "clusteroperator";
    const NAMESPACED: bool = false;

    fn api(client: Client, _namespace: &str) -> Api<Self> {
        Api::all(client)
    }
}

impl HasConditions for ClusterOperator {
    fn conditions(&self) -> Vec<Condition> {
        conditions_of(self.status.as_ref().map(|s| &s.conditions))
    }
}

/// Cluster-wide egress proxy settings
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "config.openshift.io", version = "v1", kind = "Proxy", plural = "proxies")]
#[kube(status = "ProxyStatus")]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct ProxySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub readiness_endpoints: Vec<String>,
    #[serde(rename = "trustedCA", skip_serializing_if = "Option::is_none")]
    pub trusted_ca: Option<ConfigMapNameReference>,
}

/// Effective proxy settings, as computed by the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProxyStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct ConfigMapNameReference {
    pub name: String,
}

impl ResourceKind for Proxy {
    const KIND_NAME: &'static str = "proxy";
    const NAMESPACED: bool = false;

    fn api(client: Client, _namespace: &str) -> Api<Self> {
        Api::all(client)
    }
}

/// Cluster-wide node settings (kind `Node` of `config.openshift.io`).
///
/// The generated root struct is named after the kind, so it lives in its own
/// module and is exported as `NodesConfig` to keep it apart from the core Node.
mod nodes {
    use super::{CgroupMode, WorkerLatencyProfile};
    use kube::CustomResource;
    use serde::{Deserialize, Serialize};

    #[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
    #[kube(group = "config.openshift.io", version = "v1", kind = "Node")]
    #[kube(derive = "Default")]
    #[kube(derive = "PartialEq")]
    #[serde(rename_all = "camelCase")]
    pub struct NodesConfigSpec {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub cgroup_mode: Option<CgroupMode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub worker_latency_profile: Option<WorkerLatencyProfile>,
    }
}

pub use nodes::{Node as NodesConfig, NodesConfigSpec};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum CgroupMode {
    #[serde(rename = "v1")]
    V1,
    #[serde(rename = "v2")]
    V2,
    /// Leaves the choice to the cluster default
    #[serde(rename = "")]
    Empty,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum WorkerLatencyProfile {
    Default,
    MediumUpdateAverageReaction,
    LowUpdateSlowReaction,
}

impl ResourceKind for NodesConfig {
    const KIND_NAME: &'static str = "nodesconfig";
    const NAMESPACED: bool = false;

    fn api(client: Client, _namespace: &str) -> Api<Self> {
        Api::all(client)
    }
}
