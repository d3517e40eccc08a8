// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::ResourceKind;
use kube::{Api, Client, CustomResource};
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "image.openshift.io", version = "v1", kind = "ImageStream")]
#[kube(namespaced)]
#[kube(status = "ImageStreamStatus")]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_policy: Option<LookupPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct LookupPolicy {
    pub local: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct TagReference {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<TagSource>,
}

/// Where a tag points to; `kind` is usually `DockerImage` or `ImageStreamTag`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct TagSource {
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamStatus {
    #[serde(default)]
    pub docker_image_repository: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_docker_image_repository: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<NamedTagEventList>,
}

/// History of one tag, newest first
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct NamedTagEventList {
    pub tag: String,
    #[serde(default)]
    pub items: Vec<TagEvent>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub docker_image_reference: String,
    pub image: String,
    #[serde(default)]
    pub generation: i64,
}

impl ResourceKind for ImageStream {
    const KIND_NAME: &'static str = "imagestream";
    const NAMESPACED: bool = true;

    fn api(client: Client, namespace: &str) -> Api<Self> {
        Api::namespaced(client, namespace)
    }
}
