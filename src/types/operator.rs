// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::ResourceKind;
use kube::{Api, Client, CustomResource};
use serde::{Deserialize, Serialize};

/// Mirrors consulted when pulling images by digest
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "operator.openshift.io",
    version = "v1alpha1",
    kind = "ImageContentSourcePolicy",
    plural = "imagecontentsourcepolicies"
)]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct ImageContentSourcePolicySpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repository_digest_mirrors: Vec<RepositoryDigestMirrors>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct RepositoryDigestMirrors {
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mirrors: Vec<String>,
}

impl ResourceKind for ImageContentSourcePolicy {
    const KIND_NAME: &'static str = "imagecontentsourcepolicy";
    const NAMESPACED: bool = false;

    fn api(client: Client, _namespace: &str) -> Api<Self> {
        Api::all(client)
    }
}
