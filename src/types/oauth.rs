// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OAuth clients registered with the cluster's OAuth server.
//!
//! OAuthClient carries its fields at the top level instead of under `spec`,
//! so it implements [`kube::Resource`] by hand.

use crate::kubernetes::ResourceKind;
use kube::api::{ObjectMeta, TypeMeta};
use kube::core::ClusterResourceScope;
use kube::{Api, Client, Resource};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const GROUP: &str = "oauth.openshift.io";
const VERSION: &str = "v1";
const KIND: &str = "OAuthClient";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OAuthClient {
    #[serde(flatten)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_secrets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respond_with_challenges: Option<bool>,
    #[serde(rename = "redirectURIs", default, skip_serializing_if = "Vec::is_empty")]
    pub redirect_uris: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_method: Option<GrantMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_max_age_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_inactivity_timeout_seconds: Option<i32>,
}

/// How the OAuth server handles grant requests for a client
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrantMethod {
    Auto,
    Prompt,
}

impl OAuthClient {
    pub fn new(name: &str) -> Self {
        OAuthClient {
            types: Some(TypeMeta {
                api_version: format!("{}/{}", GROUP, VERSION),
                kind: KIND.to_string(),
            }),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl Resource for OAuthClient {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(KIND)
    }

    fn group(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(GROUP)
    }

    fn version(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(VERSION)
    }

    fn plural(_: &()) -> Cow<'_, str> {
        Cow::Borrowed("oauthclients")
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl ResourceKind for OAuthClient {
    const KIND_NAME: &'static str = "oauthclient";
    const NAMESPACED: bool = false;

    fn api(client: Client, _namespace: &str) -> Api<Self> {
        Api::all(client)
    }
}
