// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Binding between a Rust resource type and its typed API sub-client

use k8s_openapi::api::apps::v1::ReplicaSet;
use k8s_openapi::api::core::v1::{ConfigMap, Node, ServiceAccount};
use kube::{Api, Client, Resource};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// A resource kind the builders know how to address.
///
/// `KIND_NAME` is the lower-case name used in every error message about the
/// kind. `api` returns the sub-client for the kind, scoped to `namespace` for
/// namespaced kinds; cluster-scoped kinds ignore the namespace.
pub trait ResourceKind:
    Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND_NAME: &'static str;
    const NAMESPACED: bool;

    fn api(client: Client, namespace: &str) -> Api<Self>;
}

impl ResourceKind for ConfigMap {
    const KIND_NAME: &'static str = "configmap";
    const NAMESPACED: bool = true;

    fn api(client: Client, namespace: &str) -> Api<Self> {
        Api::namespaced(client, namespace)
    }
}

impl ResourceKind for ServiceAccount {
    const KIND_NAME: &'static str = "serviceaccount";
    const NAMESPACED: bool = true;

    fn api(client: Client, namespace: &str) -> Api<Self> {
        Api::namespaced(client, namespace)
    }
}

impl ResourceKind for ReplicaSet {
    const KIND_NAME: &'static str = "replicaset";
    const NAMESPACED: bool = true;

    fn api(client: Client, namespace: &str) -> Api<Self> {
        Api::namespaced(client, namespace)
    }
}

impl ResourceKind for Node {
    const KIND_NAME: &'static str = "node";
    const NAMESPACED: bool = false;

    fn api(client: Client, _namespace: &str) -> Api<Self> {
        Api::all(client)
    }
}
