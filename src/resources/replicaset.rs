// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::list::list_namespaced;
use crate::builder::Builder;
use crate::conditions::{timestamp, Condition, ConditionStatus, HasConditions};
use crate::error::{BuilderError, Result};
use crate::kubernetes::ApiClient;
use k8s_openapi::api::apps::v1::{ReplicaSet, ReplicaSetSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::api::{ListParams, ObjectMeta};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

pub type ReplicaSetBuilder = Builder<ReplicaSet>;

impl Builder<ReplicaSet> {
    /// A single-replica set running `container` in pods labelled with `labels`
    pub fn new(
        api_client: impl Into<Option<ApiClient>>,
        name: &str,
        namespace: &str,
        labels: BTreeMap<String, String>,
        container: Container,
    ) -> Self {
        debug!("Initializing new replicaset {} in namespace {}", name, namespace);

        let container_name = container.name.clone();
        let has_labels = !labels.is_empty();

        let mut builder = Builder::from_definition(
            api_client.into(),
            ReplicaSet {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    namespace: Some(namespace.to_string()),
                    ..Default::default()
                },
                spec: Some(ReplicaSetSpec {
                    replicas: Some(1),
                    selector: LabelSelector {
                        match_labels: Some(labels.clone()),
                        ..Default::default()
                    },
                    template: Some(PodTemplateSpec {
                        metadata: Some(ObjectMeta {
                            labels: Some(labels),
                            ..Default::default()
                        }),
                        spec: Some(PodSpec {
                            containers: vec![container],
                            ..Default::default()
                        }),
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        if !has_labels {
            builder.record_empty("labels");
        }

        if container_name.is_empty() {
            builder.record_empty("container name");
        }

        builder
    }

    fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.definition
            .as_mut()?
            .spec
            .as_mut()?
            .template
            .as_mut()?
            .spec
            .as_mut()
    }

    pub fn with_node_selector(&mut self, selector: BTreeMap<String, String>) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if selector.is_empty() {
            self.record_empty("nodeSelector");
            return self;
        }

        if let Some(pod) = self.pod_spec_mut() {
            pod.node_selector = Some(selector);
        }

        self
    }

    /// Append containers to the pod template
    pub fn with_additional_container_specs(&mut self, containers: Vec<Container>) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if containers.is_empty() {
            self.record_empty("containers");
            return self;
        }

        if let Some(pod) = self.pod_spec_mut() {
            pod.containers.extend(containers);
        }

        self
    }

    pub fn with_replicas(&mut self, replicas: i32) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if replicas < 0 {
            self.record(BuilderError::Invalid(format!(
                "replicaset 'replicas' cannot be negative: {}",
                replicas
            )));
            return self;
        }

        if let Some(spec) = self.definition.as_mut().and_then(|rs| rs.spec.as_mut()) {
            spec.replicas = Some(replicas);
        }

        self
    }

    /// Wait up to `timeout` for every desired replica to be ready
    pub async fn is_ready(&mut self, timeout: Duration) -> bool {
        match self.wait_until(timeout, replicas_ready).await {
            Ok(()) => true,
            Err(e) => {
                debug!("replicaset {} is not ready: {}", self.name(), e);
                false
            }
        }
    }

    pub async fn create_and_wait_until_ready(&mut self, timeout: Duration) -> Result<&mut Self> {
        self.create().await?;

        info!("Waiting for replicaset {} to become ready", self.name());
        self.wait_until(timeout, replicas_ready).await?;

        Ok(self)
    }
}

fn replicas_ready(rs: &ReplicaSet) -> bool {
    let desired = rs.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1);
    let ready = rs
        .status
        .as_ref()
        .and_then(|s| s.ready_replicas)
        .unwrap_or_default();

    ready == desired
}

impl HasConditions for ReplicaSet {
    fn conditions(&self) -> Vec<Condition> {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .map(|conditions| {
                conditions
                    .iter()
                    .map(|c| Condition {
                        condition_type: c.type_.clone(),
                        status: ConditionStatus::parse(&c.status),
                        reason: c.reason.clone(),
                        message: c.message.clone(),
                        last_transition_time: timestamp(c.last_transition_time.as_ref()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
    namespace: &str,
) -> Result<ReplicaSetBuilder> {
    Builder::pull(api_client.into(), name, namespace).await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    namespace: &str,
    options: &[ListParams],
) -> Result<Vec<ReplicaSetBuilder>> {
    list_namespaced(api_client, namespace, options).await
}
