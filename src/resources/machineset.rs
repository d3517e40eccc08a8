// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::list::list_namespaced;
use crate::builder::Builder;
use crate::constants::labels::{MACHINE_ROLE, MACHINE_SET, WORKER_ROLE};
use crate::error::{BuilderError, Result};
use crate::kubernetes::ApiClient;
use crate::types::machine::{
    LabelsMeta, MachineSelector, MachineSet, MachineSetSpec, MachineTemplate,
};
use kube::api::ListParams;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

pub type MachineSetBuilder = Builder<MachineSet>;

impl Builder<MachineSet> {
    /// A machine set whose selector and template carry the set's own label.
    ///
    /// The provider spec is cloud specific; set it through `with_options`.
    pub fn new(
        api_client: impl Into<Option<ApiClient>>,
        name: &str,
        namespace: &str,
        replicas: i32,
    ) -> Self {
        debug!(
            "Initializing new machineset {} in namespace {} with {} replicas",
            name, namespace, replicas
        );

        let owned = BTreeMap::from([(MACHINE_SET.to_string(), name.to_string())]);
        let mut machine_set = MachineSet::new(
            name,
            MachineSetSpec {
                replicas: Some(replicas),
                selector: MachineSelector {
                    match_labels: owned.clone(),
                },
                template: MachineTemplate {
                    metadata: LabelsMeta {
                        labels: owned,
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        machine_set.metadata.namespace = Some(namespace.to_string());

        let mut builder = Builder::from_definition(api_client.into(), machine_set);
        if replicas < 0 {
            builder.record(negative_replicas(replicas));
        }

        builder
    }

    pub fn with_replicas(&mut self, replicas: i32) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if replicas < 0 {
            self.record(negative_replicas(replicas));
            return self;
        }

        if let Some(ms) = self.definition.as_mut() {
            ms.spec.replicas = Some(replicas);
        }

        self
    }

    /// Label applied to the nodes backing the machines of this set
    pub fn with_node_label(&mut self, key: &str, value: &str) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if key.is_empty() {
            self.record_empty("node label key");
            return self;
        }

        if let Some(ms) = self.definition.as_mut() {
            ms.spec
                .template
                .spec
                .metadata
                .labels
                .insert(key.to_string(), value.to_string());
        }

        self
    }

    /// Wait until every desired machine of the set is ready
    pub async fn wait_until_ready(&mut self, timeout: Duration) -> Result<()> {
        info!("Waiting for machineset {} to become ready", self.name());

        self.wait_until(timeout, replicas_ready).await
    }
}

fn replicas_ready(ms: &MachineSet) -> bool {
    let desired = ms.spec.replicas.unwrap_or(1);
    let ready = ms
        .status
        .as_ref()
        .and_then(|s| s.ready_replicas)
        .unwrap_or_default();

    ready == desired
}

fn negative_replicas(replicas: i32) -> BuilderError {
    BuilderError::Invalid(format!("machineset 'replicas' cannot be negative: {}", replicas))
}

fn is_worker(ms: &MachineSet) -> bool {
    ms.spec.template.metadata.labels.get(MACHINE_ROLE).map(String::as_str) == Some(WORKER_ROLE)
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
    namespace: &str,
) -> Result<MachineSetBuilder> {
    Builder::pull(api_client.into(), name, namespace).await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    namespace: &str,
    options: &[ListParams],
) -> Result<Vec<MachineSetBuilder>> {
    list_namespaced(api_client, namespace, options).await
}

/// List the machine sets whose machines take the worker role
pub async fn list_worker_machine_sets(
    api_client: impl Into<Option<ApiClient>>,
    namespace: &str,
    options: &[ListParams],
) -> Result<Vec<MachineSetBuilder>> {
    let machine_sets = list(api_client, namespace, options).await?;

    Ok(machine_sets
        .into_iter()
        .filter(|b| b.object().is_some_and(is_worker))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeApiServer;
    use crate::types::machine::MachineSetStatus;

    const NAMESPACE: &str = "openshift-machine-api";

    fn with_role(builder: &mut MachineSetBuilder, role: &str) {
        if let Some(ms) = builder.definition_mut() {
            ms.spec
                .template
                .metadata
                .labels
                .insert(MACHINE_ROLE.to_string(), role.to_string());
        }
    }

    #[tokio::test]
    async fn test_new_and_mutators() {
        let server = FakeApiServer::new();
        let mut builder = MachineSetBuilder::new(server.api_client(), "worker-a", NAMESPACE, 2);

        builder
            .with_replicas(3)
            .with_node_label("node-role.kubernetes.io/infra", "")
            .create()
            .await
            .unwrap();

        let stored = server.object::<MachineSet>(Some(NAMESPACE), "worker-a").unwrap();
        assert_eq!(stored.spec.replicas, Some(3));
        assert_eq!(stored.spec.selector.match_labels[MACHINE_SET], "worker-a");
        assert!(stored
            .spec
            .template
            .spec
            .metadata
            .labels
            .contains_key("node-role.kubernetes.io/infra"));

        let builder = MachineSetBuilder::new(server.api_client(), "worker-b", NAMESPACE, -1);
        assert_eq!(
            builder.error_msg(),
            Some("machineset 'replicas' cannot be negative: -1")
        );
    }

    #[tokio::test]
    async fn test_wait_until_ready() {
        let server = FakeApiServer::new();
        let mut builder = MachineSetBuilder::new(server.api_client(), "worker-a", NAMESPACE, 2);
        builder.create().await.unwrap();

        let writer = server.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            writer.modify::<MachineSet>(Some(NAMESPACE), "worker-a", |ms| {
                ms.status = Some(MachineSetStatus {
                    replicas: 2,
                    ready_replicas: Some(2),
                    available_replicas: Some(2),
                    ..Default::default()
                });
            });
        });

        builder.wait_until_ready(Duration::from_secs(5)).await.unwrap();
        assert_eq!(builder.object().unwrap().status.as_ref().unwrap().ready_replicas, Some(2));
    }

    #[tokio::test]
    async fn test_scaled_down_set_is_ready_without_status() {
        let server = FakeApiServer::new();
        let mut builder = MachineSetBuilder::new(server.api_client(), "worker-a", NAMESPACE, 0);
        builder.create().await.unwrap();

        builder
            .wait_until_ready(Duration::from_secs(1))
            .await
            .unwrap();
        assert!(builder.object().unwrap().status.is_none());
    }

    #[tokio::test]
    async fn test_list_worker_machine_sets() {
        let server = FakeApiServer::new();
        for (name, role) in [("worker-a", "worker"), ("worker-b", "worker"), ("infra-a", "infra")] {
            let mut builder = MachineSetBuilder::new(server.api_client(), name, NAMESPACE, 1);
            with_role(&mut builder, role);
            builder.create().await.unwrap();
        }

        assert_eq!(list(server.api_client(), NAMESPACE, &[]).await.unwrap().len(), 3);

        let workers = list_worker_machine_sets(server.api_client(), NAMESPACE, &[])
            .await
            .unwrap();
        let names: Vec<&str> = workers.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["worker-a", "worker-b"]);
    }
}
