// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builders for cluster nodes.
//!
//! Nodes are registered by the kubelet, so there is no constructor: start
//! from [`pull`] or [`list`].

use crate::builder::list::{list_cluster, wait_for_all};
use crate::builder::Builder;
use crate::conditions::{timestamp, Condition, ConditionStatus, HasConditions};
use crate::constants::conditions::READY;
use crate::error::Result;
use crate::kubernetes::ApiClient;
use k8s_openapi::api::core::v1::Node;
use kube::api::ListParams;
use std::time::Duration;
use tracing::{debug, info};

pub type NodeBuilder = Builder<Node>;

impl Builder<Node> {
    /// Set a label on the node definition. Call `update` to apply it.
    pub fn with_new_label(&mut self, key: &str, value: &str) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if key.is_empty() {
            self.record_empty("label key");
            return self;
        }

        if let Some(node) = self.definition.as_mut() {
            node.metadata
                .labels
                .get_or_insert_with(Default::default)
                .insert(key.to_string(), value.to_string());
        }

        self
    }

    pub fn remove_label(&mut self, key: &str) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if key.is_empty() {
            self.record_empty("label key");
            return self;
        }

        if let Some(labels) = self
            .definition
            .as_mut()
            .and_then(|node| node.metadata.labels.as_mut())
        {
            labels.remove(key);
        }

        self
    }

    /// Mark the node unschedulable
    pub async fn cordon(&mut self) -> Result<()> {
        self.set_unschedulable(true).await
    }

    pub async fn uncordon(&mut self) -> Result<()> {
        self.set_unschedulable(false).await
    }

    async fn set_unschedulable(&mut self, unschedulable: bool) -> Result<()> {
        self.validate()?;

        info!("Setting node {} unschedulable={}", self.name(), unschedulable);

        let previous = self.set_spec_unschedulable(Some(unschedulable));

        if let Err(e) = self.update().await {
            // The definition keeps mirroring what the server holds
            self.set_spec_unschedulable(previous);
            return Err(e);
        }

        Ok(())
    }

    /// Swap `spec.unschedulable` in the definition, returning the old value
    fn set_spec_unschedulable(&mut self, unschedulable: Option<bool>) -> Option<bool> {
        self.definition.as_mut().and_then(|node| {
            std::mem::replace(
                &mut node.spec.get_or_insert_with(Default::default).unschedulable,
                unschedulable,
            )
        })
    }

    /// Read the node and report whether its Ready condition is True
    pub async fn is_ready(&mut self) -> Result<bool> {
        self.require_exists().await?;

        Ok(self.condition_status(READY) == Some(ConditionStatus::True))
    }

    pub async fn wait_until_ready(&mut self, timeout: Duration) -> Result<()> {
        self.wait_until_condition(READY, ConditionStatus::True, timeout)
            .await
    }

    pub async fn wait_until_not_ready(&mut self, timeout: Duration) -> Result<()> {
        self.wait_until_condition(READY, ConditionStatus::False, timeout)
            .await
    }

    /// Wait until the kubelet stops reporting `condition_type`, as happens on a reboot
    pub async fn wait_until_condition_unknown(
        &mut self,
        condition_type: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_until_condition(condition_type, ConditionStatus::Unknown, timeout)
            .await
    }
}

impl HasConditions for Node {
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

fn is_node_ready(node: &Node) -> bool {
    node.condition_status(READY) == Some(ConditionStatus::True)
}

pub async fn pull(api_client: impl Into<Option<ApiClient>>, name: &str) -> Result<NodeBuilder> {
    Builder::pull(api_client.into(), name, "").await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<NodeBuilder>> {
    list_cluster(api_client, options).await
}

/// Wait until every node matching `options` reports Ready
pub async fn wait_for_all_nodes_ready(
    api_client: impl Into<Option<ApiClient>>,
    timeout: Duration,
    options: &[ListParams],
) -> Result<()> {
    let nodes = list(api_client, options).await?;
    debug!("Waiting for {} nodes to become ready", nodes.len());

    wait_for_all(&nodes, timeout, is_node_ready).await
}
