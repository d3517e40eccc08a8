// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builders for the operators that make up the cluster's control plane.
//!
//! Cluster operators are owned by the cluster version operator and only
//! ever pulled or listed, never created.

use crate::builder::list::{list_cluster, wait_for_all};
use crate::builder::Builder;
use crate::conditions::{ConditionStatus, HasConditions};
use crate::constants::conditions::{AVAILABLE, DEGRADED, PROGRESSING};
use crate::error::{BuilderError, Result};
use crate::kubernetes::ApiClient;
use crate::types::config::ClusterOperator;
use kube::api::ListParams;
use std::time::Duration;
use tracing::{debug, info, warn};

pub type ClusterOperatorBuilder = Builder<ClusterOperator>;

impl Builder<ClusterOperator> {
    /// Read the operator and check that `condition_type` is True
    async fn has_condition(&mut self, condition_type: &str) -> bool {
        if !self.exists().await {
            return false;
        }

        self.condition_status(condition_type) == Some(ConditionStatus::True)
    }

    pub async fn is_available(&mut self) -> bool {
        self.has_condition(AVAILABLE).await
    }

    pub async fn is_progressing(&mut self) -> bool {
        self.has_condition(PROGRESSING).await
    }

    pub async fn is_degraded(&mut self) -> bool {
        self.has_condition(DEGRADED).await
    }

    pub async fn wait_until_available(&mut self, timeout: Duration) -> Result<()> {
        self.wait_until_condition_true(AVAILABLE, timeout).await
    }

    pub async fn wait_until_progressing(&mut self, timeout: Duration) -> Result<()> {
        self.wait_until_condition_true(PROGRESSING, timeout).await
    }

    pub async fn wait_until_not_progressing(&mut self, timeout: Duration) -> Result<()> {
        self.wait_until_condition(PROGRESSING, ConditionStatus::False, timeout)
            .await
    }

    /// Check whether the operator reports `version` among its operand versions
    pub async fn has_desired_version(&mut self, version: &str) -> Result<bool> {
        self.require_exists().await?;

        let versions = self
            .object()
            .and_then(|co| co.status.as_ref())
            .map(|status| status.versions.as_slice())
            .unwrap_or_default();

        if versions.is_empty() {
            return Err(BuilderError::MissingStatus("cluster operator status versions"));
        }

        debug!("Cluster operator {} reports versions {:?}", self.name(), versions);

        Ok(versions.iter().any(|v| v.version == version))
    }
}

fn is_available(co: &ClusterOperator) -> bool {
    co.condition_status(AVAILABLE) == Some(ConditionStatus::True)
}

fn stopped_progressing(co: &ClusterOperator) -> bool {
    co.condition_status(PROGRESSING) == Some(ConditionStatus::False)
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
) -> Result<ClusterOperatorBuilder> {
    Builder::pull(api_client.into(), name, "").await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<ClusterOperatorBuilder>> {
    list_cluster(api_client, options).await
}

/// Wait until every cluster operator reports Available
pub async fn wait_for_all_available(
    api_client: impl Into<Option<ApiClient>>,
    timeout: Duration,
    options: &[ListParams],
) -> Result<()> {
    let operators = list(api_client, options).await?;
    info!("Waiting for {} cluster operators to become available", operators.len());

    wait_for_all(&operators, timeout, is_available).await
}

/// Wait until no cluster operator reports Progressing
pub async fn wait_for_all_stop_progressing(
    api_client: impl Into<Option<ApiClient>>,
    timeout: Duration,
    options: &[ListParams],
) -> Result<()> {
    let operators = list(api_client, options).await?;
    info!("Waiting for {} cluster operators to stop progressing", operators.len());

    wait_for_all(&operators, timeout, stopped_progressing).await
}

/// Check once, without waiting, that every cluster operator is available
pub async fn verify_all_available(api_client: impl Into<Option<ApiClient>>) -> Result<bool> {
    let operators = list(api_client, &[]).await?;

    let mut available = true;
    for operator in operators.iter().filter_map(|b| b.object()) {
        if !is_available(operator) {
            warn!(
                "Cluster operator {} is not available",
                operator.metadata.name.as_deref().unwrap_or_default()
            );
            available = false;
        }
    }

    Ok(available)
}
