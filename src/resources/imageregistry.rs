// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builder for the image registry operator configuration.
//!
//! The registry operator owns a single `Config` object named `cluster`.

use crate::builder::Builder;
use crate::constants::names::CLUSTER;
use crate::error::{BuilderError, Result};
use crate::kubernetes::ApiClient;
use crate::types::imageregistry::{ImageRegistryConfig, ImageRegistryConfigStorage, ManagementState};
use crate::types::StatusCondition;
use std::time::Duration;
use tracing::info;

pub type ImageRegistryBuilder = Builder<ImageRegistryConfig>;

impl Builder<ImageRegistryConfig> {
    pub fn with_management_state(&mut self, state: ManagementState) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if let Some(config) = self.definition.as_mut() {
            config.spec.management_state = Some(state);
        }

        self
    }

    pub fn with_storage(&mut self, storage: ImageRegistryConfigStorage) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if storage == ImageRegistryConfigStorage::default() {
            self.record_empty("storage");
            return self;
        }

        if let Some(config) = self.definition.as_mut() {
            config.spec.storage = Some(storage);
        }

        self
    }

    pub fn with_replicas(&mut self, replicas: i32) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if replicas < 1 {
            self.record(BuilderError::Invalid(format!(
                "imageregistry 'replicas' must be positive: {}",
                replicas
            )));
            return self;
        }

        if let Some(config) = self.definition.as_mut() {
            config.spec.replicas = Some(replicas);
        }

        self
    }

    /// Management state currently set on the cluster
    pub async fn management_state(&mut self) -> Result<ManagementState> {
        self.require_exists().await?;

        self.object()
            .and_then(|config| config.spec.management_state)
            .ok_or(BuilderError::MissingStatus("imageregistry managementState"))
    }

    /// Storage backend currently configured on the cluster
    pub async fn storage_config(&mut self) -> Result<ImageRegistryConfigStorage> {
        self.require_exists().await?;

        self.object()
            .and_then(|config| config.spec.storage.clone())
            .ok_or(BuilderError::MissingStatus("imageregistry storage"))
    }

    /// Wait for a condition matching `expected`.
    ///
    /// Type and status must match; reason and message are compared only when
    /// `expected` sets them.
    pub async fn wait_for_condition(
        &mut self,
        expected: &StatusCondition,
        timeout: Duration,
    ) -> Result<()> {
        info!(
            "Waiting for imageregistry condition {}={}",
            expected.condition_type, expected.status
        );

        self.wait_until(timeout, |config| {
            config
                .status
                .as_ref()
                .map(|status| status.conditions.iter().any(|c| condition_matches(c, expected)))
                .unwrap_or_default()
        })
        .await
    }
}

fn condition_matches(actual: &StatusCondition, expected: &StatusCondition) -> bool {
    actual.condition_type == expected.condition_type
        && actual.status == expected.status
        && (expected.reason.is_none() || actual.reason == expected.reason)
        && (expected.message.is_none() || actual.message == expected.message)
}

/// Pull the registry configuration singleton
pub async fn pull(api_client: impl Into<Option<ApiClient>>) -> Result<ImageRegistryBuilder> {
    Builder::pull(api_client.into(), CLUSTER, "").await
}
