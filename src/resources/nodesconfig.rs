// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::Builder;
use crate::constants::names::CLUSTER;
use crate::error::Result;
use crate::kubernetes::ApiClient;
use crate::types::config::{CgroupMode, NodesConfig, WorkerLatencyProfile};

pub type NodesConfigBuilder = Builder<NodesConfig>;

impl Builder<NodesConfig> {
    pub fn with_cgroup_mode(&mut self, mode: CgroupMode) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if let Some(config) = self.definition.as_mut() {
            config.spec.cgroup_mode = Some(mode);
        }

        self
    }

    /// Cgroup mode currently set on the cluster; unset reads as [`CgroupMode::Empty`]
    pub async fn cgroup_mode(&mut self) -> Result<CgroupMode> {
        self.require_exists().await?;

        Ok(self
            .object()
            .and_then(|config| config.spec.cgroup_mode)
            .unwrap_or(CgroupMode::Empty))
    }

    pub fn with_worker_latency_profile(&mut self, profile: WorkerLatencyProfile) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        if let Some(config) = self.definition.as_mut() {
            config.spec.worker_latency_profile = Some(profile);
        }

        self
    }
}

/// Pull the cluster-wide node configuration singleton
pub async fn pull(api_client: impl Into<Option<ApiClient>>) -> Result<NodesConfigBuilder> {
    Builder::pull(api_client.into(), CLUSTER, "").await
}
