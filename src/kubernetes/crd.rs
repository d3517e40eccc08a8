// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource kind availability checks

use super::client::ApiClient;
use super::kind::ResourceKind;
use crate::error::Result;
use crate::wait::poll_until;
use kube::discovery::Discovery;
use std::time::Duration;
use tracing::{info, warn};

impl ApiClient {
    /// Check if the cluster serves `K` by discovering its API group
    pub async fn is_kind_served<K: ResourceKind>(&self) -> Result<bool> {
        let group = K::group(&());
        let version = K::version(&());
        let kind = K::kind(&());

        let discovery = Discovery::new(self.client().clone())
            .filter(&[group.as_ref()])
            .run()
            .await?;

        for api_group in discovery.groups() {
            if api_group.name() == group {
                for (ar, _) in api_group.recommended_resources() {
                    if ar.kind == kind && ar.version == version {
                        return Ok(true);
                    }
                }
            }
        }

        Ok(false)
    }

    /// Wait until the cluster serves `K`, e.g. right after its CRD was installed
    pub async fn wait_for_kind_served<K: ResourceKind>(&self, timeout: Duration) -> Result<()> {
        poll_until(self.config().poll_interval, timeout, || async {
            match self.is_kind_served::<K>().await {
                Ok(true) => {
                    info!("{} is available", K::KIND_NAME);
                    Ok(true)
                }
                Ok(false) => {
                    info!("{} not yet available, waiting...", K::KIND_NAME);
                    Ok(false)
                }
                Err(e) => {
                    warn!("Error checking for {}: {}, retrying...", K::KIND_NAME, e);
                    Ok(false)
                }
            }
        })
        .await
    }
}
