// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::list::list_cluster;
use crate::builder::Builder;
use crate::error::Result;
use crate::kubernetes::ApiClient;
use crate::types::operator::{
    ImageContentSourcePolicy, ImageContentSourcePolicySpec, RepositoryDigestMirrors,
};
use kube::api::ListParams;
use tracing::debug;

pub type ImageContentSourcePolicyBuilder = Builder<ImageContentSourcePolicy>;

impl Builder<ImageContentSourcePolicy> {
    /// A policy mirroring `source` to `mirrors`
    pub fn new(
        api_client: impl Into<Option<ApiClient>>,
        name: &str,
        source: &str,
        mirrors: Vec<String>,
    ) -> Self {
        debug!(
            "Initializing new imagecontentsourcepolicy {} with source {} and mirrors {:?}",
            name, source, mirrors
        );

        let mut builder = Builder::from_definition(
            api_client.into(),
            ImageContentSourcePolicy::new(name, ImageContentSourcePolicySpec::default()),
        );

        builder.push_mirror(source, mirrors);
        builder
    }

    /// Append another source and its mirrors. Call `update` to apply it.
    pub fn with_repository_digest_mirror(
        &mut self,
        source: &str,
        mirrors: Vec<String>,
    ) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        self.push_mirror(source, mirrors);
        self
    }

    fn push_mirror(&mut self, source: &str, mirrors: Vec<String>) {
        if source.is_empty() {
            self.record_empty("source");
            return;
        }

        if mirrors.is_empty() {
            self.record_empty("mirrors");
            return;
        }

        if let Some(icsp) = self.definition.as_mut() {
            icsp.spec.repository_digest_mirrors.push(RepositoryDigestMirrors {
                source: source.to_string(),
                mirrors,
            });
        }
    }
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
) -> Result<ImageContentSourcePolicyBuilder> {
    Builder::pull(api_client.into(), name, "").await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<ImageContentSourcePolicyBuilder>> {
    list_cluster(api_client, options).await
}
