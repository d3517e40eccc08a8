// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::builder::list::list_namespaced;
use crate::builder::Builder;
use crate::error::{BuilderError, Result};
use crate::kubernetes::{ApiClient, ResourceKind};
use crate::types::image::ImageStream;
use kube::api::ListParams;
use tracing::debug;

pub type ImageStreamBuilder = Builder<ImageStream>;

const DOCKER_IMAGE: &str = "DockerImage";

impl Builder<ImageStream> {
    /// Pull spec of the image behind `tag`.
    ///
    /// A tag pointing at an external `DockerImage` resolves to that reference;
    /// otherwise the most recent image imported for the tag is used.
    pub async fn docker_image(&mut self, tag: &str) -> Result<String> {
        if tag.is_empty() {
            return Err(BuilderError::Invalid(format!("{} 'tag' cannot be empty", ImageStream::KIND_NAME)));
        }

        self.require_exists().await?;

        let Some(stream) = self.object() else {
            return Err(BuilderError::ResourceNotFound {
                kind: ImageStream::KIND_NAME,
                name: self.name().to_string(),
            });
        };

        let from_spec = stream
            .spec
            .tags
            .iter()
            .filter(|t| t.name == tag)
            .filter_map(|t| t.from.as_ref())
            .find(|from| from.kind == DOCKER_IMAGE)
            .map(|from| from.name.clone());

        let from_status = || {
            stream
                .status
                .as_ref()?
                .tags
                .iter()
                .find(|t| t.tag == tag)?
                .items
                .first()
                .map(|event| event.docker_image_reference.clone())
        };

        let image = from_spec.or_else(from_status).ok_or_else(|| {
            BuilderError::Invalid(format!(
                "imagestream {} has no docker image for tag {}",
                self.name(),
                tag
            ))
        })?;

        debug!("imagestream {} tag {} resolves to {}", self.name(), tag, image);
        Ok(image)
    }
}

pub async fn pull(
    api_client: impl Into<Option<ApiClient>>,
    name: &str,
    namespace: &str,
) -> Result<ImageStreamBuilder> {
    Builder::pull(api_client.into(), name, namespace).await
}

pub async fn list(
    api_client: impl Into<Option<ApiClient>>,
    namespace: &str,
    options: &[ListParams],
) -> Result<Vec<ImageStreamBuilder>> {
    list_namespaced(api_client, namespace, options).await
}
