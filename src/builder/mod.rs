// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Uniform lifecycle shared by every resource builder.
//!
//! A [`Builder`] pairs the caller's desired state (`definition`) with the last
//! state observed on the server (`object`). Constructors and `with_*`
//! mutators never fail: invalid input is recorded as a deferred error that
//! every later terminal operation returns before touching the network.

pub mod list;
mod validate;

use crate::config::Config;
use crate::error::{BuilderError, Result};
use crate::kubernetes::{ApiClient, ResourceKind};
use crate::wait::Poller;
use kube::api::{Api, DeleteParams, PostParams};
use std::time::Duration;
use tracing::{debug, info};

/// User supplied transformation applied by [`Builder::with_options`]
pub type AdditionalOptions<K> = Box<dyn FnOnce(&mut Builder<K>) -> Result<()>>;

/// Desired/observed pair for one resource of kind `K`
#[derive(Clone, Debug)]
pub struct Builder<K> {
    pub(crate) definition: Option<K>,
    pub(crate) object: Option<K>,
    pub(crate) api_client: Option<ApiClient>,
    pub(crate) error_msg: Option<String>,
}

impl<K: ResourceKind> Builder<K> {
    /// Start an unbound builder from a caller-authored definition.
    ///
    /// Checks the client, then the name, then the namespace of namespaced
    /// kinds; the first failure becomes the deferred error.
    pub(crate) fn from_definition(api_client: Option<ApiClient>, definition: K) -> Self {
        let mut builder = Builder {
            definition: Some(definition),
            object: None,
            api_client,
            error_msg: None,
        };

        match &builder.api_client {
            Some(client) => client.attach_scheme::<K>(),
            None => builder.record(BuilderError::NilApiClient { kind: K::KIND_NAME }),
        }

        if builder.name().is_empty() {
            builder.record(BuilderError::EmptyName { kind: K::KIND_NAME });
        }

        if K::NAMESPACED && builder.namespace().is_empty() {
            builder.record(BuilderError::EmptyNamespace { kind: K::KIND_NAME });
        }

        builder
    }

    /// Bound builder whose definition is the observed object
    pub(crate) fn from_object(api_client: ApiClient, object: K) -> Self {
        Builder {
            definition: Some(object.clone()),
            object: Some(object),
            api_client: Some(api_client),
            error_msg: None,
        }
    }

    /// Fetch an existing resource; its current state becomes the definition
    pub(crate) async fn pull(
        api_client: Option<ApiClient>,
        name: &str,
        namespace: &str,
    ) -> Result<Self> {
        let Some(api_client) = api_client else {
            return Err(BuilderError::NilApiClient { kind: K::KIND_NAME });
        };
        if name.is_empty() {
            return Err(BuilderError::EmptyName { kind: K::KIND_NAME });
        }
        if K::NAMESPACED && namespace.is_empty() {
            return Err(BuilderError::EmptyNamespace { kind: K::KIND_NAME });
        }

        debug!("Pulling existing {} {} {}", K::KIND_NAME, name, namespace);
        api_client.attach_scheme::<K>();

        let object = api_client
            .api::<K>(namespace)
            .get_opt(name)
            .await?
            .ok_or_else(|| BuilderError::NotFound {
                kind: K::KIND_NAME,
                name: name.to_string(),
                namespace: K::NAMESPACED.then(|| namespace.to_string()),
            })?;

        Ok(Self::from_object(api_client, object))
    }

    pub fn definition(&self) -> Option<&K> {
        self.definition.as_ref()
    }

    /// Mutable access for option functions; changes stay local until create/update
    pub fn definition_mut(&mut self) -> Option<&mut K> {
        self.definition.as_mut()
    }

    pub fn object(&self) -> Option<&K> {
        self.object.as_ref()
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    pub fn api_client(&self) -> Option<&ApiClient> {
        self.api_client.as_ref()
    }

    pub fn name(&self) -> &str {
        self.definition
            .as_ref()
            .and_then(|d| d.meta().name.as_deref())
            .unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.definition
            .as_ref()
            .and_then(|d| d.meta().namespace.as_deref())
            .unwrap_or_default()
    }

    pub(crate) fn api(&self) -> Result<Api<K>> {
        let client = self
            .api_client
            .as_ref()
            .ok_or(BuilderError::NilApiClient { kind: K::KIND_NAME })?;
        Ok(client.api::<K>(self.namespace()))
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.api_client
            .as_ref()
            .map(|c| c.config().poll_interval)
            .unwrap_or_else(|| Config::default().poll_interval)
    }

    async fn fetch(&self) -> Result<Option<K>> {
        Ok(self.api()?.get_opt(self.name()).await?)
    }

    /// Check whether the resource is present on the server.
    ///
    /// Returns false only when the server says the resource is absent (or the
    /// builder is invalid). Any other read failure returns true: the resource
    /// is "not definitely absent". A successful read refreshes `object`.
    pub async fn exists(&mut self) -> bool {
        if let Err(e) = self.validate() {
            debug!("Failed to validate {} builder: {}", K::KIND_NAME, e);
            return false;
        }

        debug!("Checking if {} {} exists", K::KIND_NAME, self.name());

        match self.fetch().await {
            Ok(Some(object)) => {
                self.object = Some(object);
                true
            }
            Ok(None) => {
                self.object = None;
                false
            }
            Err(e) => {
                debug!(
                    "Failed to read {} {}, cannot prove absence: {}",
                    K::KIND_NAME,
                    self.name(),
                    e
                );
                true
            }
        }
    }

    /// Fetch the current server state without touching `object`
    pub async fn get(&self) -> Result<K> {
        self.validate()?;

        debug!("Getting {} {}", K::KIND_NAME, self.name());

        Ok(self.api()?.get(self.name()).await?)
    }

    /// Create the resource from the definition. A no-op when it already exists.
    pub async fn create(&mut self) -> Result<&mut Self> {
        self.validate()?;

        if self.exists().await {
            debug!("{} {} already exists", K::KIND_NAME, self.name());
            return Ok(self);
        }

        info!("Creating {} {}", K::KIND_NAME, self.name());

        let api = self.api()?;
        let definition = self
            .definition
            .as_ref()
            .ok_or(BuilderError::UndefinedDefinition { kind: K::KIND_NAME })?;
        let created = api.create(&PostParams::default(), definition).await?;
        self.object = Some(created);

        Ok(self)
    }

    /// Replace the resource with the definition.
    ///
    /// The resource is read first: an absent resource fails with
    /// [`BuilderError::CannotUpdateNonExistent`] and the observed
    /// `resourceVersion` is carried into the definition, so a concurrent
    /// writer makes this call fail with a conflict. On success `object` holds
    /// the server's answer.
    pub async fn update(&mut self) -> Result<&mut Self> {
        self.validate()?;

        info!("Updating {} {}", K::KIND_NAME, self.name());

        let Some(current) = self.fetch().await? else {
            return Err(BuilderError::CannotUpdateNonExistent { kind: K::KIND_NAME });
        };

        let api = self.api()?;
        let name = self.name().to_string();
        let revision = current.meta().resource_version.clone();
        self.object = Some(current);

        let Some(definition) = self.definition.as_mut() else {
            return Err(BuilderError::UndefinedDefinition { kind: K::KIND_NAME });
        };
        definition.meta_mut().resource_version = revision;

        let updated = api.replace(&name, &PostParams::default(), definition).await?;
        self.object = Some(updated);

        Ok(self)
    }

    /// Delete the resource. A no-op when it does not exist.
    ///
    /// Clears `object` as well as the definition's `resourceVersion` and
    /// `creationTimestamp` so the same builder can create it again.
    pub async fn delete(&mut self) -> Result<()> {
        self.validate()?;

        if !self.exists().await {
            debug!("{} {} does not exist, nothing to delete", K::KIND_NAME, self.name());
            self.object = None;
            return Ok(());
        }

        info!("Deleting {} {}", K::KIND_NAME, self.name());

        self.api()?
            .delete(self.name(), &DeleteParams::default())
            .await?;

        self.object = None;
        if let Some(definition) = self.definition.as_mut() {
            let meta = definition.meta_mut();
            meta.resource_version = None;
            meta.creation_timestamp = None;
        }

        Ok(())
    }

    /// Apply caller supplied transformations in order.
    ///
    /// The first failing option records its error and skips the rest.
    pub fn with_options(
        &mut self,
        options: impl IntoIterator<Item = AdditionalOptions<K>>,
    ) -> &mut Self {
        if !self.check_mutable() {
            return self;
        }

        debug!("Applying options to {} {}", K::KIND_NAME, self.name());

        for option in options {
            if let Err(e) = option(self) {
                self.record(e);
                break;
            }
        }

        self
    }

    /// Validate and refresh `object`, failing when the resource is absent
    pub(crate) async fn require_exists(&mut self) -> Result<()> {
        self.validate()?;

        if !self.exists().await {
            return Err(BuilderError::ResourceNotFound {
                kind: K::KIND_NAME,
                name: self.name().to_string(),
            });
        }

        Ok(())
    }

    /// Poll the resource until `satisfied` holds for a fresh read.
    ///
    /// Each successful read is stored in `object`. Read failures inside the
    /// loop are tolerated until the deadline.
    pub async fn wait_until<P>(&mut self, timeout: Duration, mut satisfied: P) -> Result<()>
    where
        P: FnMut(&K) -> bool,
    {
        self.require_exists().await?;

        let api = self.api()?;
        let name = self.name().to_string();
        let mut poller = Poller::new(self.poll_interval(), timeout);

        loop {
            poller.tick().await?;

            match poller.bounded(api.get(&name)).await? {
                Ok(object) => {
                    let done = satisfied(&object);
                    self.object = Some(object);
                    if done {
                        return Ok(());
                    }
                }
                Err(e) => debug!("Failed to read {} {} while waiting: {}", K::KIND_NAME, name, e),
            }
        }
    }
}
