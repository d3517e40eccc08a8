// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::Builder;
use crate::error::{BuilderError, Result};
use crate::kubernetes::ResourceKind;
use tracing::debug;

impl<K: ResourceKind> Builder<K> {
    /// Check that the builder may run an operation.
    ///
    /// A missing api client wins over a missing definition, which wins over
    /// any deferred input error.
    pub fn validate(&self) -> Result<()> {
        if self.api_client.is_none() {
            return Err(BuilderError::NilApiClient { kind: K::KIND_NAME });
        }

        if self.definition.is_none() {
            return Err(BuilderError::UndefinedDefinition { kind: K::KIND_NAME });
        }

        if let Some(msg) = &self.error_msg {
            return Err(BuilderError::Invalid(msg.clone()));
        }

        Ok(())
    }

    /// Record a deferred error unless one is already set
    pub(crate) fn record(&mut self, err: BuilderError) {
        if self.error_msg.is_none() {
            debug!("{} builder is now invalid: {}", K::KIND_NAME, err);
            self.error_msg = Some(err.to_string());
        }
    }

    /// Record that a required field was given an empty value
    pub(crate) fn record_empty(&mut self, field: &str) {
        self.record(BuilderError::Invalid(format!(
            "{} '{}' cannot be empty",
            K::KIND_NAME,
            field
        )));
    }

    /// True when a mutator may change the definition
    pub(crate) fn check_mutable(&mut self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(e) => {
                self.record(e);
                false
            }
        }
    }
}
