// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error(transparent)]
    KubeError(#[from] kube::Error),

    #[error("{kind} builder cannot have nil apiClient")]
    NilApiClient { kind: &'static str },

    #[error("can not redefine the undefined {kind}")]
    UndefinedDefinition { kind: &'static str },

    #[error("{kind} 'name' cannot be empty")]
    EmptyName { kind: &'static str },

    #[error("{kind} 'nsname' cannot be empty")]
    EmptyNamespace { kind: &'static str },

    /// Deferred input error recorded on a builder by a constructor or mutator.
    #[error("{0}")]
    Invalid(String),

    #[error(
        "{kind} object {name} doesn't exist{}",
        .namespace.as_deref().map(|ns| format!(" in namespace {ns}")).unwrap_or_default()
    )]
    NotFound {
        kind: &'static str,
        name: String,
        namespace: Option<String>,
    },

    #[error("{kind} {name} not found")]
    ResourceNotFound { kind: &'static str, name: String },

    #[error("cannot update non-existent {kind}")]
    CannotUpdateNonExistent { kind: &'static str },

    #[error("error: more than one ListOptions was passed")]
    TooManyListOptions,

    #[error("context deadline exceeded")]
    DeadlineExceeded,

    #[error("undefined {0}")]
    MissingStatus(&'static str),

    #[error("kind {0} is not attached to the scheme")]
    KindNotAttached(String),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BuilderError>;

/// Check whether a raw API error means the resource is absent
pub fn is_kube_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

/// Check whether an error means the resource is absent
pub fn is_not_found(err: &BuilderError) -> bool {
    match err {
        BuilderError::NotFound { .. } | BuilderError::ResourceNotFound { .. } => true,
        BuilderError::KubeError(e) => is_kube_not_found(e),
        _ => false,
    }
}
