// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runtime registry of resource kinds attached to an API client

use super::kind::ResourceKind;
use kube::core::{ApiResource, GroupVersionKind};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Everything the dynamic object-keyed operations need to address a kind
#[derive(Clone, Debug)]
pub struct RegisteredKind {
    pub resource: ApiResource,
    pub namespaced: bool,
}

/// Set of kinds attached to a client.
///
/// Clones share the same registry. Attaching is idempotent and may happen
/// from any number of builders concurrently.
#[derive(Clone, Debug, Default)]
pub struct Scheme {
    kinds: Arc<RwLock<HashMap<GroupVersionKind, RegisteredKind>>>,
}

impl Scheme {
    /// Attach `K` to the scheme. Returns true when the kind was not attached before.
    pub fn attach<K: ResourceKind>(&self) -> bool {
        let gvk = gvk_of::<K>();

        if self.kinds.read().unwrap_or_else(PoisonError::into_inner).contains_key(&gvk) {
            return false;
        }

        let mut kinds = self.kinds.write().unwrap_or_else(PoisonError::into_inner);
        if kinds.contains_key(&gvk) {
            return false;
        }

        debug!("Attaching {} to the scheme", describe(&gvk));
        kinds.insert(
            gvk,
            RegisteredKind {
                resource: ApiResource::erase::<K>(&()),
                namespaced: K::NAMESPACED,
            },
        );
        true
    }

    pub fn is_attached<K: ResourceKind>(&self) -> bool {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&gvk_of::<K>())
    }

    /// Look up an attached kind
    pub fn resolve(&self, gvk: &GroupVersionKind) -> Option<RegisteredKind> {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(gvk)
            .cloned()
    }

    /// All attached kinds, sorted by group, version and kind
    pub fn kinds(&self) -> Vec<GroupVersionKind> {
        let mut kinds: Vec<GroupVersionKind> = self
            .kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        kinds.sort_by(|a, b| {
            (&a.group, &a.version, &a.kind).cmp(&(&b.group, &b.version, &b.kind))
        });
        kinds
    }
}

/// Group, version and kind of a typed resource
pub fn gvk_of<K: ResourceKind>() -> GroupVersionKind {
    GroupVersionKind::gvk(&K::group(&()), &K::version(&()), &K::kind(&()))
}

/// Human readable form used in logs and errors, e.g. `config.openshift.io/v1 Proxy`
pub fn describe(gvk: &GroupVersionKind) -> String {
    if gvk.group.is_empty() {
        format!("{} {}", gvk.version, gvk.kind)
    } else {
        format!("{}/{} {}", gvk.group, gvk.version, gvk.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::ClusterOperator;
    use k8s_openapi::api::core::v1::{ConfigMap, Node};

    #[test]
    fn test_attach_is_idempotent() {
        let scheme = Scheme::default();

        assert!(scheme.attach::<ConfigMap>());
        assert!(!scheme.attach::<ConfigMap>());
        assert!(scheme.is_attached::<ConfigMap>());
        assert!(!scheme.is_attached::<Node>());
        assert_eq!(scheme.kinds().len(), 1);
    }

    #[test]
    fn test_clones_share_registry() {
        let scheme = Scheme::default();
        let other = scheme.clone();

        other.attach::<ClusterOperator>();

        assert!(scheme.is_attached::<ClusterOperator>());
        let registered = scheme.resolve(&gvk_of::<ClusterOperator>()).unwrap();
        assert_eq!(registered.resource.plural, "clusteroperators");
        assert!(!registered.namespaced);
    }

    #[test]
    fn test_concurrent_attach_yields_same_scheme() {
        let scheme = Scheme::default();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let scheme = scheme.clone();
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        scheme.attach::<ConfigMap>();
                        scheme.attach::<Node>();
                    } else {
                        scheme.attach::<Node>();
                        scheme.attach::<ConfigMap>();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let kinds: Vec<String> = scheme.kinds().iter().map(describe).collect();
        assert_eq!(kinds, vec!["v1 ConfigMap", "v1 Node"]);
    }
}
