// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Enumeration of resources as ready-to-use builders

use super::Builder;
use crate::error::{BuilderError, Result};
use crate::kubernetes::{ApiClient, ResourceKind};
use crate::wait::poll_until;
use futures::future::join_all;
use kube::api::{Api, ListParams};
use std::time::Duration;
use tracing::{debug, info, instrument};

fn list_params(options: &[ListParams]) -> Result<ListParams> {
    match options {
        [] => Ok(ListParams::default()),
        [params] => Ok(params.clone()),
        _ => Err(BuilderError::TooManyListOptions),
    }
}

fn require_client<K: ResourceKind>(api_client: Option<ApiClient>) -> Result<ApiClient> {
    api_client.ok_or(BuilderError::NilApiClient { kind: K::KIND_NAME })
}

async fn collect<K: ResourceKind>(
    api_client: ApiClient,
    api: Api<K>,
    params: &ListParams,
) -> Result<Vec<Builder<K>>> {
    api_client.attach_scheme::<K>();

    let list = api.list(params).await?;

    debug!("Found {} {} objects", list.items.len(), K::KIND_NAME);

    Ok(list
        .items
        .into_iter()
        .map(|item| Builder::from_object(api_client.clone(), item))
        .collect())
}

/// List a namespaced kind in one namespace. At most one options value is accepted.
#[instrument(skip(api_client, options), fields(kind = K::KIND_NAME))]
pub async fn list_namespaced<K: ResourceKind>(
    api_client: impl Into<Option<ApiClient>>,
    namespace: &str,
    options: &[ListParams],
) -> Result<Vec<Builder<K>>> {
    let api_client = require_client::<K>(api_client.into())?;
    if namespace.is_empty() {
        return Err(BuilderError::EmptyNamespace { kind: K::KIND_NAME });
    }
    let params = list_params(options)?;

    let api = api_client.api::<K>(namespace);
    collect(api_client, api, &params).await
}

/// List a namespaced kind across every namespace
#[instrument(skip(api_client, options), fields(kind = K::KIND_NAME))]
pub async fn list_all_namespaces<K: ResourceKind>(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<Builder<K>>> {
    let api_client = require_client::<K>(api_client.into())?;
    let params = list_params(options)?;

    let api = api_client.api_all::<K>();
    collect(api_client, api, &params).await
}

/// List a cluster-scoped kind
#[instrument(skip(api_client, options), fields(kind = K::KIND_NAME))]
pub async fn list_cluster<K: ResourceKind>(
    api_client: impl Into<Option<ApiClient>>,
    options: &[ListParams],
) -> Result<Vec<Builder<K>>> {
    let api_client = require_client::<K>(api_client.into())?;
    let params = list_params(options)?;

    let api = api_client.api::<K>("");
    collect(api_client, api, &params).await
}

/// Wait until `satisfied` holds for a fresh read of every builder.
///
/// The set of resources is fixed by the caller and never re-listed. An item
/// that cannot be read counts as not yet satisfied.
pub async fn wait_for_all<K, P>(
    builders: &[Builder<K>],
    timeout: Duration,
    satisfied: P,
) -> Result<()>
where
    K: ResourceKind,
    P: Fn(&K) -> bool,
{
    let Some(first) = builders.first() else {
        return Ok(());
    };
    let interval = first.poll_interval();

    let targets = builders
        .iter()
        .map(|b| {
            b.validate()?;
            Ok((b.api()?, b.name().to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Waiting for {} {} objects", targets.len(), K::KIND_NAME);

    let targets = &targets;
    let satisfied = &satisfied;
    poll_until(interval, timeout, move || async move {
        let reads = join_all(targets.iter().map(|(api, name)| api.get(name))).await;

        let mut pending = 0;
        for (read, (_, name)) in reads.iter().zip(targets) {
            match read {
                Ok(object) if satisfied(object) => {}
                Ok(_) => pending += 1,
                Err(e) => {
                    debug!("Failed to read {} {}: {}", K::KIND_NAME, name, e);
                    pending += 1;
                }
            }
        }

        if pending > 0 {
            debug!("{} {} objects not ready yet", pending, K::KIND_NAME);
        }

        Ok(pending == 0)
    })
    .await
}
