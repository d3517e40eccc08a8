// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-kind builders.
//!
//! Each module adds the kind's constructor and `with_*` mutators to
//! [`Builder`](crate::builder::Builder) and exposes `pull` and list functions.

pub mod clusteroperator;
pub mod configmap;
pub mod icsp;
pub mod imageregistry;
pub mod imagestream;
pub mod machineset;
pub mod node;
pub mod nodesconfig;
pub mod oauthclient;
pub mod proxy;
pub mod replicaset;
pub mod serviceaccount;
