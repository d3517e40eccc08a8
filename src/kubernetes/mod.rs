// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Gateway to the cluster API: client handle, kind bindings, scheme and discovery.

pub mod client;
pub mod crd;
pub mod kind;
pub mod scheme;

pub use client::{ApiClient, ObjectKey};
pub use kind::ResourceKind;
pub use scheme::Scheme;
