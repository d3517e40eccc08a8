// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status conditions shared by the kinds that report them

use crate::builder::Builder;
use crate::error::Result;
use crate::kubernetes::ResourceKind;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    /// Anything other than "True" or "False" reads as Unknown
    pub fn parse(status: &str) -> Self {
        match status {
            "True" => ConditionStatus::True,
            "False" => ConditionStatus::False,
            _ => ConditionStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-independent view of one status condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub condition_type: String,
    pub status: ConditionStatus,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub last_transition_time: Option<String>,
}

impl Condition {
    pub fn new(condition_type: &str, status: &str) -> Self {
        Condition {
            condition_type: condition_type.to_string(),
            status: ConditionStatus::parse(status),
            reason: None,
            message: None,
            last_transition_time: None,
        }
    }
}

/// Render a timestamp in its wire form, whatever its Rust type
pub(crate) fn timestamp<T: Serialize>(time: Option<&T>) -> Option<String> {
    time.and_then(|t| serde_json::to_value(t).ok())
        .and_then(|v| v.as_str().map(str::to_string))
}

/// A resource whose status carries typed conditions
pub trait HasConditions {
    fn conditions(&self) -> Vec<Condition>;

    fn condition(&self, condition_type: &str) -> Option<Condition> {
        self.conditions()
            .into_iter()
            .find(|c| c.condition_type == condition_type)
    }

    fn condition_status(&self, condition_type: &str) -> Option<ConditionStatus> {
        self.condition(condition_type).map(|c| c.status)
    }
}

impl<K: ResourceKind + HasConditions> Builder<K> {
    /// Status of a condition on the last observed object
    pub fn condition_status(&self, condition_type: &str) -> Option<ConditionStatus> {
        self.object()
            .and_then(|object| object.condition_status(condition_type))
    }

    /// Poll until the condition of `condition_type` reports `status`
    pub async fn wait_until_condition(
        &mut self,
        condition_type: &str,
        status: ConditionStatus,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_until(timeout, |object| {
            object.condition_status(condition_type) == Some(status)
        })
        .await
    }

    pub async fn wait_until_condition_true(
        &mut self,
        condition_type: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_until_condition(condition_type, ConditionStatus::True, timeout)
            .await
    }
}
