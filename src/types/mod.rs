// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OpenShift resource types not covered by k8s-openapi

pub mod config;
pub mod image;
pub mod imageregistry;
pub mod machine;
pub mod oauth;
pub mod operator;

use crate::conditions::{Condition, ConditionStatus};
use serde::{Deserialize, Serialize};

/// Condition entry as reported in the status of OpenShift operator resources
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusCondition {
    pub fn new(condition_type: &str, status: ConditionStatus) -> Self {
        StatusCondition {
            condition_type: condition_type.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }
}

impl From<&StatusCondition> for Condition {
    fn from(c: &StatusCondition) -> Self {
        Condition {
            condition_type: c.condition_type.clone(),
            status: ConditionStatus::parse(&c.status),
            reason: c.reason.clone(),
            message: c.message.clone(),
            last_transition_time: c.last_transition_time.clone(),
        }
    }
}

/// Convert an optional list of status conditions
pub(crate) fn conditions_of(conditions: Option<&Vec<StatusCondition>>) -> Vec<Condition> {
    conditions
        .map(|conditions| conditions.iter().map(Condition::from).collect())
        .unwrap_or_default()
}
