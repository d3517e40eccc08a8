// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Condition types inspected by the waiters
pub mod conditions {
    pub const AVAILABLE: &str = "Available";
    pub const PROGRESSING: &str = "Progressing";
    pub const DEGRADED: &str = "Degraded";
    pub const READY: &str = "Ready";
}

/// Names of cluster-wide singleton configuration objects
pub mod names {
    pub const CLUSTER: &str = "cluster";
}

/// Label keys used by listers and mutators
pub mod labels {
    /// Machine role label carried by MachineSet templates
    pub const MACHINE_ROLE: &str = "machine.openshift.io/cluster-api-machine-role";
    /// Ties machines to the MachineSet that owns them
    pub const MACHINE_SET: &str = "machine.openshift.io/cluster-api-machineset";
    pub const WORKER_ROLE: &str = "worker";
    /// Node role label set on worker nodes
    pub const WORKER_NODE_ROLE: &str = "node-role.kubernetes.io/worker";
}

/// Condition poller configuration
pub mod poll {
    /// Default interval between two polls in milliseconds
    pub const DEFAULT_INTERVAL_MS: u64 = 3000;
    /// Environment variable overriding the poll interval
    pub const INTERVAL_ENV: &str = "OCPKIT_POLL_INTERVAL_MS";
}
