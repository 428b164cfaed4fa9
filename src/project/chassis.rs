// chassis.rs - Chassis entries reachable from a project

use serde_json::Value;

/// Top-level project field holding chassis records keyed by chassis key
pub const CHASSIS_FIELD: &str = "chassis";

/// Field path of the chassis management IP address
pub const MGMT_IP_PATH: &str = "brocade-chassis/management-ip-address";

/// Borrowed view of one chassis record
#[derive(Debug, Clone, Copy)]
pub struct ChassisEntry<'a> {
    key: &'a str,
    record: &'a Value,
}

impl<'a> ChassisEntry<'a> {
    pub fn new(key: &'a str, record: &'a Value) -> Self {
        Self { key, record }
    }

    /// Stable chassis key (the chassis WWN in real captures)
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn record(&self) -> &'a Value {
        self.record
    }

    /// Look up a `/` separated field path. `None` when any segment is missing.
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.record, |node, segment| node.as_object()?.get(segment))
    }
}

/// Collect the chassis entries of a project data map in key order
pub fn entries(chassis: Option<&Value>) -> Vec<ChassisEntry<'_>> {
    match chassis.and_then(Value::as_object) {
        Some(map) => map.iter().map(|(k, v)| ChassisEntry::new(k, v)).collect(),
        None => Vec::new(),
    }
}
