// traits.rs - Adapter boundary for the aggregate project record

use serde_json::{Map, Value};
use std::fmt::Debug;

use super::chassis::ChassisEntry;

/// The consolidated project a merge run accumulates into.
///
/// Everything the tools need from the project model goes through this
/// trait: folding a parsed document in, serializing back out, walking
/// chassis entries and carrying the run's error/warning flags.
pub trait AggregateRecord: Debug {
    /// Fold one parsed capture document into the aggregate.
    /// `source` names the document for provenance and diagnostics.
    fn merge_into(&mut self, source: &str, document: Map<String, Value>);

    /// Convert the aggregate back into a plain JSON document
    fn serialize(&self) -> Value;

    /// Chassis entries in stable key order
    fn chassis(&self) -> Vec<ChassisEntry<'_>>;

    /// Record an error against the project
    fn set_error(&mut self, message: &str);

    /// Record a warning against the project
    fn set_warning(&mut self, message: &str);

    fn has_error(&self) -> bool;

    fn has_warning(&self) -> bool;

    fn name(&self) -> &str;
}
