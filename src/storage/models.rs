//! Document models exchanged with the store.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::{
    AccidentType, CasualtyCount, Coordinate, Severity, VehicleCount, INITIAL_STATUS,
};

/// One stored document as delivered by a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub id: String,
    pub data: Value,
}

impl DocumentSnapshot {
    pub fn new(id: &str, data: Value) -> Self {
        Self {
            id: id.to_string(),
            data,
        }
    }
}

/// The full matching set of a live query at one instant, in delivery
/// order. Never a diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub docs: Vec<DocumentSnapshot>,
}

impl Snapshot {
    pub fn new(docs: Vec<DocumentSnapshot>) -> Self {
        Self { docs }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// A report about to be created. The store assigns the identifier and the
/// creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub severity: Severity,
    pub accident_type: AccidentType,
    pub vehicles_involved: VehicleCount,
    pub casualties: CasualtyCount,
    pub location: Coordinate,
}

impl NewReport {
    /// Stored document body, in the field names the apps read back.
    pub fn to_document(&self) -> Value {
        json!({
            "severity": self.severity.as_ref(),
            "casualties": self.casualties.as_ref(),
            "accidentType": self.accident_type.as_ref(),
            "vehiclesInvolved": self.vehicles_involved.as_ref(),
            "location": {
                "latitude": self.location.latitude,
                "longitude": self.location.longitude,
            },
            "status": INITIAL_STATUS,
        })
    }
}
