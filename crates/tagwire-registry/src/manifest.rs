use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagwire_frame::FieldSpec;

use crate::error::Result;
use crate::id::ProtocolId;

/// Language-neutral description of a registry's bindings.
///
/// Every runtime speaking a protocol can emit one; two manifests that
/// [`diff`](Self::diff) clean describe the same wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolManifest {
    pub protocols: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: ProtocolId,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ManifestField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestField {
    pub name: String,
    #[serde(rename = "type")]
    pub wire_type: String,
}

impl From<FieldSpec> for ManifestField {
    fn from(spec: FieldSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            wire_type: spec.wire_type,
        }
    }
}

impl ProtocolManifest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Entry for `id`, if bound.
    pub fn get(&self, id: ProtocolId) -> Option<&ManifestEntry> {
        self.protocols.iter().find(|entry| entry.id == id)
    }

    /// Human-readable differences from `other`, ordered by protocol id.
    ///
    /// Empty when both manifests bind the same ids to the same names and
    /// field layouts.
    pub fn diff(&self, other: &ProtocolManifest) -> Vec<String> {
        let ours = self.by_id();
        let theirs = other.by_id();

        let mut ids: Vec<ProtocolId> = ours.keys().chain(theirs.keys()).copied().collect();
        ids.sort_unstable();
        ids.dedup();

        let mut mismatches = Vec::new();
        for id in ids {
            match (ours.get(&id), theirs.get(&id)) {
                (Some(a), None) => {
                    mismatches.push(format!("id {id}: {} missing on remote side", a.name));
                }
                (None, Some(b)) => {
                    mismatches.push(format!("id {id}: {} missing on local side", b.name));
                }
                (Some(a), Some(b)) => {
                    if a.name != b.name {
                        mismatches.push(format!("id {id}: bound to {} and {}", a.name, b.name));
                    } else if a.fields != b.fields {
                        mismatches.push(format!(
                            "id {id}: {} fields differ: [{}] vs [{}]",
                            a.name,
                            describe(&a.fields),
                            describe(&b.fields)
                        ));
                    }
                }
                (None, None) => {}
            }
        }
        mismatches
    }

    fn by_id(&self) -> BTreeMap<ProtocolId, &ManifestEntry> {
        self.protocols.iter().map(|entry| (entry.id, entry)).collect()
    }
}

fn describe(fields: &[ManifestField]) -> String {
    fields
        .iter()
        .map(|field| format!("{}: {}", field.name, field.wire_type))
        .collect::<Vec<_>>()
        .join(", ")
}
