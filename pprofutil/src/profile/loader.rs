//! JSON profile loading
//!
//! The JSON layout mirrors `profile.proto`, with string table indices
//! already resolved and references expressed as ids:
//!
//! ```json
//! {
//!   "sample_type": [{"type": "samples", "unit": "count"},
//!                   {"type": "cpu", "unit": "nanoseconds"}],
//!   "function": [{"id": 1, "name": "main.main", "filename": "main.go"}],
//!   "location": [{"id": 1, "address": 4198400,
//!                 "line": [{"function_id": 1, "line": 12}]}],
//!   "sample": [{"location_id": [1], "value": [1, 10000000]}]
//! }
//! ```

use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::model::{Function, Line, Location, Profile, RawSample, ValueType};
use crate::domain::ProfileError;

#[derive(Debug, Deserialize)]
struct ProfileDoc {
    #[serde(default)]
    sample_type: Vec<ValueTypeDoc>,
    #[serde(default)]
    sample: Vec<SampleDoc>,
    #[serde(default)]
    location: Vec<LocationDoc>,
    #[serde(default)]
    function: Vec<FunctionDoc>,
}

#[derive(Debug, Deserialize)]
struct ValueTypeDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Deserialize)]
struct FunctionDoc {
    id: u64,
    name: String,
    #[serde(default)]
    system_name: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    start_line: i64,
}

#[derive(Debug, Deserialize)]
struct LocationDoc {
    id: u64,
    #[serde(default)]
    address: u64,
    #[serde(default)]
    line: Vec<LineDoc>,
}

#[derive(Debug, Deserialize)]
struct LineDoc {
    function_id: u64,
    #[serde(default)]
    line: i64,
}

#[derive(Debug, Deserialize)]
struct SampleDoc {
    #[serde(default)]
    location_id: Vec<u64>,
    #[serde(default)]
    value: Vec<i64>,
}

impl Profile {
    /// Load a JSON profile from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// refers to functions/locations that are not defined.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let profile = Self::from_json_str(&content)?;
        info!(
            "Loaded {} ({} samples, {} locations, {} functions)",
            path.display(),
            profile.sample.len(),
            profile.location.len(),
            profile.function.len()
        );
        Ok(profile)
    }

    /// Parse a JSON profile and link ids into the object graph.
    ///
    /// # Errors
    /// Returns an error on malformed JSON, duplicate ids, or dangling
    /// function/location references.
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let doc: ProfileDoc = serde_json::from_str(json)?;
        link(doc)
    }
}

fn link(doc: ProfileDoc) -> Result<Profile, ProfileError> {
    let mut functions = HashMap::with_capacity(doc.function.len());
    let mut function_table = Vec::with_capacity(doc.function.len());
    for f in doc.function {
        let function = Arc::new(Function {
            id: f.id,
            name: f.name,
            system_name: f.system_name,
            filename: f.filename,
            start_line: f.start_line,
        });
        if functions.insert(f.id, Arc::clone(&function)).is_some() {
            return Err(ProfileError::DuplicateId { kind: "function", id: f.id });
        }
        function_table.push(function);
    }

    let mut locations = HashMap::with_capacity(doc.location.len());
    let mut location_table = Vec::with_capacity(doc.location.len());
    for loc in doc.location {
        let line = loc
            .line
            .into_iter()
            .map(|l| {
                let function = functions.get(&l.function_id).ok_or(ProfileError::UnknownFunction {
                    location: loc.id,
                    function: l.function_id,
                })?;
                Ok(Line { function: Arc::clone(function), line: l.line })
            })
            .collect::<Result<Vec<_>, ProfileError>>()?;
        let location = Arc::new(Location { id: loc.id, address: loc.address, line });
        if locations.insert(loc.id, Arc::clone(&location)).is_some() {
            return Err(ProfileError::DuplicateId { kind: "location", id: loc.id });
        }
        location_table.push(location);
    }

    let sample = doc
        .sample
        .into_iter()
        .enumerate()
        .map(|(idx, s)| {
            let location = s
                .location_id
                .iter()
                .map(|id| {
                    locations
                        .get(id)
                        .map(Arc::clone)
                        .ok_or(ProfileError::UnknownLocation { sample: idx, location: *id })
                })
                .collect::<Result<Vec<_>, ProfileError>>()?;
            Ok(RawSample { value: s.value, location })
        })
        .collect::<Result<Vec<_>, ProfileError>>()?;

    debug!("Linked {} samples against {} locations", sample.len(), location_table.len());

    Ok(Profile {
        sample_type: doc
            .sample_type
            .into_iter()
            .map(|vt| ValueType { kind: vt.kind, unit: vt.unit })
            .collect(),
        sample,
        location: location_table,
        function: function_table,
    })
}
