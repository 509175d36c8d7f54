// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A catalog song resource, kept exactly as the backend sent it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Song(pub Value);

impl Song {
    /// Catalog ID, when the resource carries one.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Resource type (e.g., "songs", "library-songs").
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Album or playlist resource that may embed its tracks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Collection {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub relationships: Option<Relationships>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Relationships {
    #[serde(default)]
    pub tracks: Option<TrackRelationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrackRelationship {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<Song>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Song>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Song>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Tracks embedded in a collection, or an empty slice when the collection,
/// its relationships, or its track relationship is absent.
pub fn songs_from_collection(collection: Option<&Collection>) -> &[Song] {
    collection
        .and_then(|collection| collection.relationships.as_ref())
        .and_then(|relationships| relationships.tracks.as_ref())
        .map(|tracks| tracks.data.as_slice())
        .unwrap_or(&[])
}
