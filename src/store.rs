// src/store.rs
//! Filter state store: one `FilterState` per view session, mutated one field
//! at a time and resettable to the documented defaults.

use serde::{Deserialize, Serialize};

use crate::filter::FilterState;

/// Replacement of a single filter field. No validation beyond the value type.
///
/// Wire shape: `{"field": "keywords", "value": "steelers"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FilterUpdate {
    Keywords(String),
    Platform(String),
    ContentType(String),
    Publication(String),
    Category(String),
    Duration(String),
    SortByLikes(bool),
}

impl FilterUpdate {
    pub fn field_name(&self) -> &'static str {
        match self {
            FilterUpdate::Keywords(_) => "keywords",
            FilterUpdate::Platform(_) => "platform",
            FilterUpdate::ContentType(_) => "contentType",
            FilterUpdate::Publication(_) => "publication",
            FilterUpdate::Category(_) => "category",
            FilterUpdate::Duration(_) => "duration",
            FilterUpdate::SortByLikes(_) => "sortByLikes",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Replace one field. Returns `true` if the value actually changed.
    pub fn set(&mut self, update: FilterUpdate) -> bool {
        fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }

        let s = &mut self.state;
        match update {
            FilterUpdate::Keywords(v) => replace(&mut s.keywords, v),
            FilterUpdate::Platform(v) => replace(&mut s.platform, v),
            FilterUpdate::ContentType(v) => replace(&mut s.content_type, v),
            FilterUpdate::Publication(v) => replace(&mut s.publication, v),
            FilterUpdate::Category(v) => replace(&mut s.category, v),
            FilterUpdate::Duration(v) => replace(&mut s.duration, v),
            FilterUpdate::SortByLikes(v) => replace(&mut s.sort_by_likes, v),
        }
    }

    pub fn reset_to_defaults(&mut self) {
        self.state = FilterState::default();
    }
}
