//! Named profile lookup.
//!
//! Profiles are loaded once, either from literal data or from a JSON/TOML
//! document, and never change afterwards.
//!
//! ```toml
//! [[profiles]]
//! name = "red"
//! elevations = [4, 2, 0, 0, 3]
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::profile::HeightProfile;

/// Elevations of the red path in the two-ramp scenario.
pub const RED_PATH: [f64; 18] = [
    4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 3.0,
];

/// Elevations of the blue path in the two-ramp scenario.
pub const BLUE_PATH: [f64; 18] = [
    4.0, 3.5, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0,
];

/// Holds height profiles by name.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: BTreeMap<String, HeightProfile>,
}

#[derive(Deserialize)]
struct ProfileDocument {
    profiles: Vec<ProfileEntry>,
}

#[derive(Deserialize)]
struct ProfileEntry {
    name: String,
    elevations: Vec<f64>,
}

impl ProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The red and blue paths: both start at 4 and end at 3.
    pub fn canonical() -> Self {
        Self::new()
            .with_profile(HeightProfile::from_literal("red", &RED_PATH))
            .with_profile(HeightProfile::from_literal("blue", &BLUE_PATH))
    }

    /// Adds a profile, replacing any earlier profile with the same name.
    pub fn with_profile(mut self, profile: HeightProfile) -> Self {
        self.profiles.insert(profile.name().to_string(), profile);
        self
    }

    /// Builds a store from a sequence of profiles.
    pub fn from_profiles(profiles: impl IntoIterator<Item = HeightProfile>) -> Self {
        profiles.into_iter().fold(Self::new(), Self::with_profile)
    }

    /// Parses a JSON profile document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfileDocument`] for malformed JSON, or the
    /// validation error of the first invalid profile.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let doc: ProfileDocument =
            serde_json::from_str(input).map_err(|e| Error::ProfileDocument(e.to_string()))?;
        Self::from_document(doc)
    }

    /// Parses a TOML profile document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfileDocument`] for malformed TOML, or the
    /// validation error of the first invalid profile.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let doc: ProfileDocument =
            toml::from_str(input).map_err(|e| Error::ProfileDocument(e.to_string()))?;
        Self::from_document(doc)
    }

    fn from_document(doc: ProfileDocument) -> Result<Self> {
        let profiles = doc
            .profiles
            .into_iter()
            .map(|entry| HeightProfile::new(entry.name, entry.elevations))
            .collect::<Result<Vec<_>>>()?;
        debug!(profiles.count = profiles.len(), "Loaded profile document");
        Ok(Self::from_profiles(profiles))
    }

    /// Looks up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no profile has this name.
    pub fn get_profile(&self, name: &str) -> Result<&HeightProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Profiles in name order.
    pub fn iter(&self) -> impl Iterator<Item = &HeightProfile> {
        self.profiles.values()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no profiles are loaded.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_profiles() {
        let store = ProfileStore::canonical();
        assert_eq!(store.len(), 2);
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["blue", "red"]);

        let red = store.get_profile("red").unwrap();
        assert_eq!(red.len(), 18);
        assert_eq!(red.elevations()[1], 2.0);

        let blue = store.get_profile("blue").unwrap();
        assert!(red.shares_endpoints_with(blue, 0.0));
    }

    #[test]
    fn test_not_found() {
        let store = ProfileStore::canonical();
        assert_eq!(
            store.get_profile("green").unwrap_err(),
            Error::NotFound("green".to_string())
        );
    }

    #[test]
    fn test_empty_store() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        assert!(store.get_profile("red").is_err());
    }

    #[test]
    fn test_later_profile_replaces_earlier() {
        let store = ProfileStore::new()
            .with_profile(HeightProfile::new("x", vec![1.0, 0.0]).unwrap())
            .with_profile(HeightProfile::new("x", vec![2.0, 0.0]).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_profile("x").unwrap().start_elevation(), 2.0);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"profiles": [
            {"name": "steep", "elevations": [5, 0, 0]},
            {"name": "gentle", "elevations": [5, 4, 3, 2, 1, 0]}
        ]}"#;
        let store = ProfileStore::from_json_str(json).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_profile("gentle").unwrap().len(), 6);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            [[profiles]]
            name = "drop"
            elevations = [2.0, 1.0, 0.0]
        "#;
        let store = ProfileStore::from_toml_str(toml).unwrap();
        assert_eq!(store.get_profile("drop").unwrap().end_elevation(), 0.0);
    }

    #[test]
    fn test_malformed_document() {
        let err = ProfileStore::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::ProfileDocument(_)));
    }

    #[test]
    fn test_document_with_invalid_profile() {
        let json = r#"{"profiles": [{"name": "hole", "elevations": [1, -2]}]}"#;
        let err = ProfileStore::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::InvalidElevation { index: 1, .. }));
    }
}
