//! The scale-out plan: an event and the groups to grow ahead of it.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// An auto-scaling group that needs to grow before an event.
///
/// Every field falls back to its zero value when absent or `null`, so a
/// missing `Growth` reads as `0` and a missing `Profile` as `""` (the default
/// profile).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutoScalingGroup {
    /// Name of the target group.
    #[serde(rename = "Name")]
    pub name: String,

    /// Number of instances to add.
    #[serde(rename = "Growth")]
    pub growth: i64,

    /// Region the group lives in.
    #[serde(rename = "Region")]
    pub region: String,

    /// Credential profile; empty means the default profile.
    #[serde(rename = "Profile", skip_serializing_if = "String::is_empty")]
    pub profile: String,
}

impl AutoScalingGroup {
    /// Create a group using the default profile.
    pub fn new(name: impl Into<String>, growth: i64, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            growth,
            region: region.into(),
            profile: String::new(),
        }
    }

    /// Set the credential profile for this group.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Whether the group uses the default profile.
    pub fn uses_default_profile(&self) -> bool {
        self.profile.is_empty()
    }
}

/// The data coming from a scale-out configuration document.
///
/// Obtain one through [`Configuration::from_slice`] or the
/// [builder](Configuration::builder); both hand back a value that already
/// passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// The event this plan is scoped to.
    #[serde(rename = "EventName")]
    pub event_name: String,

    /// Groups to grow, in document order.
    #[serde(rename = "AutoScalingGroups")]
    pub auto_scaling_groups: Vec<AutoScalingGroup>,
}

impl Configuration {
    /// Total number of instances requested across all groups.
    pub fn total_growth(&self) -> i64 {
        self.auto_scaling_groups
            .iter()
            .fold(0i64, |acc, group| acc.saturating_add(group.growth))
    }

    /// Distinct regions, in the order they first appear.
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.auto_scaling_groups
            .iter()
            .map(|group| group.region.as_str())
            .filter(|region| seen.insert(*region))
            .collect()
    }
}

// Documents are objects only: sequences are rejected rather than filled by
// position. A repeated key overwrites the earlier value, and any field given
// as `null` keeps its zero value.

#[derive(Deserialize)]
#[serde(field_identifier)]
enum ConfigurationField {
    EventName,
    AutoScalingGroups,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize)]
#[serde(field_identifier)]
enum GroupField {
    Name,
    Growth,
    Region,
    Profile,
    #[serde(other)]
    Unknown,
}

struct ConfigurationVisitor;

impl<'de> Visitor<'de> for ConfigurationVisitor {
    type Value = Configuration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration object")
    }

    // A `null` document decodes to the empty configuration
    fn visit_none<E: de::Error>(self) -> Result<Configuration, E> {
        Ok(Configuration::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Configuration, E> {
        Ok(Configuration::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Configuration, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Configuration, A::Error> {
        let mut configuration = Configuration::default();
        while let Some(field) = map.next_key()? {
            match field {
                ConfigurationField::EventName => {
                    configuration.event_name = next_or_default(&mut map)?;
                }
                ConfigurationField::AutoScalingGroups => {
                    configuration.auto_scaling_groups = next_or_default(&mut map)?;
                }
                ConfigurationField::Unknown => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(configuration)
    }
}

impl<'de> Deserialize<'de> for Configuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(ConfigurationVisitor)
    }
}

struct GroupVisitor;

impl<'de> Visitor<'de> for GroupVisitor {
    type Value = AutoScalingGroup;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an auto-scaling group object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AutoScalingGroup, A::Error> {
        let mut group = AutoScalingGroup::default();
        while let Some(field) = map.next_key()? {
            match field {
                GroupField::Name => group.name = next_or_default(&mut map)?,
                GroupField::Growth => group.growth = next_or_default(&mut map)?,
                GroupField::Region => group.region = next_or_default(&mut map)?,
                GroupField::Profile => group.profile = next_or_default(&mut map)?,
                GroupField::Unknown => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(group)
    }
}

impl<'de> Deserialize<'de> for AutoScalingGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GroupVisitor)
    }
}

/// Read the next map value, treating `null` like an absent field.
fn next_or_default<'de, A, T>(map: &mut A) -> Result<T, A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(map.next_value::<Option<T>>()?.unwrap_or_default())
}
