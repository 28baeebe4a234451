//! Printer destinations and the policy that picks one.

use std::fmt;

use crate::PrintError;

/// Where a destination lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DestinationKind {
    /// A queue managed by the local spooler (CUPS).
    Queue,
    /// A printer reached directly over raw TCP.
    Network,
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::Queue => write!(f, "queue"),
            DestinationKind::Network => write!(f, "network"),
        }
    }
}

/// An addressable printer endpoint as reported by a subsystem.
///
/// Opaque to callers: only the subsystem that listed it knows how to open
/// it. Listings are taken fresh for each print attempt and never cached
/// across documents, since printers come and go between runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    name: String,
    kind: DestinationKind,
}

impl Destination {
    /// A spooler queue called `name`.
    pub fn queue(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DestinationKind::Queue,
        }
    }

    /// A network printer called `name`.
    pub fn network(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DestinationKind::Network,
        }
    }

    /// Name as reported by the subsystem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of endpoint.
    pub fn kind(&self) -> DestinationKind {
        self.kind
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// How a sink chooses among the listed destinations.
///
/// Subsystem ordering is opaque, so [`DestinationSelector::First`] is only
/// correct when a single printer is attached. Name the printer whenever
/// more than one may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DestinationSelector {
    /// Whatever the subsystem lists first.
    #[default]
    First,
    /// The destination with exactly this name.
    Named(String),
}

impl DestinationSelector {
    /// `Named` when a name is given, `First` otherwise.
    pub fn from_name(name: Option<&str>) -> Self {
        name.map_or(Self::First, |n| Self::Named(n.to_string()))
    }

    /// Pick a destination from a fresh listing.
    ///
    /// An empty listing is [`PrintError::NoDestination`] regardless of the
    /// policy; a missing name is [`PrintError::UnknownDestination`].
    pub fn select<'a>(
        &self,
        destinations: &'a [Destination],
    ) -> Result<&'a Destination, PrintError> {
        let first = destinations.first().ok_or(PrintError::NoDestination)?;
        match self {
            DestinationSelector::First => Ok(first),
            DestinationSelector::Named(name) => destinations
                .iter()
                .find(|d| d.name == *name)
                .ok_or_else(|| PrintError::UnknownDestination(name.clone())),
        }
    }
}

impl fmt::Display for DestinationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationSelector::First => write!(f, "first listed"),
            DestinationSelector::Named(name) => write!(f, "'{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<Destination> {
        vec![
            Destination::queue("Zebra_ZD420"),
            Destination::network("workshop"),
        ]
    }

    #[test]
    fn first_takes_index_zero() {
        let dests = listing();
        let chosen = DestinationSelector::First.select(&dests).unwrap();
        assert_eq!(chosen.name(), "Zebra_ZD420");
        assert_eq!(chosen.kind(), DestinationKind::Queue);
    }

    #[test]
    fn named_finds_exact_match() {
        let dests = listing();
        let chosen = DestinationSelector::Named("workshop".into())
            .select(&dests)
            .unwrap();
        assert_eq!(chosen, &Destination::network("workshop"));
    }

    #[test]
    fn named_missing_is_unknown() {
        let dests = listing();
        match DestinationSelector::Named("Workshop".into()).select(&dests) {
            Err(PrintError::UnknownDestination(name)) => assert_eq!(name, "Workshop"),
            other => panic!("expected UnknownDestination, got {other:?}"),
        }
    }

    #[test]
    fn empty_listing_is_no_destination_for_every_policy() {
        assert!(matches!(
            DestinationSelector::First.select(&[]),
            Err(PrintError::NoDestination)
        ));
        assert!(matches!(
            DestinationSelector::Named("x".into()).select(&[]),
            Err(PrintError::NoDestination)
        ));
    }

    #[test]
    fn from_name() {
        assert_eq!(DestinationSelector::from_name(None), DestinationSelector::First);
        assert_eq!(
            DestinationSelector::from_name(Some("zebra")),
            DestinationSelector::Named("zebra".into())
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_name_and_kind() {
        let json = serde_json::to_value(Destination::network("workshop")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "workshop", "kind": "network"}));
    }
}
