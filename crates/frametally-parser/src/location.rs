//! Canonical location parser.
//!
//! The facility work order is a block of `name: value` lines. A `name:`
//! line with nothing after the colon opens a list, and the bare lines
//! that follow are appended to it until another list is opened. The
//! `Location` list is the set of canonical paths reconciled against
//! station logs.
//!
//! ```text
//! Xytech Workorder 1109
//!
//! Producer: Joan Jett
//! Operator: John Doe
//!
//! Location:
//! /hpsans13/production/Dune2/reel1/partA/1920x1080
//! /hpsans12/production/Dune2/reel1/VFX/Hydraulx
//! ```

use crate::ParseError;

/// Attribute holding the canonical locations.
pub const LOCATION_ATTRIBUTE: &str = "Location";

/// Value of one work-order attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Scalar(String),
    List(Vec<String>),
}

impl AttributeValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

/// Parsed work order: attributes in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalRecord {
    attributes: Vec<(String, AttributeValue)>,
}

impl CanonicalRecord {
    /// Look up an attribute by exact name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.position(name).map(|idx| &self.attributes[idx].1)
    }

    /// Canonical locations in source order, empty when the work order has none.
    pub fn locations(&self) -> &[String] {
        self.get(LOCATION_ATTRIBUTE)
            .and_then(AttributeValue::as_list)
            .unwrap_or_default()
    }

    /// Scalar attributes in source order.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter_map(|(name, value)| value.as_scalar().map(|v| (name.as_str(), v)))
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|(n, _)| n == name)
    }

    fn push(&mut self, name: &str, value: AttributeValue) -> usize {
        self.attributes.push((name.to_string(), value));
        self.attributes.len() - 1
    }
}

/// Parse a facility work order into a [`CanonicalRecord`].
///
/// Returns [`ParseError::EmptyInput`] for blank text. Everything else parses;
/// lines that fit no rule are ignored.
///
/// # Examples
///
/// ```
/// use frametally_parser::parse_locations;
///
/// let record = parse_locations("Producer: Joan Jett\nLocation:\n/a/b/c/d\n/a/b/c/e\n").unwrap();
/// assert_eq!(record.locations(), ["/a/b/c/d", "/a/b/c/e"]);
/// assert_eq!(record.get("Producer").and_then(|v| v.as_scalar()), Some("Joan Jett"));
/// ```
pub fn parse_locations(text: &str) -> Result<CanonicalRecord, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput("canonical location text"));
    }

    let mut record = CanonicalRecord::default();
    // Index of the list attribute currently receiving bare lines.
    let mut open: Option<usize> = None;

    for line in text.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            let value = line.trim();
            if value.is_empty() {
                continue;
            }
            if let Some(AttributeValue::List(items)) = open.map(|idx| &mut record.attributes[idx].1)
            {
                items.push(value.to_string());
            }
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            tracing::trace!(line, "Skipping attribute line without a name");
            continue;
        }

        let rest = rest.trim();
        if rest.is_empty() {
            open = match record.position(name) {
                Some(idx) => matches!(record.attributes[idx].1, AttributeValue::List(_))
                    .then_some(idx),
                None => Some(record.push(name, AttributeValue::List(Vec::new()))),
            };
        } else if record.position(name).is_none() {
            record.push(name, AttributeValue::Scalar(rest.to_string()));
        }
    }

    tracing::debug!(
        attributes = record.len(),
        locations = record.locations().len(),
        "Parsed canonical locations"
    );

    Ok(record)
}
