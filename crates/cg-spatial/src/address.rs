//! Free-text address lookup.
//!
//! An [`AddressBook`] maps a normalized label (`"street 12, 2100 city"`
//! lowercased, commas and runs of whitespace collapsed to single spaces) to
//! an [`Address`].  Entries are kept sorted by key so both exact lookup and
//! prefix search are binary searches.

use cg_core::GeoPoint;

use crate::{SpatialError, SpatialResult};

/// A postal address with a coordinate on its street.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    pub street: String,
    pub house_number: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub pos: GeoPoint,
}

impl Address {
    pub fn new(street: impl Into<String>, pos: GeoPoint) -> Self {
        Self {
            street: street.into(),
            house_number: None,
            postcode: None,
            city: None,
            pos,
        }
    }

    pub fn with_house_number(mut self, n: impl Into<String>) -> Self {
        self.house_number = Some(n.into());
        self
    }

    pub fn with_postcode(mut self, p: impl Into<String>) -> Self {
        self.postcode = Some(p.into());
        self
    }

    pub fn with_city(mut self, c: impl Into<String>) -> Self {
        self.city = Some(c.into());
        self
    }

    /// Display form: `Street 12, 2100 City`.  Missing parts are omitted.
    pub fn label(&self) -> String {
        let mut s = self.street.clone();
        if let Some(n) = &self.house_number {
            s.push(' ');
            s.push_str(n);
        }
        let tail: Vec<&str> = [&self.postcode, &self.city]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        if !tail.is_empty() {
            s.push_str(", ");
            s.push_str(&tail.join(" "));
        }
        s
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Lowercase, treat commas as spaces, collapse whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ── AddressBook ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressBook {
    /// `(normalized label, address)`, sorted by key.
    entries: Vec<(String, Address)>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates of the same label replace earlier ones.
    pub fn from_addresses<I: IntoIterator<Item = Address>>(addresses: I) -> Self {
        let mut entries: Vec<(String, Address)> = addresses
            .into_iter()
            .map(|a| (normalize(&a.label()), a))
            .collect();
        // Stable sort, then keep the last of each run.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.reverse();
        entries.dedup_by(|a, b| a.0 == b.0);
        entries.reverse();
        Self { entries }
    }

    pub fn insert(&mut self, address: Address) {
        let key = normalize(&address.label());
        match self.entries.binary_search_by(|(k, _)| k.as_str().cmp(&key)) {
            Ok(i) => self.entries[i].1 = address,
            Err(i) => self.entries.insert(i, (key, address)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact match on the normalized text, or else the first entry the text
    /// is a whole-word prefix of (so `"main street"` finds
    /// `"main street 4, …"` but `"main str"` does not).
    pub fn find(&self, text: &str) -> Option<&Address> {
        let key = normalize(text);
        if key.is_empty() {
            return None;
        }
        let i = self.entries.partition_point(|(k, _)| k.as_str() < key.as_str());
        let (k, a) = self.entries.get(i)?;
        if *k == key {
            return Some(a);
        }
        self.entries[i..]
            .iter()
            .take_while(|(k, _)| k.starts_with(&key))
            .find(|(k, _)| k.as_bytes().get(key.len()) == Some(&b' '))
            .map(|(_, a)| a)
    }

    /// As [`find`](Self::find), but a miss is an error.
    pub fn lookup(&self, text: &str) -> SpatialResult<&Address> {
        self.find(text)
            .ok_or_else(|| SpatialError::AddressNotFound(text.to_owned()))
    }

    /// Up to `limit` entries whose normalized label starts with `prefix`, in
    /// key order.  For autocompletion.
    pub fn with_prefix(&self, prefix: &str, limit: usize) -> Vec<&Address> {
        let key = normalize(prefix);
        let i = self.entries.partition_point(|(k, _)| k.as_str() < key.as_str());
        self.entries[i..]
            .iter()
            .take_while(|(k, _)| k.starts_with(&key))
            .take(limit)
            .map(|(_, a)| a)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> + '_ {
        self.entries.iter().map(|(_, a)| a)
    }
}
