//! Case-insensitive set of advertiser names.
//!
//! Names compare and hash by their lower-cased form, while the set keeps the
//! spelling of the first insertion for display.

use hashbrown::hash_map::{Entry, HashMap, IntoValues};
use serde::{Serialize, Serializer};

/// Folds a string into its case-insensitive lookup key.
///
/// Folding is per character, so a letter folds the same way wherever it
/// sits in the word (`str::to_lowercase` special-cases a final sigma).
pub(crate) fn fold(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// A set of advertiser names with case-insensitive membership.
///
/// Inserting `"Yandex"` and then `"YANDEX"` leaves a single entry spelled
/// `"Yandex"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertiserSet {
    /// Folded name mapped to the name as first inserted
    names: HashMap<String, String>,
}

impl AdvertiserSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name to the set.
    ///
    /// # Returns
    ///
    /// `true` if no name with the same folded form was present.
    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        let name = name.into();
        match self.names.entry(fold(&name)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(name);
                true
            }
        }
    }

    /// Checks membership ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&fold(name))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the stored names in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.values().map(String::as_str)
    }

    /// Unions `other` into this set. Names already present keep their spelling.
    pub fn extend_from(&mut self, other: &AdvertiserSet) {
        for (key, name) in &other.names {
            self.names
                .entry(key.clone())
                .or_insert_with(|| name.clone());
        }
    }

    /// Returns the names ordered case-insensitively.
    pub fn sorted(&self) -> Vec<&str> {
        let mut entries: Vec<(&String, &String)> = self.names.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, name)| name.as_str()).collect()
    }

    /// Consumes the set, returning the names ordered case-insensitively.
    pub fn into_sorted(self) -> Vec<String> {
        let mut entries: Vec<(String, String)> = self.names.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, name)| name).collect()
    }
}

impl<S: Into<String>> Extend<S> for AdvertiserSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for AdvertiserSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for AdvertiserSet {
    type Item = String;
    type IntoIter = IntoValues<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_values()
    }
}

impl Serialize for AdvertiserSet {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.sorted())
    }
}
