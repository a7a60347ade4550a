mod family;
mod global;
pub mod op;
mod values;

pub use {
    family::{ConditionType, ValueType},
    global::GlobalConditionKey,
    op::{condop, ArnCmp, ConditionOp, Operator, OrderCmp, SetQualifier, StringCmp},
    values::{Binary, ConditionValue},
};

use {
    crate::serutil::StringList,
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        collections::{btree_map::Iter, BTreeMap},
        ops::Index,
    },
};

/// The operator and values attached to a single condition key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionEntry {
    operator: Operator,
    values: StringList,
}

impl ConditionEntry {
    pub fn new<O: Into<Operator>, V: Into<StringList>>(operator: O, values: V) -> Self {
        Self {
            operator: operator.into(),
            values: values.into(),
        }
    }

    #[inline]
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    #[inline]
    pub fn values(&self) -> &StringList {
        &self.values
    }
}

/// The conditions of a statement, indexed by condition key.
///
/// Each key holds exactly one operator and value list; inserting a key that is already present replaces the prior
/// entry. In a policy document conditions are grouped by operator, so serialization regroups the entries as
/// `{"Operator": {"key": values}}`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Conditions {
    map: BTreeMap<String, ConditionEntry>,
}

display_json!(Conditions);
from_str_json!(Conditions);

impl Conditions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the entry for `key`, returning the entry it replaced.
    pub fn insert<K: Into<String>>(&mut self, key: K, entry: ConditionEntry) -> Option<ConditionEntry> {
        let key = key.into();
        let previous = self.map.insert(key.clone(), entry);
        if let Some(previous) = &previous {
            log::trace!("Condition on {} replaced; previous operator was {}", key, previous.operator);
        }
        previous
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&ConditionEntry> {
        self.map.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<ConditionEntry> {
        self.map.remove(key)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, ConditionEntry> {
        self.map.iter()
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// The entries regrouped by operator, as they appear in a policy document.
    pub fn by_operator(&self) -> BTreeMap<String, BTreeMap<&str, &StringList>> {
        let mut result: BTreeMap<String, BTreeMap<&str, &StringList>> = BTreeMap::new();
        for (key, entry) in &self.map {
            result.entry(entry.operator.to_string()).or_default().insert(key.as_str(), &entry.values);
        }
        result
    }
}

impl Index<&str> for Conditions {
    type Output = ConditionEntry;

    fn index(&self, key: &str) -> &ConditionEntry {
        &self.map[key]
    }
}

impl<'a> IntoIterator for &'a Conditions {
    type Item = (&'a String, &'a ConditionEntry);
    type IntoIter = Iter<'a, String, ConditionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ConditionEntry)> for Conditions {
    fn from_iter<I: IntoIterator<Item = (K, ConditionEntry)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (key, entry) in iter {
            result.insert(key, entry);
        }
        result
    }
}

impl<'de> Deserialize<'de> for Conditions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grouped = BTreeMap::<String, BTreeMap<String, StringList>>::deserialize(deserializer)?;
        let mut result = Self::new();

        for (operator, keys) in grouped {
            let operator = Operator::from(operator);
            for (key, values) in keys {
                if result.contains_key(&key) {
                    log::debug!("Condition key {} appears under more than one operator; keeping {}", key, operator);
                }
                result.insert(key, ConditionEntry::new(operator.clone(), values));
            }
        }

        Ok(result)
    }
}

impl Serialize for Conditions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.by_operator().serialize(serializer)
    }
}
