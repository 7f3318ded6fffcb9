//! Field access for flat input records.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A flat record: a mapping from field name to value.
///
/// Builds read identifiers, names and weights through [`Record::get`] and
/// copy every other field from [`Record::fields`], in the order it yields.
pub trait Record {
    /// Look up a single field.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Iterate over all fields.
    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn get(&self, key: &str) -> Option<&Value> {
        (**self).get(key)
    }

    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        (**self).fields()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn get(&self, key: &str) -> Option<&Value> {
        (**self).get(key)
    }

    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        (**self).fields()
    }
}

impl Record for Map<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }

    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// Only objects carry fields; any other value is an empty record.
impl Record for Value {
    fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        match self.as_object() {
            Some(map) => map.fields(),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<S: BuildHasher> Record for IndexMap<String, Value, S> {
    fn get(&self, key: &str) -> Option<&Value> {
        IndexMap::get(self, key)
    }

    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl Record for BTreeMap<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        BTreeMap::get(self, key)
    }

    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// Extra attributes come out in the map's iteration order, which is unspecified.
impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn get(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key)
    }

    fn fields(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}
