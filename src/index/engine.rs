use super::types::Record;
use std::collections::{HashMap, HashSet};

/// Inverted index paired with the attribute store that owns the
/// authoritative copy of each record's attributes.
///
/// Both structures are mutated together by `add`/`remove`; callers that
/// share an `Index` across tasks must serialize writers (one RwLock domain)
/// because the two maps are not updated atomically at the data-structure
/// level.
#[derive(Debug)]
pub struct Index {
    /// attribute name -> attribute value -> record ids
    pub(crate) inverted: HashMap<String, HashMap<String, HashSet<String>>>,
    /// record id -> attributes
    pub(crate) attributes: HashMap<String, HashMap<String, String>>,
}

impl Index {
    pub fn new() -> Self {
        Self {
            inverted: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    /// Number of records currently indexed.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Inserts a record into every `(attribute, value)` bucket it matches,
    /// then stores its attributes. Re-adding an identical record is a no-op.
    pub fn add(&mut self, record: Record) {
        for (attr, value) in &record.attributes {
            self.inverted
                .entry(attr.clone())
                .or_default()
                .entry(value.clone())
                .or_default()
                .insert(record.id.clone());
        }

        self.attributes.insert(record.id, record.attributes);
    }

    /// Deletes a record from every bucket named by its attributes, pruning
    /// buckets that drain, then drops its attribute-store entry.
    ///
    /// The attributes passed in must be the ones the record was added with;
    /// callers obtain them with `get` first, never reconstruct them.
    pub fn remove(&mut self, record: &Record) {
        for (attr, value) in &record.attributes {
            if let Some(values) = self.inverted.get_mut(attr) {
                if let Some(ids) = values.get_mut(value) {
                    ids.remove(&record.id);
                    if ids.is_empty() {
                        values.remove(value);
                    }
                }
                if values.is_empty() {
                    self.inverted.remove(attr);
                }
            }
        }

        self.attributes.remove(&record.id);
    }

    /// Returns the record for an id. Unknown ids yield a record with empty
    /// attributes, not an error.
    pub fn get(&self, id: &str) -> Record {
        Record {
            id: id.to_string(),
            attributes: self.attributes.get(id).cloned().unwrap_or_default(),
        }
    }

    /// Returns the attribute map for an id, if the id is known.
    pub fn get_attributes(&self, id: &str) -> Option<&HashMap<String, String>> {
        self.attributes.get(id)
    }

    /// Returns records touched while validating that every `(attribute,
    /// value)` predicate has a populated bucket.
    ///
    /// The moment any predicate's attribute or value is absent the result is
    /// empty. When every predicate matches, the result is the union of the
    /// visited buckets, not their intersection, and may contain the same
    /// record more than once.
    pub fn search_every(&self, query: &HashMap<String, String>) -> Vec<Record> {
        let mut result = Vec::new();
        for (attr, value) in query {
            let Some(values) = self.inverted.get(attr) else {
                return Vec::new();
            };
            let Some(ids) = values.get(value) else {
                return Vec::new();
            };
            for id in ids {
                result.push(self.get(id));
            }
        }

        result
    }

    /// Returns the union of records matching any `(attribute, value)`
    /// predicate. Predicates without a bucket are skipped.
    pub fn search_any(&self, query: &HashMap<String, String>) -> Vec<Record> {
        let mut result = Vec::new();
        for (attr, value) in query {
            let Some(values) = self.inverted.get(attr) else {
                continue;
            };
            let Some(ids) = values.get(value) else {
                continue;
            };
            for id in ids {
                result.push(self.get(id));
            }
        }

        result
    }

    /// Returns every record carrying every named attribute, under any value.
    /// Any attribute absent from the index empties the result immediately.
    pub fn search_all(&self, attrs: &[String]) -> Vec<Record> {
        let mut result = Vec::new();
        for attr in attrs {
            let Some(values) = self.inverted.get(attr) else {
                return Vec::new();
            };
            for ids in values.values() {
                for id in ids {
                    result.push(self.get(id));
                }
            }
        }

        result
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}
