//! Last published value per topic.
//!
//! The key space is bounded by the publish topic catalog, so entries are
//! never evicted.

use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteCache {
    values: HashMap<String, String>,
}

impl WriteCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `value` is what was last published on `topic`.
    #[must_use]
    pub fn is_current(&self, topic: &str, value: &str) -> bool {
        self.values.get(topic).is_some_and(|current| current == value)
    }

    /// Records `value` for `topic`, returning the previous value.
    pub fn update(&mut self, topic: &str, value: &str) -> Option<String> {
        self.values.insert(topic.to_owned(), value.to_owned())
    }

    /// Puts back the value returned by an earlier [`update`](Self::update).
    pub fn restore(&mut self, topic: &str, previous: Option<String>) {
        match previous {
            Some(value) => {
                self.values.insert(topic.to_owned(), value);
            }
            None => {
                self.values.remove(topic);
            }
        }
    }

    #[must_use]
    pub fn get(&self, topic: &str) -> Option<&str> {
        self.values.get(topic).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
