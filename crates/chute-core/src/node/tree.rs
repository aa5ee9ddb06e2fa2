//! The config node tree.
//!
//! A [`ConfigNode`] is the in-memory form of a game `.cfg` file.  Each node
//! has a name, an ordered list of `key = value` pairs and an ordered list of
//! child nodes.  The root node of a file is unnamed; its children are the
//! top-level blocks such as `REALCHUTE_SETTINGS`.
//!
//! Keys are not unique.  Lookups return the first match, which is how the
//! game resolves duplicates as well.

use super::value::{ConfigValue, ValueError};

/// One node of a config tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    name: String,
    values: Vec<(String, String)>,
    nodes: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Creates an unnamed root node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty node with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All `key = value` pairs in insertion order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All child nodes in insertion order.
    pub fn nodes(&self) -> &[ConfigNode] {
        &self.nodes
    }

    /// Returns `true` when the node holds neither values nor children.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.nodes.is_empty()
    }

    // ── Values ────────────────────────────────────────────────────────────────

    /// Appends a typed value.  Existing values with the same key are kept.
    pub fn add_value<T: ConfigValue>(&mut self, key: &str, value: T) {
        self.add_raw(key, value.to_config_string());
    }

    /// Appends a value without any conversion.
    pub fn add_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    /// Replaces the first value stored under `key`, or appends it if absent.
    pub fn set_value<T: ConfigValue>(&mut self, key: &str, value: T) {
        let text = value.to_config_string();
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = text,
            None => self.values.push((key.to_string(), text)),
        }
    }

    /// Returns the raw text of the first value stored under `key`.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `key`, in order.
    pub fn get_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.values.iter().any(|(k, _)| k == key)
    }

    /// Reads and converts the first value stored under `key`.
    ///
    /// Returns `None` when the key is absent and `Some(Err(_))` when it is
    /// present but does not parse as `T`.
    pub fn get_parsed<T: ConfigValue>(&self, key: &str) -> Option<Result<T, ValueError>> {
        self.get_value(key).map(T::from_config_str)
    }

    /// Reads and converts the first value stored under `key`, treating a
    /// value that fails to parse the same as a missing one.
    pub fn try_get_value<T: ConfigValue>(&self, key: &str) -> Option<T> {
        self.get_parsed(key).and_then(Result::ok)
    }

    /// Removes every value stored under `key`.  Returns how many were removed.
    pub fn remove_value(&mut self, key: &str) -> usize {
        let before = self.values.len();
        self.values.retain(|(k, _)| k != key);
        before - self.values.len()
    }

    /// Removes all values, keeping child nodes.
    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    // ── Child nodes ───────────────────────────────────────────────────────────

    /// Appends a child node.
    pub fn add_node(&mut self, node: ConfigNode) {
        self.nodes.push(node);
    }

    /// Returns the first child node called `name`.
    pub fn get_node(&self, name: &str) -> Option<&ConfigNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Mutable variant of [`get_node`](Self::get_node).
    pub fn get_node_mut(&mut self, name: &str) -> Option<&mut ConfigNode> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    /// Returns every child node called `name`, in order.
    pub fn get_nodes<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> + 'a {
        self.nodes.iter().filter(move |n| n.name == name)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name == name)
    }

    /// Removes all child nodes, keeping values.
    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
    }

    /// Removes all values and child nodes.  The name is kept.
    pub fn clear_data(&mut self) {
        self.values.clear();
        self.nodes.clear();
    }
}
