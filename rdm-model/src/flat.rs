//! Flattening instances into dotted-path leaves.

use crate::config::ModelConfig;
use crate::model::DataModel;
use crate::validate::join_path;
use crate::value::Value;
use indexmap::IndexMap;
use std::iter::FusedIterator;

enum Node<'a> {
    Model(&'a DataModel),
    Value(&'a Value),
}

/// Lazy depth-first iterator over `(path, leaf)` pairs.
///
/// Returned by [`DataModel::flat_items`]. Containers are expanded only
/// when the traversal reaches them, so stopping early skips the rest.
pub struct FlatItems<'a> {
    stack: Vec<(String, Node<'a>)>,
    flatten_lists: bool,
}

impl<'a> FlatItems<'a> {
    fn new(root: &'a DataModel, flatten_lists: bool) -> Self {
        Self {
            stack: vec![(String::new(), Node::Model(root))],
            flatten_lists,
        }
    }

    fn push_model(&mut self, path: &str, model: &'a DataModel) {
        let children: Vec<_> = model.iter().collect();
        for (name, value) in children.into_iter().rev() {
            self.stack.push((join_path(path, name), Node::Value(value)));
        }
    }
}

impl<'a> Iterator for FlatItems<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            let value = match node {
                Node::Model(model) => {
                    self.push_model(&path, model);
                    continue;
                }
                Node::Value(value) => value,
            };
            match value {
                Value::Model(model) => self.push_model(&path, model),
                Value::Dict(map) => {
                    for (key, child) in map.iter().rev() {
                        self.stack.push((join_path(&path, key), Node::Value(child)));
                    }
                }
                Value::List(items) if self.flatten_lists => {
                    for (i, child) in items.iter().enumerate().rev() {
                        self.stack.push((join_path(&path, &i.to_string()), Node::Value(child)));
                    }
                }
                Value::Enum(member) => self.stack.push((path, Node::Value(member.value()))),
                leaf => return Some((path, leaf)),
            }
        }
        None
    }
}

impl FusedIterator for FlatItems<'_> {}

impl DataModel {
    /// Depth-first `(dotted path, leaf)` pairs over the whole instance.
    ///
    /// Nested models are always entered, tagged or not. With
    /// `flatten_lists` each list element gets its index as a path segment;
    /// without it a list is yielded whole. Enum members are unwrapped to
    /// their innermost value. Paths use internal field names.
    #[must_use]
    pub fn flat_items(&self, flatten_lists: bool) -> FlatItems<'_> {
        FlatItems::new(self, flatten_lists)
    }

    /// Flat dictionary under the default `roman` namespace.
    ///
    /// Times become their `isot` string; with `include_arrays` false,
    /// array leaves are dropped.
    #[must_use]
    pub fn to_flat_dict(&self, include_arrays: bool) -> IndexMap<String, Value> {
        self.to_flat_dict_in(&ModelConfig::default().flat_namespace, include_arrays)
    }

    /// [`DataModel::to_flat_dict`] under an explicit namespace.
    #[must_use]
    pub fn to_flat_dict_in(&self, namespace: &str, include_arrays: bool) -> IndexMap<String, Value> {
        self.flat_items(true)
            .filter(|(_, value)| include_arrays || !matches!(value, Value::Array(_)))
            .map(|(path, value)| {
                let value = match value {
                    Value::Time(t) => Value::Str(t.isot()),
                    other => other.clone(),
                };
                (join_path(namespace, &path), value)
            })
            .collect()
    }
}
