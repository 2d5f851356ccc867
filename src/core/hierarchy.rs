use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Nested input tree for bubble and treemap layouts.
///
/// A node with no children is a leaf and carries the value used for area
/// computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Self::leaf_count).sum()
        }
    }
}

pub type NodeId = usize;

/// One arena entry of a [`Hierarchy`].
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyEntry {
    pub name: String,
    /// Value declared on the input node, if any.
    pub own_value: Option<f64>,
    /// Own value plus the summed values of all descendants.
    pub value: f64,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl HierarchyEntry {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena form of a [`HierarchyNode`] tree with summed values.
///
/// Node `0` is the root. Entries are stored in pre-order of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    entries: Vec<HierarchyEntry>,
}

impl Hierarchy {
    /// Builds the arena and sums values bottom-up.
    ///
    /// Rejects negative or non-finite values.
    pub fn from_node(root: &HierarchyNode) -> ChartResult<Self> {
        let mut entries = Vec::new();
        push_entry(&mut entries, root, None, 0)?;

        for id in (0..entries.len()).rev() {
            let children_sum: f64 = entries[id]
                .children
                .iter()
                .map(|&child| entries[child].value)
                .sum();
            let entry = &mut entries[id];
            entry.value = entry.own_value.unwrap_or(0.0) + children_sum;
        }

        Ok(Self { entries })
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry(&self, id: NodeId) -> &HierarchyEntry {
        &self.entries[id]
    }

    #[must_use]
    pub fn entries(&self) -> &[HierarchyEntry] {
        &self.entries
    }

    /// Parent name of `id`, used for per-group coloring.
    #[must_use]
    pub fn parent_name(&self, id: NodeId) -> Option<&str> {
        self.entries[id]
            .parent
            .map(|parent| self.entries[parent].name.as_str())
    }

    /// Stable-sorts every child list by descending summed value.
    pub fn sort_by_value_desc(&mut self) {
        let values: Vec<f64> = self.entries.iter().map(|entry| entry.value).collect();
        for entry in &mut self.entries {
            entry
                .children
                .sort_by_key(|&child| Reverse(OrderedFloat(values[child])));
        }
    }

    /// Node ids in pre-order, following the current child order.
    #[must_use]
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.entries.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.entries[id].children.iter().rev().copied());
        }
        order
    }

    /// Node ids in post-order (children before their parent).
    #[must_use]
    pub fn post_order(&self) -> Vec<NodeId> {
        // Root-right-left traversal, reversed.
        let mut order = Vec::with_capacity(self.entries.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.entries[id].children.iter().copied());
        }
        order.reverse();
        order
    }

    /// Leaf ids in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.pre_order()
            .into_iter()
            .filter(|&id| self.entries[id].is_leaf())
            .collect()
    }
}

fn push_entry(
    entries: &mut Vec<HierarchyEntry>,
    node: &HierarchyNode,
    parent: Option<NodeId>,
    depth: usize,
) -> ChartResult<NodeId> {
    if let Some(value) = node.value {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "hierarchy node `{}` must have a finite, non-negative value",
                node.name
            )));
        }
    }

    let id = entries.len();
    entries.push(HierarchyEntry {
        name: node.name.clone(),
        own_value: node.value,
        value: 0.0,
        depth,
        parent,
        children: Vec::with_capacity(node.children.len()),
    });

    for child in &node.children {
        let child_id = push_entry(entries, child, Some(id), depth + 1)?;
        entries[id].children.push(child_id);
    }
    Ok(id)
}
