//! Flattening a PSD layer hierarchy into an ordered record list.
//!
//! PSD files store layers bottom-most first and link each one to its
//! enclosing group by id. A group's own record sits above everything it
//! contains and above every group recorded before it. Output is depth-first
//! with the top-most entry first at every level, and each group precedes its
//! children.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Whether a record is a pixel layer or a folder of layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Layer,
    Group,
}

impl LayerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layer => "layer",
            Self::Group => "group",
        }
    }
}

/// Edge coordinates in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Bounds {
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right: right.max(left),
            bottom: bottom.max(top),
        }
    }

    pub fn width(&self) -> u64 {
        (self.right - self.left) as u64
    }

    pub fn height(&self) -> u64 {
        (self.bottom - self.top) as u64
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Smallest box containing both; empty boxes do not contribute.
    pub fn union(self, other: Bounds) -> Bounds {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Bounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// One entry of the flattened layer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub visible: bool,
    /// 0 (transparent) to 255 (opaque).
    pub opacity: u8,
    pub left: i64,
    pub top: i64,
    pub width: u64,
    pub height: u64,
    /// Nesting level, 0 for top-level entries.
    pub depth: usize,
}

/// Document size plus every layer and group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerDocument {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<LayerRecord>,
}

/// A pixel layer as read from the file.
#[derive(Debug, Clone)]
pub struct RawLayer {
    pub name: String,
    pub visible: bool,
    pub opacity: u8,
    pub parent: Option<u64>,
    pub bounds: Bounds,
}

/// A group as read from the file.
#[derive(Debug, Clone)]
pub struct RawGroup {
    pub id: u64,
    pub name: String,
    pub visible: bool,
    pub opacity: u8,
    pub parent: Option<u64>,
    /// Position among the file's group records, bottom-most first.
    pub order: usize,
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Layer(usize),
    Group(u64),
}

/// Flatten `layers` (file order, bottom-most first) and `groups` into
/// display order.
///
/// Layers that point at an unknown group are treated as top-level, as are
/// groups with an unknown parent. Group bounds are the union of all
/// descendant layers; a group with no layers has zero size.
pub fn flatten(layers: &[RawLayer], groups: &[RawGroup]) -> Vec<LayerRecord> {
    let by_id: HashMap<u64, &RawGroup> = groups.iter().map(|g| (g.id, g)).collect();
    let known = |parent: Option<u64>| parent.filter(|id| by_id.contains_key(id));

    // Highest layer index and union bounds below each group.
    let mut group_top: HashMap<u64, usize> = HashMap::new();
    let mut group_bounds: HashMap<u64, Bounds> = HashMap::new();
    for (index, layer) in layers.iter().enumerate() {
        let mut seen = HashSet::new();
        let mut cursor = known(layer.parent);
        while let Some(id) = cursor {
            if !seen.insert(id) {
                break;
            }
            let top = group_top.entry(id).or_insert(index);
            *top = (*top).max(index);
            let bounds = group_bounds.entry(id).or_default();
            *bounds = bounds.union(layer.bounds);
            cursor = by_id.get(&id).and_then(|g| known(g.parent));
        }
    }

    let mut children: HashMap<Option<u64>, Vec<Node>> = HashMap::new();
    for (index, layer) in layers.iter().enumerate() {
        children
            .entry(known(layer.parent))
            .or_default()
            .push(Node::Layer(index));
    }
    for group in groups {
        let parent = known(group.parent).filter(|&p| p != group.id);
        children.entry(parent).or_default().push(Node::Group(group.id));
    }

    // Each group record's height in layer-index terms: at least its top
    // descendant, and never below the group recorded just before it.
    let mut in_file_order: Vec<&RawGroup> = groups.iter().collect();
    in_file_order.sort_by_key(|g| g.order);
    let mut group_rank: HashMap<u64, (Option<usize>, usize)> = HashMap::new();
    let mut floor: Option<usize> = None;
    for group in in_file_order {
        let level = group_top.get(&group.id).copied().max(floor);
        floor = level;
        group_rank.insert(group.id, (level, group.order + 1));
    }

    // A group outranks the layer it shares a level with.
    let sort_key = |node: &Node| match *node {
        Node::Layer(index) => (Some(index), 0),
        Node::Group(id) => group_rank.get(&id).copied().unwrap_or((None, 0)),
    };
    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
    }

    let mut out = Vec::with_capacity(layers.len() + groups.len());
    let mut visited = HashSet::new();
    let mut stack: Vec<(Node, usize)> = Vec::new();
    if let Some(roots) = children.get(&None) {
        stack.extend(roots.iter().rev().map(|&node| (node, 0)));
    }

    while let Some((node, depth)) = stack.pop() {
        match node {
            Node::Layer(index) => {
                let layer = &layers[index];
                out.push(record(
                    &layer.name,
                    LayerKind::Layer,
                    layer.visible,
                    layer.opacity,
                    layer.bounds,
                    depth,
                ));
            }
            Node::Group(id) => {
                if !visited.insert(id) {
                    continue;
                }
                let Some(group) = by_id.get(&id) else {
                    continue;
                };
                let bounds = group_bounds.get(&id).copied().unwrap_or_default();
                out.push(record(
                    &group.name,
                    LayerKind::Group,
                    group.visible,
                    group.opacity,
                    bounds,
                    depth,
                ));
                if let Some(kids) = children.get(&Some(id)) {
                    stack.extend(kids.iter().rev().map(|&node| (node, depth + 1)));
                }
            }
        }
    }
    out
}

fn record(
    name: &str,
    kind: LayerKind,
    visible: bool,
    opacity: u8,
    bounds: Bounds,
    depth: usize,
) -> LayerRecord {
    LayerRecord {
        name: name.to_string(),
        kind,
        visible,
        opacity,
        left: bounds.left,
        top: bounds.top,
        width: bounds.width(),
        height: bounds.height(),
        depth,
    }
}
