//! Bounding-box k-d tree for spatial queries.
//!
//! Items are split recursively on the axis `depth % 3` at the centre of the
//! node's bounds. An item goes left when its box starts before the split
//! value, so items straddling the split live on the left. Each node stores
//! the union of its items' boxes; only leaves store items.
//!
//! # Example
//!
//! ```
//! use procgeom::algo::kdtree::BoundingTree;
//! use procgeom::geom::Aabb;
//! use nalgebra::Point3;
//!
//! let points: Vec<Point3<f64>> = (0..100).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
//! let tree = BoundingTree::new(points);
//!
//! let window = Aabb::new(Point3::new(9.5, -1.0, -1.0), Point3::new(12.5, 1.0, 1.0));
//! assert_eq!(tree.query(&window).len(), 3);
//! ```

use std::ops::ControlFlow;

use log::debug;

use crate::geom::bounds::{bounds_of, Aabb, Bounded};

/// Splits that may fail to separate anything before a node gives up and
/// becomes a leaf.
const MAX_STALLED_SPLITS: usize = 3;

#[derive(Debug, Clone)]
struct Node<T> {
    bounds: Aabb,
    depth: usize,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
    items: Vec<T>,
}

impl<T> Node<T> {
    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn max_depth(&self) -> usize {
        let l = self.left.as_ref().map_or(self.depth, |n| n.max_depth());
        let r = self.right.as_ref().map_or(self.depth, |n| n.max_depth());
        l.max(r)
    }
}

impl<T: Bounded> Node<T> {
    fn build(items: Vec<T>, depth: usize, stalled: usize, leaf_size: usize) -> Self {
        let bounds = bounds_of(&items);
        let leaf = |items: Vec<T>| Node {
            bounds,
            depth,
            left: None,
            right: None,
            items,
        };

        if items.len() < leaf_size {
            return leaf(items);
        }

        let axis = depth % 3;
        let split = bounds.center()[axis];
        let (left, right): (Vec<T>, Vec<T>) = items
            .into_iter()
            .partition(|item| item.bounds().min[axis] < split);

        let stalled = if left.is_empty() || right.is_empty() {
            stalled + 1
        } else {
            0
        };
        if stalled >= MAX_STALLED_SPLITS {
            debug!(
                "bounding tree: {} items could not be separated at depth {}",
                left.len() + right.len(),
                depth
            );
            let mut items = left;
            items.extend(right);
            return leaf(items);
        }

        let child = |items: Vec<T>| {
            (!items.is_empty())
                .then(|| Box::new(Node::build(items, depth + 1, stalled, leaf_size)))
        };
        Node {
            bounds,
            depth,
            left: child(left),
            right: child(right),
            items: Vec::new(),
        }
    }

    fn visit<'a, B, I, V>(&'a self, intersects: &mut I, visitor: &mut V) -> ControlFlow<B>
    where
        I: FnMut(&Aabb) -> bool,
        V: FnMut(&'a T) -> ControlFlow<B>,
    {
        if !intersects(&self.bounds) {
            return ControlFlow::Continue(());
        }
        for item in &self.items {
            visitor(item)?;
        }
        if let Some(left) = &self.left {
            left.visit(intersects, visitor)?;
        }
        if let Some(right) = &self.right {
            right.visit(intersects, visitor)?;
        }
        ControlFlow::Continue(())
    }

    fn collect_items<'a>(&'a self, out: &mut Vec<&'a T>) {
        out.extend(self.items.iter());
        if let Some(left) = &self.left {
            left.collect_items(out);
        }
        if let Some(right) = &self.right {
            right.collect_items(out);
        }
    }
}

/// A k-d tree over anything [`Bounded`].
#[derive(Debug, Clone)]
pub struct BoundingTree<T> {
    root: Node<T>,
    len: usize,
    leaf_size: usize,
}

impl<T: Bounded> BoundingTree<T> {
    /// Default minimum number of items for a node to be split.
    pub const DEFAULT_LEAF_SIZE: usize = 8;

    /// Build a tree with the default leaf size.
    pub fn new<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self::with_leaf_size(items, Self::DEFAULT_LEAF_SIZE)
    }

    /// Build a tree; nodes with fewer than `leaf_size` items are not split.
    ///
    /// A `leaf_size` of zero is treated as one.
    pub fn with_leaf_size<I: IntoIterator<Item = T>>(items: I, leaf_size: usize) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        let len = items.len();
        let leaf_size = leaf_size.max(1);
        Self {
            root: Node::build(items, 0, 0, leaf_size),
            len,
            leaf_size,
        }
    }

    /// Depth-first traversal.
    ///
    /// Subtrees whose bounds fail `intersects` are skipped. `visitor` sees every
    /// item of every visited leaf; returning [`ControlFlow::Break`] stops the
    /// traversal and the break value is returned.
    pub fn visit<'a, B, I, V>(&'a self, mut intersects: I, mut visitor: V) -> ControlFlow<B>
    where
        I: FnMut(&Aabb) -> bool,
        V: FnMut(&'a T) -> ControlFlow<B>,
    {
        self.root.visit(&mut intersects, &mut visitor)
    }

    /// All items whose bounds intersect `window`.
    pub fn query(&self, window: &Aabb) -> Vec<&T> {
        let mut hits = Vec::new();
        let _: ControlFlow<()> = self.visit(
            |b| b.intersects(window),
            |item| {
                if item.bounds().intersects(window) {
                    hits.push(item);
                }
                ControlFlow::Continue(())
            },
        );
        hits
    }

    /// Every item, in leaf order.
    pub fn items(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_items(&mut out);
        out
    }
}

impl<T> BoundingTree<T> {
    /// Number of items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Depth of the deepest node; a single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        self.root.max_depth()
    }

    /// Union of all item bounds.
    pub fn bounds(&self) -> &Aabb {
        &self.root.bounds
    }

    /// Whether the whole tree is a single leaf.
    pub fn is_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// The leaf size used when building.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }
}
