use slotmap::SlotMap;

use crate::error::IndexError;
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a node in the k-d tree arena.
    pub struct NodeId;
}

/// A single node of the k-d tree.
///
/// Children and parent are arena indices (generational keys), avoiding
/// self-referential ownership. The parent link exists only for the upward
/// backtracking walk during nearest-neighbor search.
#[derive(Debug, Clone)]
pub struct KdNode {
    /// The point stored at this node.
    pub datum: Point3,
    /// Splitting axis: 0, 1, or 2 (depth mod 3).
    pub axis: usize,
    /// Subtree of points with `coordinate[axis] <= datum[axis]`.
    pub left: Option<NodeId>,
    /// Subtree of points with `coordinate[axis] >= datum[axis]`.
    pub right: Option<NodeId>,
    /// Enclosing node, absent only at the root.
    pub parent: Option<NodeId>,
}

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// The indexed point closest to the query.
    pub point: Point3,
    /// True (non-squared) Euclidean distance from the query to `point`.
    pub distance: f64,
}

/// A k-d tree over a fixed set of 3D points, supporting exact
/// nearest-neighbor queries.
///
/// Nodes live in a [`SlotMap`] arena and reference each other by ID. The
/// tree is built once and never mutated, so shared `&self` queries are safe.
#[derive(Debug, Default)]
pub struct KdTree {
    nodes: SlotMap<NodeId, KdNode>,
    root: Option<NodeId>,
}

impl KdTree {
    /// Builds a k-d tree from the given points.
    ///
    /// At recursion depth `d` the points are split on axis `d mod 3`: they
    /// are sorted by that coordinate (stable, so ties keep input order) and
    /// the median becomes the node's datum. An empty slice yields a tree
    /// with no root.
    #[must_use]
    pub fn build(points: &[Point3]) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut scratch = points.to_vec();
        let root = Self::build_subtree(&mut nodes, &mut scratch, 0, None);
        Self { nodes, root }
    }

    fn build_subtree(
        nodes: &mut SlotMap<NodeId, KdNode>,
        points: &mut [Point3],
        depth: usize,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        if points.is_empty() {
            return None;
        }
        let axis = depth % 3;
        points.sort_by(|a, b| a[axis].total_cmp(&b[axis]));
        let median = points.len() / 2;

        let id = nodes.insert(KdNode {
            datum: points[median],
            axis,
            left: None,
            right: None,
            parent,
        });

        let (lower, rest) = points.split_at_mut(median);
        let left = Self::build_subtree(nodes, lower, depth + 1, Some(id));
        let right = Self::build_subtree(nodes, &mut rest[1..], depth + 1, Some(id));
        nodes[id].left = left;
        nodes[id].right = right;
        Some(id)
    }

    /// Returns the number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree indexes no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Finds the indexed point with the smallest Euclidean distance to
    /// `query`.
    ///
    /// Descends to a leaf following the splitting planes, then backtracks
    /// through parent links to the root. At every visited node the node's
    /// own datum is considered, and when the query's distance to the node's
    /// splitting plane is smaller than the current best distance, the
    /// unvisited sibling subtree is searched in full. Skipping that subtree
    /// search would make the result approximate.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::EmptyIndex`] if the tree has no points.
    pub fn nearest_neighbor(&self, query: &Point3) -> Result<Nearest, IndexError> {
        let root = self.root.ok_or(IndexError::EmptyIndex)?;

        let mut best = self.descend(root, query);
        let mut best_sq = (self.nodes[best].datum - query).norm_squared();

        // The descent stops early when its preferred branch is absent, so
        // the stopping node may still carry one subtree; it needs the same
        // splitting-plane check as the siblings below.
        let stop = &self.nodes[best];
        if let Some(child) = stop.left.or(stop.right) {
            let plane = query[stop.axis] - stop.datum[stop.axis];
            if plane * plane < best_sq {
                self.search_subtree(child, query, &mut best, &mut best_sq);
            }
        }

        let mut child = best;
        while let Some(parent) = self.nodes[child].parent {
            let node = &self.nodes[parent];
            let d = (node.datum - query).norm_squared();
            if d < best_sq {
                best_sq = d;
                best = parent;
            }

            let sibling = if node.left == Some(child) {
                node.right
            } else {
                node.left
            };
            if let Some(sibling) = sibling {
                let plane = query[node.axis] - node.datum[node.axis];
                if plane * plane < best_sq {
                    self.search_subtree(sibling, query, &mut best, &mut best_sq);
                }
            }
            child = parent;
        }

        Ok(Nearest {
            point: self.nodes[best].datum,
            distance: best_sq.sqrt(),
        })
    }

    /// Follows splitting planes from `start` down to a leaf, going left on
    /// `query[axis] <= datum[axis]`, and stopping early if the chosen
    /// branch is absent.
    fn descend(&self, start: NodeId, query: &Point3) -> NodeId {
        let mut current = start;
        loop {
            let node = &self.nodes[current];
            let next = if query[node.axis] <= node.datum[node.axis] {
                node.left
            } else {
                node.right
            };
            match next {
                Some(id) => current = id,
                None => return current,
            }
        }
    }

    /// Exhaustive pruned search of the subtree rooted at `id`, tightening
    /// the running best candidate in place.
    fn search_subtree(&self, id: NodeId, query: &Point3, best: &mut NodeId, best_sq: &mut f64) {
        let node = &self.nodes[id];
        let d = (node.datum - query).norm_squared();
        if d < *best_sq {
            *best_sq = d;
            *best = id;
        }

        let diff = query[node.axis] - node.datum[node.axis];
        let (near, far) = if diff <= 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        if let Some(near) = near {
            self.search_subtree(near, query, best, best_sq);
        }
        if let Some(far) = far {
            if diff * diff < *best_sq {
                self.search_subtree(far, query, best, best_sq);
            }
        }
    }
}
