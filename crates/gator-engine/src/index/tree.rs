//! Red-black tree of reservations stored in a node arena.
//!
//! Properties maintained after every mutation:
//! 1. Every node is red or black.
//! 2. The root is black.
//! 3. A red node never has a red child.
//! 4. Every root-to-leaf path crosses the same number of black nodes.
//!
//! Nodes live in a `Vec` and link to each other by [`NodeId`]. Slot 0 is a
//! black sentinel standing in for every leaf and for the root's parent.
//! Deletion may write the sentinel's parent link while rebalancing; no
//! other field of the sentinel ever changes.

use std::cmp::Ordering;

use gator_core::error::AppError;
use gator_core::types::{SeatId, UserId};

use super::node::{Color, Node, NodeId};

const NIL: NodeId = NodeId::NIL;

/// Active reservations keyed by user id.
#[derive(Debug, Clone)]
pub struct ReservationIndex {
    /// Node arena. Slot 0 is the sentinel.
    nodes: Vec<Node>,
    /// Recycled arena slots.
    free_list: Vec<NodeId>,
    root: NodeId,
    len: usize,
}

impl ReservationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            free_list: Vec::new(),
            root: NIL,
            len: 0,
        }
    }

    /// Number of reservations.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no reservation is held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every reservation.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[NIL.index()] = Node::sentinel();
        self.free_list.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Seat held by `user`, if any.
    pub fn find(&self, user: UserId) -> Option<SeatId> {
        let node = self.search(user);
        (!node.is_nil()).then(|| self.node(node).seat)
    }

    /// Whether `user` holds a reservation.
    pub fn contains(&self, user: UserId) -> bool {
        !self.search(user).is_nil()
    }

    /// Record that `user` holds `seat`.
    ///
    /// Returns `false` without changing anything if `user` already holds a seat.
    pub fn insert(&mut self, user: UserId, seat: SeatId) -> bool {
        let mut parent = NIL;
        let mut current = self.root;
        let mut went_left = false;
        while !current.is_nil() {
            parent = current;
            match user.cmp(&self.node(current).user) {
                Ordering::Less => {
                    current = self.left(current);
                    went_left = true;
                }
                Ordering::Greater => {
                    current = self.right(current);
                    went_left = false;
                }
                Ordering::Equal => return false,
            }
        }

        let node = self.alloc(user, seat);
        self.node_mut(node).parent = parent;
        if parent.is_nil() {
            self.root = node;
        } else if went_left {
            self.node_mut(parent).left = node;
        } else {
            self.node_mut(parent).right = node;
        }
        self.len += 1;

        self.insert_fixup(node);
        true
    }

    /// Remove the reservation of `user`, returning the seat it held.
    pub fn delete(&mut self, user: UserId) -> Option<SeatId> {
        let target = self.search(user);
        if target.is_nil() {
            return None;
        }
        let seat = self.node(target).seat;

        // With two children, the in-order successor's entry moves into the
        // target slot and the successor (which has no left child) is spliced out.
        let spliced = if !self.left(target).is_nil() && !self.right(target).is_nil() {
            let successor = self.minimum(self.right(target));
            let (succ_user, succ_seat) = {
                let n = self.node(successor);
                (n.user, n.seat)
            };
            let slot = self.node_mut(target);
            slot.user = succ_user;
            slot.seat = succ_seat;
            successor
        } else {
            target
        };

        let replacement = if self.left(spliced).is_nil() {
            self.right(spliced)
        } else {
            self.left(spliced)
        };
        let removed_color = self.color(spliced);
        self.transplant(spliced, replacement);
        self.release(spliced);
        self.len -= 1;

        if removed_color == Color::Black {
            self.delete_fixup(replacement);
        }
        Some(seat)
    }

    /// Reservations with user ids in `lo..=hi`, in ascending user order.
    pub fn range(&self, lo: UserId, hi: UserId) -> Vec<(UserId, SeatId)> {
        let mut out = Vec::new();
        if lo > hi {
            return out;
        }
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            // Descend left only while smaller keys can still be in range.
            while !current.is_nil() {
                let node = self.node(current);
                if node.user < lo {
                    current = node.right;
                } else {
                    stack.push(current);
                    current = node.left;
                }
            }
            let Some(next) = stack.pop() else {
                break;
            };
            let node = self.node(next);
            if node.user > hi {
                break;
            }
            out.push((node.user, node.seat));
            current = node.right;
        }
        out
    }

    /// Every reservation in ascending user order.
    pub fn iter_by_user(&self) -> Vec<(UserId, SeatId)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;
        while !current.is_nil() || !stack.is_empty() {
            while !current.is_nil() {
                stack.push(current);
                current = self.left(current);
            }
            if let Some(next) = stack.pop() {
                let node = self.node(next);
                out.push((node.user, node.seat));
                current = node.right;
            }
        }
        out
    }

    /// Every `(seat, user)` pair sorted by seat number.
    pub fn ordered_by_seat(&self) -> Vec<(SeatId, UserId)> {
        let mut out: Vec<(SeatId, UserId)> = self
            .iter_by_user()
            .into_iter()
            .map(|(user, seat)| (seat, user))
            .collect();
        out.sort_unstable();
        out
    }

    /// Whether some reservation holds `seat`. Linear scan.
    pub fn contains_seat(&self, seat: SeatId) -> bool {
        self.iter_by_user().iter().any(|&(_, held)| held == seat)
    }

    /// Check the red-black, ordering, and link properties.
    ///
    /// Returns the black height of the tree (sentinel excluded).
    pub fn validate(&self) -> Result<usize, AppError> {
        if self.color(NIL) != Color::Black {
            return Err(AppError::internal("sentinel is not black"));
        }
        if self.root.is_nil() {
            return if self.len == 0 {
                Ok(0)
            } else {
                Err(AppError::internal(format!(
                    "empty tree reports {} entries",
                    self.len
                )))
            };
        }
        if self.color(self.root) != Color::Black {
            return Err(AppError::internal("root is red"));
        }
        if !self.parent(self.root).is_nil() {
            return Err(AppError::internal("root has a parent"));
        }
        let mut count = 0;
        let height = self.validate_subtree(self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(AppError::internal(format!(
                "tree holds {count} nodes but reports {}",
                self.len
            )));
        }
        Ok(height)
    }

    fn validate_subtree(
        &self,
        id: NodeId,
        lower: Option<UserId>,
        upper: Option<UserId>,
        count: &mut usize,
    ) -> Result<usize, AppError> {
        if id.is_nil() {
            return Ok(0);
        }
        *count += 1;
        let node = self.node(id);
        if lower.is_some_and(|lo| node.user <= lo) || upper.is_some_and(|hi| node.user >= hi) {
            return Err(AppError::internal(format!(
                "user {} is out of search order",
                node.user
            )));
        }
        for child in [node.left, node.right] {
            if child.is_nil() {
                continue;
            }
            if self.parent(child) != id {
                return Err(AppError::internal(format!(
                    "child of user {} has a stale parent link",
                    node.user
                )));
            }
            if node.color == Color::Red && self.color(child) == Color::Red {
                return Err(AppError::internal(format!(
                    "red user {} has a red child",
                    node.user
                )));
            }
        }
        let left = self.validate_subtree(node.left, lower, Some(node.user), count)?;
        let right = self.validate_subtree(node.right, Some(node.user), upper, count)?;
        if left != right {
            return Err(AppError::internal(format!(
                "black height differs below user {} ({left} vs {right})",
                node.user
            )));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }

    // ===== Rebalancing =====

    fn insert_fixup(&mut self, mut node: NodeId) {
        while self.color(self.parent(node)) == Color::Red {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        // Triangle: straighten into a line first.
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    fn delete_fixup(&mut self, mut node: NodeId) {
        while node != self.root && self.color(node) == Color::Black {
            let parent = self.parent(node);
            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(node));
                }
                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        let near = self.left(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let far = self.right(sibling);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(node));
                }
                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        let near = self.right(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let far = self.left(sibling);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }
        self.set_color(node, Color::Black);
    }

    fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        let y_left = self.left(y);
        self.node_mut(x).right = y_left;
        if !y_left.is_nil() {
            self.node_mut(y_left).parent = x;
        }
        let x_parent = self.parent(x);
        self.node_mut(y).parent = x_parent;
        if x_parent.is_nil() {
            self.root = y;
        } else if x == self.left(x_parent) {
            self.node_mut(x_parent).left = y;
        } else {
            self.node_mut(x_parent).right = y;
        }
        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;
    }

    fn rotate_right(&mut self, y: NodeId) {
        let x = self.left(y);
        let x_right = self.right(x);
        self.node_mut(y).left = x_right;
        if !x_right.is_nil() {
            self.node_mut(x_right).parent = y;
        }
        let y_parent = self.parent(y);
        self.node_mut(x).parent = y_parent;
        if y_parent.is_nil() {
            self.root = x;
        } else if y == self.right(y_parent) {
            self.node_mut(y_parent).right = x;
        } else {
            self.node_mut(y_parent).left = x;
        }
        self.node_mut(x).right = y;
        self.node_mut(y).parent = x;
    }

    /// Put `replacement` where `old` hangs. The sentinel's parent is set too,
    /// so the delete fixup can walk up from an empty position.
    fn transplant(&mut self, old: NodeId, replacement: NodeId) {
        let parent = self.parent(old);
        if parent.is_nil() {
            self.root = replacement;
        } else if old == self.left(parent) {
            self.node_mut(parent).left = replacement;
        } else {
            self.node_mut(parent).right = replacement;
        }
        self.node_mut(replacement).parent = parent;
    }

    fn minimum(&self, mut node: NodeId) -> NodeId {
        while !self.left(node).is_nil() {
            node = self.left(node);
        }
        node
    }

    fn search(&self, user: UserId) -> NodeId {
        let mut current = self.root;
        while !current.is_nil() {
            let node = self.node(current);
            current = match user.cmp(&node.user) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return current,
            };
        }
        NIL
    }

    // ===== Arena =====

    fn alloc(&mut self, user: UserId, seat: SeatId) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.nodes[id.index()] = Node::new(user, seat);
            id
        } else {
            let id = NodeId(self.nodes.len());
            self.nodes.push(Node::new(user, seat));
            id
        }
    }

    fn release(&mut self, id: NodeId) {
        debug_assert!(!id.is_nil());
        self.free_list.push(id);
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    fn color(&self, id: NodeId) -> Color {
        self.node(id).color
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    #[inline]
    fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent
    }

    #[inline]
    fn left(&self, id: NodeId) -> NodeId {
        self.node(id).left
    }

    #[inline]
    fn right(&self, id: NodeId) -> NodeId {
        self.node(id).right
    }
}

impl Default for ReservationIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic permutation of `0..n` (n must not be a multiple of 7919).
    fn scrambled(n: i64) -> Vec<i64> {
        (0..n).map(|i| (i * 7919) % n).collect()
    }

    fn filled(users: &[i64]) -> ReservationIndex {
        let mut index = ReservationIndex::new();
        for &user in users {
            assert!(index.insert(UserId(user), SeatId(user + 1000)));
        }
        index
    }

    #[test]
    fn test_empty_index() {
        let mut index = ReservationIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.find(UserId(1)), None);
        assert_eq!(index.delete(UserId(1)), None);
        assert_eq!(index.validate().expect("valid"), 0);
        assert!(index.ordered_by_seat().is_empty());
    }

    #[test]
    fn test_insert_and_find() {
        let index = filled(&[5, 3, 8, 1, 4]);
        assert_eq!(index.len(), 5);
        assert_eq!(index.find(UserId(4)), Some(SeatId(1004)));
        assert_eq!(index.find(UserId(6)), None);
        index.validate().expect("valid");
    }

    #[test]
    fn test_duplicate_insert_is_refused() {
        let mut index = filled(&[1]);
        assert!(!index.insert(UserId(1), SeatId(99)));
        assert_eq!(index.find(UserId(1)), Some(SeatId(1001)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let users: Vec<i64> = (0..1024).collect();
        let index = filled(&users);
        let height = index.validate().expect("valid");
        // A red-black tree with n nodes has black height <= log2(n + 1).
        assert!(height <= 11, "black height {height}");
    }

    #[test]
    fn test_scrambled_insert_delete_keeps_invariants() {
        let users = scrambled(501);
        let mut index = filled(&users);
        index.validate().expect("valid after inserts");

        for (step, &user) in users.iter().enumerate().filter(|(i, _)| i % 3 != 0) {
            assert_eq!(index.delete(UserId(user)), Some(SeatId(user + 1000)));
            if step % 25 == 0 {
                index.validate().expect("valid during deletes");
            }
        }
        index.validate().expect("valid after deletes");
        assert_eq!(index.len(), 167);

        for (i, &user) in users.iter().enumerate() {
            let expected = (i % 3 == 0).then_some(SeatId(user + 1000));
            assert_eq!(index.find(UserId(user)), expected);
        }
    }

    #[test]
    fn test_delete_everything_then_reuse_slots() {
        let users = scrambled(64);
        let mut index = filled(&users);
        for &user in users.iter().rev() {
            index.delete(UserId(user));
            index.validate().expect("valid");
        }
        assert!(index.is_empty());

        let arena = index.nodes.len();
        for user in 0..64 {
            index.insert(UserId(user), SeatId(user));
        }
        assert_eq!(index.nodes.len(), arena);
        index.validate().expect("valid");
    }

    #[test]
    fn test_allocated_ids_match_arena_slots() {
        let mut index = ReservationIndex::new();
        let ids: Vec<NodeId> = (1..=5).map(|u| index.alloc(UserId(u), SeatId(u))).collect();
        for (slot, id) in ids.iter().enumerate() {
            assert!(!id.is_nil());
            assert_eq!(id.index(), slot + 1);
        }
        index.release(ids[2]);
        assert_eq!(index.alloc(UserId(9), SeatId(9)), ids[2]);
        assert_eq!(index.nodes.len(), 6);
    }

    #[test]
    fn test_delete_node_with_two_children_moves_successor() {
        let mut index = filled(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(index.delete(UserId(50)), Some(SeatId(1050)));
        assert_eq!(index.find(UserId(60)), Some(SeatId(1060)));
        assert!(!index.contains(UserId(50)));
        index.validate().expect("valid");
    }

    #[test]
    fn test_ordered_by_seat_not_by_user() {
        let mut index = ReservationIndex::new();
        index.insert(UserId(1), SeatId(3));
        index.insert(UserId(2), SeatId(1));
        index.insert(UserId(3), SeatId(2));
        assert_eq!(
            index.ordered_by_seat(),
            vec![
                (SeatId(1), UserId(2)),
                (SeatId(2), UserId(3)),
                (SeatId(3), UserId(1)),
            ]
        );
        assert!(index.contains_seat(SeatId(2)));
        assert!(!index.contains_seat(SeatId(4)));
    }

    #[test]
    fn test_range_is_inclusive_and_sorted_by_user() {
        let index = filled(&scrambled(40));
        let users: Vec<i64> = index
            .range(UserId(10), UserId(15))
            .into_iter()
            .map(|(user, _)| user.get())
            .collect();
        assert_eq!(users, vec![10, 11, 12, 13, 14, 15]);
        assert!(index.range(UserId(50), UserId(60)).is_empty());
        assert!(index.range(UserId(5), UserId(4)).is_empty());
        assert_eq!(index.range(UserId(-10), UserId(100)).len(), 40);
    }

    #[test]
    fn test_clear() {
        let mut index = filled(&[1, 2, 3]);
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.validate().expect("valid"), 0);
        assert!(index.insert(UserId(2), SeatId(1)));
    }
}
