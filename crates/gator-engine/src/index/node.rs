//! Arena nodes for the reservation index.

use gator_core::types::{SeatId, UserId};

/// Index into the node arena. Slot 0 is the shared black sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The sentinel leaf terminating every path.
    pub const NIL: NodeId = NodeId(0);

    /// Arena slot of this node.
    pub fn index(self) -> usize {
        self.0
    }

    /// Whether this is the sentinel.
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) user: UserId,
    pub(crate) seat: SeatId,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Node {
    /// A fresh red node with sentinel links.
    pub(crate) fn new(user: UserId, seat: SeatId) -> Self {
        Self {
            user,
            seat,
            color: Color::Red,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }

    /// The black sentinel. Its key and seat are never read.
    pub(crate) fn sentinel() -> Self {
        Self {
            color: Color::Black,
            ..Self::new(UserId(0), SeatId(0))
        }
    }
}
