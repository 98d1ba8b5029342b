//! Queue family bookkeeping: which family each [`QueueRole`] runs on, and at
//! which index inside that family.

pub mod allocator;
pub mod capability;
pub mod classifier;
pub mod requests;

pub use allocator::{allocate_queue_indices, resolve_queue_index};
pub use capability::{QueueCapabilities, QueueCapability, QueueFamily};
pub use classifier::classify;
pub use requests::{build_queue_requests, QueueCreationRequest};

use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of logical roles a device is split into.
pub const ROLE_COUNT: usize = 3;

/// Logical job a hardware queue is picked for.
///
/// The declaration order is meaningful: collisions are resolved in this order,
/// so [`QueueRole::Graphics`] always wins queue index 0 of its family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum QueueRole {
    Graphics = 0,
    Compute = 1,
    Transfer = 2,
}

impl QueueRole {
    pub const ALL: [QueueRole; ROLE_COUNT] =
        [QueueRole::Graphics, QueueRole::Compute, QueueRole::Transfer];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Roles resolved before this one.
    pub fn predecessors(self) -> &'static [QueueRole] {
        &Self::ALL[..self.ordinal()]
    }
}

impl fmt::Display for QueueRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueueRole::Graphics => "graphics",
            QueueRole::Compute => "compute",
            QueueRole::Transfer => "transfer",
        };
        f.pad(name)
    }
}

/// Family and queue index chosen for one role.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectedQueue {
    /// `None` until a family is found for the role.
    pub family_index: Option<u32>,
    pub queue_index: u32,
    /// Set when the assignment was copied from another role as a fallback;
    /// the role then shares that role's queue instead of getting its own.
    pub inherited_from: Option<QueueRole>,
}

impl SelectedQueue {
    pub fn is_assigned(&self) -> bool {
        self.family_index.is_some()
    }

    pub(crate) fn on_family(family_index: u32) -> Self {
        Self {
            family_index: Some(family_index),
            ..Self::default()
        }
    }

    pub(crate) fn inherit(source: QueueRole, from: SelectedQueue) -> Self {
        Self {
            inherited_from: Some(source),
            ..from
        }
    }
}

/// One [`SelectedQueue`] per [`QueueRole`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectedQueues([SelectedQueue; ROLE_COUNT]);

impl SelectedQueues {
    pub fn iter(&self) -> impl Iterator<Item = (QueueRole, &SelectedQueue)> {
        QueueRole::ALL.into_iter().zip(self.0.iter())
    }

    /// Roles (other than `role` itself) sitting on the same family as `role`.
    pub fn sharing_family_with(&self, role: QueueRole) -> impl Iterator<Item = QueueRole> + '_ {
        let family_index = self[role].family_index;
        self.iter()
            .filter(move |(other, selected)| {
                *other != role && family_index.is_some() && selected.family_index == family_index
            })
            .map(|(other, _)| other)
    }
}

impl Index<QueueRole> for SelectedQueues {
    type Output = SelectedQueue;

    fn index(&self, role: QueueRole) -> &Self::Output {
        &self.0[role.ordinal()]
    }
}

impl IndexMut<QueueRole> for SelectedQueues {
    fn index_mut(&mut self, role: QueueRole) -> &mut Self::Output {
        &mut self.0[role.ordinal()]
    }
}
