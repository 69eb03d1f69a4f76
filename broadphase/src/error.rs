use std::fmt;

/// The fixed-capacity resource that ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    Entities,
    Pairs,
    EntityOverlaps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadphaseError {
    /// A fixed-capacity array is full. Capacities are sized at construction;
    /// hitting this is a configuration error, not a runtime condition.
    OverCapacity {
        resource: CapacityKind,
        capacity: usize,
    },
    /// The operation requires a registered entity.
    NotRegistered,
}

pub type BroadphaseResult<T> = Result<T, BroadphaseError>;

impl fmt::Display for BroadphaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BroadphaseError::OverCapacity { resource, capacity } => {
                let what = match resource {
                    CapacityKind::Entities => "entities",
                    CapacityKind::Pairs => "overlapping pairs",
                    CapacityKind::EntityOverlaps => "overlaps on a single entity",
                };
                write!(f, "too many {} (capacity: {})", what, capacity)
            }
            BroadphaseError::NotRegistered => {
                write!(f, "entity is not registered in the broadphase")
            }
        }
    }
}

impl std::error::Error for BroadphaseError {}
