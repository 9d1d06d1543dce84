//! Soft-delete support shared by every catalog and order entity.
//!
//! Records are hidden rather than physically removed: reads exclude
//! soft-deleted rows by convention, and `restore` undoes the deletion.

use serde::{Deserialize, Serialize};

/// Soft-delete bookkeeping, flattened into each entity's serialized form
/// as `isDeleted` / `deletedAt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftDelete {
    /// Whether the record is hidden from normal reads.
    pub is_deleted: bool,
    /// Unix timestamp of the deletion, if any.
    pub deleted_at: Option<i64>,
}

/// Entities that can be soft-deleted and restored.
pub trait Deletable {
    /// Access the soft-delete state.
    fn soft_delete_state(&self) -> &SoftDelete;

    /// Mutably access the soft-delete state.
    fn soft_delete_state_mut(&mut self) -> &mut SoftDelete;

    /// Whether the record is currently soft-deleted.
    fn is_deleted(&self) -> bool {
        self.soft_delete_state().is_deleted
    }

    /// Unix timestamp of the deletion, if any.
    fn deleted_at(&self) -> Option<i64> {
        self.soft_delete_state().deleted_at
    }

    /// Hide the record without physically removing it.
    fn soft_delete(&mut self) {
        let state = self.soft_delete_state_mut();
        state.is_deleted = true;
        state.deleted_at = Some(current_timestamp());
    }

    /// Undo a soft deletion.
    fn restore(&mut self) {
        let state = self.soft_delete_state_mut();
        state.is_deleted = false;
        state.deleted_at = None;
    }
}

/// Implement [`Deletable`] for a type with a `soft_delete` field.
macro_rules! impl_deletable {
    ($name:ident) => {
        impl $crate::softdelete::Deletable for $name {
            fn soft_delete_state(&self) -> &$crate::softdelete::SoftDelete {
                &self.soft_delete
            }

            fn soft_delete_state_mut(&mut self) -> &mut $crate::softdelete::SoftDelete {
                &mut self.soft_delete
            }
        }
    };
}

pub(crate) use impl_deletable;

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        soft_delete: SoftDelete,
    }

    impl_deletable!(Record);

    #[test]
    fn test_soft_delete_and_restore() {
        let mut record = Record {
            soft_delete: SoftDelete::default(),
        };
        assert!(!record.is_deleted());
        assert!(record.deleted_at().is_none());

        record.soft_delete();
        assert!(record.is_deleted());
        assert!(record.deleted_at().is_some());

        record.restore();
        assert!(!record.is_deleted());
        assert!(record.deleted_at().is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let state = SoftDelete {
            is_deleted: true,
            deleted_at: Some(123),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isDeleted"], true);
        assert_eq!(json["deletedAt"], 123);
    }
}
