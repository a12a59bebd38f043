use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Parent reference embedded as a nested object in backend payloads.
///
/// Some endpoints return the parent inline instead of (or in addition to) a
/// raw `parent_id`; both forms are treated as equivalent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParentCategory {
    pub id: CategoryId,
    pub name: Option<String>,
}

/// Canonical category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<String>,
    /// Raw parent identifier form of the parent reference.
    pub parent_id: Option<CategoryId>,
    /// Embedded object form of the parent reference.
    pub parent: Option<ParentCategory>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Set when the category has been soft-deleted.
    pub deleted_at: Option<NaiveDateTime>,
}

impl Category {
    /// True when the record carries no parent reference of either form.
    ///
    /// A record whose declared parent id does not exist in a given list is
    /// still not a root; it simply becomes unreachable in that list's tree.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none() && self.parent.is_none()
    }

    /// Parent ids declared by this record, deduplicated across both forms.
    ///
    /// Usually yields zero or one id. A record carrying both forms with
    /// disagreeing ids yields both, making it a child of either parent.
    pub fn parent_refs(&self) -> impl Iterator<Item = CategoryId> + '_ {
        let embedded = self.parent.as_ref().map(|p| p.id);
        let raw = self.parent_id.filter(|id| Some(*id) != embedded);
        embedded.into_iter().chain(raw)
    }

    /// Whether this record declares `parent_id` as a parent in either form.
    pub fn has_parent(&self, parent_id: CategoryId) -> bool {
        self.parent_refs().any(|id| id == parent_id)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
