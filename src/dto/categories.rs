use serde::Serialize;

use crate::domain::category::Category;
use crate::tree::TreeRow;

/// Row of the categories management table.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    /// Resolved display name of the parent, when it exists in the list.
    pub parent_name: Option<String>,
    pub deleted: bool,
}

impl CategoryDto {
    /// Builds the row, resolving the parent name against the full list.
    pub fn from_category(category: &Category, all: &[Category]) -> Self {
        let parent_id = category.parent_refs().next();
        let parent_name = parent_id.and_then(|pid| {
            all.iter()
                .find(|c| c.id == pid)
                .map(|c| c.name.as_str().to_string())
        });
        Self {
            id: category.id.get(),
            name: category.name.as_str().to_string(),
            description: category.description.clone(),
            parent_id: parent_id.map(|id| id.get()),
            parent_name,
            deleted: category.is_deleted(),
        }
    }
}

/// One checkbox row of the nested category selector.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeRowDto {
    pub id: i32,
    pub name: String,
    pub depth: usize,
    pub checked: bool,
}

impl From<&TreeRow<'_>> for CategoryTreeRowDto {
    fn from(row: &TreeRow<'_>) -> Self {
        Self {
            id: row.category.id.get(),
            name: row.category.name.as_str().to_string(),
            depth: row.depth,
            checked: row.checked,
        }
    }
}
