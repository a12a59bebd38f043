//! Category forest construction, traversal and cascading selection.
//!
//! Categories arrive from the backend as a flat list in which each record
//! optionally names its parent (by raw id or as an embedded object). This
//! module rebuilds the forest once per editing session: an arena over the
//! input slice plus a parent-indexed adjacency map, so child lookups do not
//! re-scan the flat list.

use std::collections::{HashMap, HashSet};

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

/// One rendered row of the category checkbox tree: a pre-order visit of a
/// node at a given indentation depth.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow<'a> {
    pub category: &'a Category,
    /// 0 for roots, +1 per nesting level.
    pub depth: usize,
    pub checked: bool,
}

/// Flat category list indexed for tree traversal.
///
/// Borrows the input slice for the lifetime of one render cycle; callers
/// rebuild it whenever the list changes, which is cheap relative to the
/// fetch that produced the list.
#[derive(Debug)]
pub struct CategoryForest<'a> {
    arena: &'a [Category],
    /// Parent id to indices of its children, in input order.
    children: HashMap<CategoryId, Vec<usize>>,
    /// Indices of records with no parent reference at all, in input order.
    ///
    /// A record whose parent reference does not resolve to any input id is
    /// deliberately NOT promoted to root here; it stays unreachable. That
    /// matches the console's current behavior and is pinned by tests until
    /// the product owner decides otherwise.
    roots: Vec<usize>,
}

impl<'a> CategoryForest<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (idx, category) in categories.iter().enumerate() {
            if category.is_root() {
                roots.push(idx);
            }
            for parent_id in category.parent_refs() {
                children.entry(parent_id).or_default().push(idx);
            }
        }

        Self {
            arena: categories,
            children,
            roots,
        }
    }

    /// Root categories in input order.
    pub fn roots(&self) -> impl Iterator<Item = &'a Category> + '_ {
        self.roots.iter().map(|&idx| &self.arena[idx])
    }

    /// Direct children of `parent_id`, in the same relative order as the
    /// input list.
    pub fn children_of(&self, parent_id: CategoryId) -> impl Iterator<Item = &'a Category> + '_ {
        self.children
            .get(&parent_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.arena[idx])
    }

    /// Every id reachable below `id` through child links, depth-first, no
    /// duplicates.
    ///
    /// Ids already seen on the way down are not entered again, so malformed
    /// input with a parent cycle terminates instead of recursing forever.
    pub fn descendants_of(&self, id: CategoryId) -> Vec<CategoryId> {
        let mut seen = HashSet::from([id]);
        let mut out = Vec::new();
        self.collect_descendants(id, &mut seen, &mut out);
        out
    }

    fn collect_descendants(
        &self,
        id: CategoryId,
        seen: &mut HashSet<CategoryId>,
        out: &mut Vec<CategoryId>,
    ) {
        for child in self.children_of(id) {
            if !seen.insert(child.id) {
                continue;
            }
            out.push(child.id);
            self.collect_descendants(child.id, seen, out);
        }
    }

    /// Depth-first pre-order walk over the whole forest, one row per
    /// rendered checkbox. Recomputed in full on every selection or data
    /// change; the sequence is finite even for malformed input.
    pub fn rows(&self, selection: &CategorySelection) -> Vec<TreeRow<'a>> {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for &idx in &self.roots {
            self.push_rows(&self.arena[idx], 0, selection, &mut seen, &mut rows);
        }
        rows
    }

    fn push_rows(
        &self,
        category: &'a Category,
        depth: usize,
        selection: &CategorySelection,
        seen: &mut HashSet<CategoryId>,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        if !seen.insert(category.id) {
            return;
        }
        rows.push(TreeRow {
            category,
            depth,
            checked: selection.contains(category.id),
        });
        for child in self.children_of(category.id) {
            self.push_rows(child, depth + 1, selection, seen, rows);
        }
    }
}

/// Set of category ids currently marked for association with the product
/// being created or edited.
///
/// Owned by the editing session and mutated only through [`Self::toggle`];
/// discarded on save or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    selected: HashSet<CategoryId>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the selection from a product's existing category associations,
    /// deduplicating repeated ids.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = CategoryId>,
    {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in ascending order, ready for a save payload.
    pub fn ids(&self) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Cascading toggle of `target` and its entire descendant subtree.
    ///
    /// The whole group follows the target's current state: target selected
    /// means the group is removed, target unselected means the group is
    /// added. A partially-selected subtree is not tri-state; only the
    /// target decides the direction.
    pub fn toggle(&mut self, target: CategoryId, forest: &CategoryForest<'_>) {
        let mut group = forest.descendants_of(target);
        group.push(target);

        if self.selected.contains(&target) {
            for id in &group {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::ParentCategory;
    use crate::domain::types::CategoryName;
    use chrono::DateTime;

    fn category(id: i32, parent_id: Option<i32>) -> Category {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(format!("Category {id}")).unwrap(),
            description: None,
            parent_id: parent_id.map(|p| CategoryId::new(p).unwrap()),
            parent: None,
            created_at: ts,
            updated_at: ts,
            deleted_at: None,
        }
    }

    fn id(value: i32) -> CategoryId {
        CategoryId::new(value).unwrap()
    }

    #[test]
    fn flat_list_renders_every_node_at_depth_zero() {
        let list = vec![category(1, None), category(2, None), category(3, None)];
        let forest = CategoryForest::new(&list);

        let rows = forest.rows(&CategorySelection::new());
        assert_eq!(rows.len(), list.len());
        assert!(rows.iter().all(|row| row.depth == 0));
        assert!(rows.iter().all(|row| !row.checked));
    }

    #[test]
    fn children_keep_input_order() {
        // Children of 1 appear interleaved with other nodes; relative order
        // must survive.
        let list = vec![
            category(1, None),
            category(5, Some(1)),
            category(2, None),
            category(3, Some(1)),
            category(4, Some(2)),
        ];
        let forest = CategoryForest::new(&list);

        let children: Vec<i32> = forest.children_of(id(1)).map(|c| c.id.get()).collect();
        assert_eq!(children, vec![5, 3]);
    }

    #[test]
    fn embedded_parent_object_counts_as_parent_reference() {
        let mut child = category(2, None);
        child.parent = Some(ParentCategory {
            id: id(1),
            name: None,
        });
        let list = vec![category(1, None), child];
        let forest = CategoryForest::new(&list);

        let children: Vec<CategoryId> = forest.children_of(id(1)).map(|c| c.id).collect();
        assert_eq!(children, vec![id(2)]);
        assert_eq!(forest.roots().count(), 1);
    }

    #[test]
    fn toggling_twice_restores_the_selection() {
        let list = vec![category(1, None), category(2, Some(1)), category(3, Some(2))];
        let forest = CategoryForest::new(&list);

        let mut selection = CategorySelection::from_ids([id(3)]);
        let before = selection.clone();
        selection.toggle(id(1), &forest);
        selection.toggle(id(1), &forest);
        assert_eq!(selection, before);
    }

    #[test]
    fn selecting_adds_whole_group_and_deselecting_removes_it() {
        let list = vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(2)),
            category(4, None),
        ];
        let forest = CategoryForest::new(&list);
        let mut selection = CategorySelection::new();

        selection.toggle(id(1), &forest);
        assert_eq!(selection.ids(), vec![id(1), id(2), id(3)]);

        // Deselect removes every group member even if some were selected
        // individually before.
        selection.toggle(id(1), &forest);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggling_a_leaf_changes_exactly_one_element() {
        let list = vec![category(1, None), category(2, Some(1))];
        let forest = CategoryForest::new(&list);
        let mut selection = CategorySelection::new();

        selection.toggle(id(2), &forest);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(id(2)));
    }

    #[test]
    fn deselecting_a_middle_node_keeps_the_untoggled_root() {
        // R -> C -> G; selecting R grabs all three, deselecting C removes
        // C's group only, and R stays because R was not the target.
        let list = vec![category(1, None), category(2, Some(1)), category(3, Some(2))];
        let forest = CategoryForest::new(&list);
        let mut selection = CategorySelection::new();

        selection.toggle(id(1), &forest);
        assert_eq!(selection.ids(), vec![id(1), id(2), id(3)]);

        selection.toggle(id(2), &forest);
        assert_eq!(selection.ids(), vec![id(1)]);
    }

    #[test]
    fn partially_selected_subtree_selects_everything() {
        let list = vec![category(1, None), category(2, Some(1)), category(3, Some(1))];
        let forest = CategoryForest::new(&list);

        // 2 is already selected, but the target 1 is not, so the toggle
        // selects the full group rather than flipping per node.
        let mut selection = CategorySelection::from_ids([id(2)]);
        selection.toggle(id(1), &forest);
        assert_eq!(selection.ids(), vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn dangling_parent_reference_is_neither_root_nor_rendered() {
        // Current behavior, kept on purpose: a node pointing at a parent id
        // that is not in the list is not reclassified as a root, so it never
        // shows up in the rendered tree.
        let list = vec![category(1, None), category(2, Some(99))];
        let forest = CategoryForest::new(&list);

        let rows = forest.rows(&CategorySelection::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category.id, id(1));
        assert_eq!(forest.roots().count(), 1);
    }

    #[test]
    fn parent_cycle_yields_finite_descendants() {
        let list = vec![category(1, Some(2)), category(2, Some(1))];
        let forest = CategoryForest::new(&list);

        let descendants = forest.descendants_of(id(1));
        assert_eq!(descendants, vec![id(2)]);
    }

    #[test]
    fn self_reference_yields_no_descendants() {
        let list = vec![category(1, Some(1))];
        let forest = CategoryForest::new(&list);

        assert!(forest.descendants_of(id(1)).is_empty());
    }

    #[test]
    fn rows_reflect_selection_and_nesting() {
        let list = vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(2)),
            category(4, None),
        ];
        let forest = CategoryForest::new(&list);
        let selection = CategorySelection::from_ids([id(2), id(3)]);

        let rows = forest.rows(&selection);
        let shape: Vec<(i32, usize, bool)> = rows
            .iter()
            .map(|row| (row.category.id.get(), row.depth, row.checked))
            .collect();
        assert_eq!(
            shape,
            vec![(1, 0, false), (2, 1, true), (3, 2, true), (4, 0, false)]
        );
    }

    #[test]
    fn duplicate_seed_ids_collapse() {
        let selection = CategorySelection::from_ids([id(2), id(2), id(5)]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn diamond_parentage_lists_descendants_once() {
        // 4 hangs under both 2 and 3 via the two reference forms.
        let mut diamond = category(4, Some(2));
        diamond.parent = Some(ParentCategory {
            id: id(3),
            name: None,
        });
        let list = vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(1)),
            diamond,
        ];
        let forest = CategoryForest::new(&list);

        let descendants = forest.descendants_of(id(1));
        assert_eq!(descendants.len(), 3);

        let rows = forest.rows(&CategorySelection::new());
        assert_eq!(rows.len(), 4);
    }
}
