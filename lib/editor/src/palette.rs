//! The node palette.
//!
//! Catalog entries grouped by category. Groups appear in the order their
//! category first shows up in the catalog, and entries keep catalog order
//! within a group. Each group can be expanded or collapsed independently.

use flowdeck_workflow::{Catalog, NodeCategory, NodeTypeDefinition};

/// Categories expanded when the palette opens.
pub const DEFAULT_EXPANDED: [NodeCategory; 3] =
    [NodeCategory::Trigger, NodeCategory::Action, NodeCategory::Ai];

/// One placeable node type as listed in the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub slug: String,
    pub name: String,
    pub category: NodeCategory,
    pub description: Option<String>,
}

impl From<&NodeTypeDefinition> for PaletteEntry {
    fn from(def: &NodeTypeDefinition) -> Self {
        Self {
            slug: def.slug.clone(),
            name: def.name.clone(),
            category: def.category,
            description: def.description.clone(),
        }
    }
}

/// One category's worth of palette entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteGroup {
    pub category: NodeCategory,
    pub entries: Vec<PaletteEntry>,
    pub expanded: bool,
}

/// The grouped palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    groups: Vec<PaletteGroup>,
}

impl Palette {
    /// Groups a catalog by category.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut groups: Vec<PaletteGroup> = Vec::new();
        for def in catalog.definitions() {
            match groups.iter_mut().find(|g| g.category == def.category) {
                Some(group) => group.entries.push(def.into()),
                None => groups.push(PaletteGroup {
                    category: def.category,
                    entries: vec![def.into()],
                    expanded: DEFAULT_EXPANDED.contains(&def.category),
                }),
            }
        }
        Self { groups }
    }

    /// Returns the groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[PaletteGroup] {
        &self.groups
    }

    /// Returns the group for a category, if the catalog has any entries in it.
    #[must_use]
    pub fn group(&self, category: NodeCategory) -> Option<&PaletteGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// Flips a group between expanded and collapsed. Returns the new state,
    /// or `None` when the palette has no such group.
    pub fn toggle(&mut self, category: NodeCategory) -> Option<bool> {
        let group = self.groups.iter_mut().find(|g| g.category == category)?;
        group.expanded = !group.expanded;
        Some(group.expanded)
    }

    #[must_use]
    pub fn is_expanded(&self, category: NodeCategory) -> bool {
        self.group(category).is_some_and(|g| g.expanded)
    }

    /// Returns the entry with the given slug.
    #[must_use]
    pub fn entry(&self, slug: &str) -> Option<&PaletteEntry> {
        self.entries().find(|entry| entry.slug == slug)
    }

    /// Iterates all entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }

    /// Finds entries whose name, slug or description contains `query`,
    /// ignoring case. An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&PaletteEntry> {
        let needle = query.trim().to_lowercase();
        self.entries()
            .filter(|entry| {
                needle.is_empty()
                    || entry.name.to_lowercase().contains(&needle)
                    || entry.slug.to_lowercase().contains(&needle)
                    || entry
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
