//! Application model: the selection the user is building and the recording
//! it currently resolves to.

use crate::catalog::{
    CatalogResolver, EnumeratedCatalog, FacetSelection, ResolvedAsset, StaticCatalogEntry, cycle,
};

/// Row of the facet box that has keyboard focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FacetRow {
    Duration,
    Level,
    Music,
}

impl FacetRow {
    pub const ALL: [Self; 3] = [Self::Duration, Self::Level, Self::Music];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Duration => "Duración",
            Self::Level => "Nivel",
            Self::Music => "Música",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Duration => Self::Level,
            Self::Level => Self::Music,
            Self::Music => Self::Duration,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Duration => Self::Music,
            Self::Level => Self::Duration,
            Self::Music => Self::Level,
        }
    }
}

/// How the user picks a recording.
#[derive(Debug, Clone)]
pub enum Selection {
    Facets {
        resolver: CatalogResolver,
        selection: FacetSelection,
        focus: FacetRow,
    },
    Enumerated {
        catalog: EnumeratedCatalog,
        /// Entry under the cursor; only selected on Enter.
        cursor: usize,
    },
}

/// What the player has to do after the selection changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rebind {
    /// A different recording resolved: bind it.
    To(ResolvedAsset),
    /// The selection no longer resolves: drop the bound recording.
    Unbind,
    /// Same recording as before.
    Keep,
}

/// The main application model.
pub struct App {
    pub selection: Selection,
    bound: Option<ResolvedAsset>,
}

impl App {
    /// Start with an empty facet selection.
    pub fn with_facets(resolver: CatalogResolver) -> Self {
        Self {
            selection: Selection::Facets {
                resolver,
                selection: FacetSelection::default(),
                focus: FacetRow::Duration,
            },
            bound: None,
        }
    }

    /// Start on the catalog's default entry.
    pub fn with_catalog(catalog: EnumeratedCatalog) -> Self {
        let cursor = catalog.selected_index();
        Self {
            selection: Selection::Enumerated { catalog, cursor },
            bound: None,
        }
    }

    /// The recording the current selection resolves to, if any.
    pub fn resolved(&self) -> Option<ResolvedAsset> {
        match &self.selection {
            Selection::Facets {
                resolver,
                selection,
                ..
            } => resolver.resolve(selection),
            Selection::Enumerated { catalog, .. } => Some(catalog.selected().to_asset()),
        }
    }

    /// The recording last handed to the player.
    pub fn bound(&self) -> Option<&ResolvedAsset> {
        self.bound.as_ref()
    }

    /// The enumerated entry currently selected, for display.
    pub fn selected_entry(&self) -> Option<&StaticCatalogEntry> {
        match &self.selection {
            Selection::Enumerated { catalog, .. } => Some(catalog.selected()),
            Selection::Facets { .. } => None,
        }
    }

    /// Re-resolve and compare with the bound recording by identifier.
    pub fn sync(&mut self) -> Rebind {
        let next = self.resolved();
        let unchanged = match (&self.bound, &next) {
            (Some(current), Some(next)) => current.identifier == next.identifier,
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Rebind::Keep;
        }

        self.bound = next.clone();
        match next {
            Some(asset) => Rebind::To(asset),
            None => Rebind::Unbind,
        }
    }

    /// Move focus (facets) or the cursor (list) down.
    pub fn move_down(&mut self) {
        match &mut self.selection {
            Selection::Facets { focus, .. } => *focus = focus.next(),
            Selection::Enumerated { catalog, cursor } => {
                let len = catalog.entries().len();
                *cursor = (*cursor + 1) % len;
            }
        }
    }

    /// Move focus (facets) or the cursor (list) up.
    pub fn move_up(&mut self) {
        match &mut self.selection {
            Selection::Facets { focus, .. } => *focus = focus.prev(),
            Selection::Enumerated { catalog, cursor } => {
                let len = catalog.entries().len();
                *cursor = (*cursor + len - 1) % len;
            }
        }
    }

    /// Cycle the focused facet, or select the entry under the cursor.
    pub fn activate(&mut self) {
        match &mut self.selection {
            Selection::Facets {
                selection, focus, ..
            } => match focus {
                FacetRow::Duration => selection.duration = cycle(selection.duration),
                FacetRow::Level => selection.level = cycle(selection.level),
                FacetRow::Music => selection.music = cycle(selection.music),
            },
            Selection::Enumerated { catalog, cursor } => {
                if let Some(key) = catalog.entries().get(*cursor).map(|e| e.name.clone()) {
                    catalog.select(&key);
                }
            }
        }
    }

    /// Unset the focused facet. No effect on a list.
    pub fn clear_focused(&mut self) {
        if let Selection::Facets {
            selection, focus, ..
        } = &mut self.selection
        {
            match focus {
                FacetRow::Duration => selection.duration = None,
                FacetRow::Level => selection.level = None,
                FacetRow::Music => selection.music = None,
            }
        }
    }
}
