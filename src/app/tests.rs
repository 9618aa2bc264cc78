use super::*;
use crate::catalog::{CatalogResolver, EnumeratedCatalog, StaticCatalogEntry};
use std::path::PathBuf;

fn facets_app() -> App {
    App::with_facets(CatalogResolver::new("assets", "meditacion_kokoro"))
}

fn entry(name: &str) -> StaticCatalogEntry {
    StaticCatalogEntry {
        name: name.to_string(),
        path: PathBuf::from("assets").join(name),
        display_name: name.to_string(),
    }
}

fn list_app() -> App {
    let catalog = EnumeratedCatalog::new(
        vec![entry("a.wav"), entry("b.wav"), entry("c.wav")],
        Some("b.wav"),
    )
    .unwrap();
    App::with_catalog(catalog)
}

/// Focus `row` and press Enter `times` times.
fn set_row(app: &mut App, row: FacetRow, times: usize) {
    while !matches!(&app.selection, Selection::Facets { focus, .. } if *focus == row) {
        app.move_down();
    }
    for _ in 0..times {
        app.activate();
    }
}

#[test]
fn empty_facet_selection_keeps_nothing_bound() {
    let mut app = facets_app();
    assert_eq!(app.resolved(), None);
    assert_eq!(app.sync(), Rebind::Keep);
    assert_eq!(app.bound(), None);
}

#[test]
fn partial_selection_does_not_bind() {
    let mut app = facets_app();
    set_row(&mut app, FacetRow::Duration, 1);
    set_row(&mut app, FacetRow::Music, 1);
    assert_eq!(app.sync(), Rebind::Keep);
    assert_eq!(app.bound(), None);
}

#[test]
fn completing_selection_binds_the_composed_file() {
    let mut app = facets_app();
    set_row(&mut app, FacetRow::Duration, 2); // 10
    set_row(&mut app, FacetRow::Level, 3); // avanzado
    set_row(&mut app, FacetRow::Music, 1); // con_musica

    match app.sync() {
        Rebind::To(asset) => {
            assert_eq!(asset.identifier, "meditacion_kokoro_10_avanzado_con_musica.wav");
        }
        other => panic!("expected a bind, got {other:?}"),
    }
    assert_eq!(app.sync(), Rebind::Keep);
}

#[test]
fn changing_a_facet_rebinds_and_clearing_unbinds() {
    let mut app = facets_app();
    set_row(&mut app, FacetRow::Duration, 1);
    set_row(&mut app, FacetRow::Level, 1);
    set_row(&mut app, FacetRow::Music, 1);
    assert!(matches!(app.sync(), Rebind::To(_)));

    set_row(&mut app, FacetRow::Music, 1);
    match app.sync() {
        Rebind::To(asset) => {
            assert_eq!(asset.identifier, "meditacion_kokoro_5_principiante_mute.wav");
        }
        other => panic!("expected a rebind, got {other:?}"),
    }

    app.clear_focused();
    assert_eq!(app.sync(), Rebind::Unbind);
    assert_eq!(app.bound(), None);
}

#[test]
fn focus_wraps_in_both_directions() {
    let mut app = facets_app();
    app.move_up();
    assert!(matches!(
        app.selection,
        Selection::Facets {
            focus: FacetRow::Music,
            ..
        }
    ));
    app.move_down();
    assert!(matches!(
        app.selection,
        Selection::Facets {
            focus: FacetRow::Duration,
            ..
        }
    ));
}

#[test]
fn enumerated_mode_binds_the_default_entry_first() {
    let mut app = list_app();
    assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("b.wav"));
    match app.sync() {
        Rebind::To(asset) => assert_eq!(asset.identifier, "b.wav"),
        other => panic!("expected a bind, got {other:?}"),
    }
}

#[test]
fn moving_the_cursor_does_not_rebind_until_enter() {
    let mut app = list_app();
    app.sync();

    app.move_down();
    assert_eq!(app.sync(), Rebind::Keep);

    app.activate();
    match app.sync() {
        Rebind::To(asset) => assert_eq!(asset.identifier, "c.wav"),
        other => panic!("expected a rebind, got {other:?}"),
    }

    // Cursor wraps; selecting the same entry again is not a rebind.
    app.move_down();
    app.move_down();
    app.move_down();
    app.activate();
    assert_eq!(app.sync(), Rebind::Keep);
}

#[test]
fn enumerated_mode_never_unbinds() {
    let mut app = list_app();
    app.sync();
    app.clear_focused();
    assert_eq!(app.sync(), Rebind::Keep);
    assert!(app.bound().is_some());
}
