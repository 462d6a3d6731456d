//! Shared screen for the reference-data resources.
//!
//! All reference collections are flat `(id, nome)` lists and share one
//! render path; Status adds a color column, Proprietários adds the
//! owner-selection marker.

use crate::nav::ReferenceKind;
use crate::state::App;
use crate::widgets::ResourceTable;
use ratatui::layout::{Constraint, Rect};
use ratatui::Frame;

pub fn render(f: &mut Frame<'_>, app: &App, kind: ReferenceKind, area: Rect) {
    let (page, selected, loading) = app.reference_list(kind);
    let rows_base = app.reference_rows(kind);
    let selected_index = selected.and_then(|id| rows_base.iter().position(|(rid, _)| *rid == id));

    let (headers, widths, rows): (Vec<&str>, Vec<Constraint>, Vec<Vec<String>>) = match kind {
        ReferenceKind::Status => {
            let rows = app
                .status_view
                .items
                .iter()
                .map(|s| vec![s.nome.clone(), s.cor.clone()])
                .collect();
            (
                vec!["Nome", "Cor"],
                vec![Constraint::Min(20), Constraint::Length(10)],
                rows,
            )
        }
        ReferenceKind::Proprietarios => {
            let rows = rows_base
                .iter()
                .map(|(id, nome)| {
                    let marker = if app.proprietario.proprietario_id == Some(*id) {
                        "ativo"
                    } else {
                        ""
                    };
                    vec![nome.clone(), marker.to_string()]
                })
                .collect();
            (
                vec!["Nome", ""],
                vec![Constraint::Min(20), Constraint::Length(8)],
                rows,
            )
        }
        _ => {
            let rows = rows_base
                .iter()
                .map(|(_, nome)| vec![nome.clone()])
                .collect();
            (vec!["Nome"], vec![Constraint::Min(20)], rows)
        }
    };

    let title = if kind == ReferenceKind::Proprietarios {
        format!("{} — Espaço seleciona o proprietário ativo", kind.title())
    } else {
        kind.title().to_string()
    };

    let table = ResourceTable {
        title,
        headers,
        rows,
        widths,
        page,
        selected_index,
        loading,
    };
    table.render(f, &app.theme, area);
}
