//! Histórico (change-log) view.

use crate::state::App;
use crate::views::helpers::data_hora;
use demtrack_client::RecursoHistorico;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_list(f, app, chunks[0]);
    render_detail(f, app, chunks[1]);
}

fn title(app: &App) -> String {
    let recurso = match app.historico_view.recurso {
        RecursoHistorico::Demandas => "Demandas",
        RecursoHistorico::Solucoes => "Soluções",
    };
    match app.historico_view.registro_filter {
        Some(id) => format!("Histórico de {} (registro {}) — t alterna, Esc limpa", recurso, id),
        None => format!("Histórico de {} — t alterna recurso", recurso),
    }
}

fn render_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    let visible = app.historico_view.visible();
    let ctx = app.lookups.context();

    if app.historico_view.loading {
        let widget = Paragraph::new("Carregando...")
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().title(title(app)).borders(Borders::ALL));
        f.render_widget(widget, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|entry| {
            let header = Line::from(vec![
                Span::styled(
                    data_hora(entry.created_at),
                    Style::default().fg(app.theme.text_dim),
                ),
                Span::raw("  "),
                Span::styled(entry.usuario.clone(), Style::default().fg(app.theme.accent)),
            ]);
            let body = Line::from(entry.render(&ctx));
            ListItem::new(vec![header, body])
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = app.historico_view.selected {
        if let Some(index) = visible.iter().position(|e| e.id == selected) {
            state.select(Some(index));
        }
    }

    let list = List::new(items)
        .block(Block::default().title(title(app)).borders(Borders::ALL))
        .highlight_style(Style::default().bg(app.theme.bg_highlight));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame<'_>, app: &App, area: Rect) {
    let ctx = app.lookups.context();
    let selected = app.historico_view.selected.and_then(|id| {
        app.historico_view
            .entries
            .iter()
            .find(|entry| entry.id == id)
    });

    let mut lines = Vec::new();
    if let Some(entry) = selected {
        lines.push(Line::from(vec![
            Span::styled("Usuário: ", Style::default().fg(app.theme.primary)),
            Span::raw(entry.usuario.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Quando: ", Style::default().fg(app.theme.primary)),
            Span::raw(data_hora(entry.created_at)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Registro: ", Style::default().fg(app.theme.primary)),
            Span::raw(entry.registro_id.to_string()),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Alterações",
            Style::default().fg(app.theme.primary),
        )));
        lines.push(Line::from(entry.render(&ctx)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Snapshot",
            Style::default().fg(app.theme.primary),
        )));
        let snapshot = serde_json::to_string_pretty(&entry.registro)
            .unwrap_or_else(|_| entry.registro.to_string());
        for line in snapshot.lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Entrada").borders(Borders::ALL));
    f.render_widget(widget, area);
}
