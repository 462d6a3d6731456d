//! Demanda list view.

use crate::state::App;
use crate::views::helpers::{data, data_hora, opt};
use crate::widgets::{status_badge, DetailPanel, ResourceTable};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_table(f, app, chunks[0]);
    render_detail(f, app, chunks[1]);
}

fn render_table(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.demanda_view;
    let rows: Vec<Vec<String>> = view
        .items
        .iter()
        .map(|d| {
            vec![
                d.nome.clone(),
                opt(app.lookups.nome_status(d.status_id)),
                opt(app.lookups.nome_prioridade(d.prioridade_id)),
                opt(app.lookups.nome_responsavel(d.responsavel_id)),
                data(d.data_status),
            ]
        })
        .collect();
    let selected_index = view
        .selected
        .and_then(|id| view.items.iter().position(|d| d.id == id));

    let table = ResourceTable {
        title: "Demandas".to_string(),
        headers: vec!["Nome", "Status", "Prioridade", "Responsável", "Data do status"],
        rows,
        widths: vec![
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(14),
        ],
        page: view.page,
        selected_index,
        loading: view.loading,
    };
    table.render(f, &app.theme, area);
}

fn render_detail(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let badge = app
        .demanda_view
        .selected_item()
        .and_then(|d| d.status_id)
        .and_then(|id| app.lookups.status.iter().find(|s| s.id == id))
        .map(|s| status_badge(&s.nome, &s.cor, &app.theme));
    let line = match badge {
        Some(span) => Line::from(span),
        None => Line::from(""),
    };
    let status_line = Paragraph::new(line)
        .block(Block::default().title("Status").borders(Borders::ALL));
    f.render_widget(status_line, chunks[0]);

    let mut fields = Vec::new();
    if let Some(d) = app.demanda_view.selected_item() {
        fields.push(("Nome", d.nome.clone()));
        fields.push(("Descrição", opt(d.descricao.as_deref())));
        fields.push(("Demandante", opt(d.demandante.as_deref())));
        fields.push(("Categoria", opt(app.lookups.nome_categoria(d.categoria_id))));
        fields.push((
            "Alinhamento",
            opt(app
                .lookups
                .alinhamentos
                .iter()
                .find(|a| Some(a.id) == d.alinhamento_id)
                .map(|a| a.nome.as_str())),
        ));
        fields.push((
            "Responsável",
            opt(app.lookups.nome_responsavel(d.responsavel_id)),
        ));
        fields.push(("Data do status", data(d.data_status)));
        fields.push(("Criada em", data_hora(d.created_at)));
        fields.push(("Atualizada em", data_hora(d.updated_at)));
    }
    let detail = DetailPanel {
        title: "Detalhes",
        fields,
        style: Style::default().fg(app.theme.primary),
    };
    detail.render(f, chunks[1]);
}
