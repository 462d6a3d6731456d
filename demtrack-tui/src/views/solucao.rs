//! Solução list view.

use crate::state::App;
use crate::theme::andamento_color;
use crate::views::helpers::{data_hora, opt, VAZIO};
use crate::widgets::{DetailPanel, ResourceTable};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Gauge},
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
    let view = &app.solucao_view;
    let rows: Vec<Vec<String>> = view
        .items
        .iter()
        .map(|s| {
            vec![
                s.nome.clone(),
                opt(app.lookups.nome_tipo(s.tipo_id)),
                app.lookups
                    .nomes_linguagens(s.linguagem_id.as_deref())
                    .unwrap_or_else(|| VAZIO.to_string()),
                opt(app.lookups.nome_desenvolvedor(s.desenvolvedor_id)),
                opt(app.lookups.nome_demanda(s.demanda_id)),
                s.andamento
                    .map(|a| format!("{}%", a))
                    .unwrap_or_else(|| VAZIO.to_string()),
            ]
        })
        .collect();
    let selected_index = view
        .selected
        .and_then(|id| view.items.iter().position(|s| s.id == id));

    let table = ResourceTable {
        title: "Soluções".to_string(),
        headers: vec![
            "Nome",
            "Tipo",
            "Linguagens",
            "Desenvolvedor",
            "Demanda",
            "Andamento",
        ],
        rows,
        widths: vec![
            Constraint::Min(18),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Min(14),
            Constraint::Length(10),
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

    let andamento = app
        .solucao_view
        .selected_item()
        .and_then(|s| s.andamento)
        .unwrap_or(0)
        .min(100);
    let gauge = Gauge::default()
        .block(Block::default().title("Andamento").borders(Borders::ALL))
        .gauge_style(Style::default().fg(andamento_color(andamento, &app.theme)))
        .percent(andamento as u16);
    f.render_widget(gauge, chunks[0]);

    let mut fields = Vec::new();
    if let Some(s) = app.solucao_view.selected_item() {
        fields.push(("Nome", s.nome.clone()));
        fields.push(("Descrição", opt(s.descricao.as_deref())));
        fields.push(("Tipo", opt(app.lookups.nome_tipo(s.tipo_id))));
        fields.push((
            "Linguagens",
            app.lookups
                .nomes_linguagens(s.linguagem_id.as_deref())
                .unwrap_or_else(|| VAZIO.to_string()),
        ));
        fields.push((
            "Desenvolvedor",
            opt(app.lookups.nome_desenvolvedor(s.desenvolvedor_id)),
        ));
        fields.push(("Demanda", opt(app.lookups.nome_demanda(s.demanda_id))));
        fields.push(("Criada em", data_hora(s.created_at)));
        fields.push(("Atualizada em", data_hora(s.updated_at)));
    }
    let detail = DetailPanel {
        title: "Detalhes",
        fields,
        style: Style::default().fg(app.theme.primary),
    };
    detail.render(f, chunks[1]);
}
