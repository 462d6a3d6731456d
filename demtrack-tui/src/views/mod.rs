//! View rendering dispatch.

pub mod dashboard;
pub mod demanda;
pub mod helpers;
pub mod historico;
pub mod reference;
pub mod solucao;

use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::theme::notification_color;
use crate::widgets::render_modal;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::Dashboard => dashboard::render(f, app, layout[1]),
        View::Demandas => demanda::render(f, app, layout[1]),
        View::Solucoes => solucao::render(f, app, layout[1]),
        View::Historico => historico::render(f, app, layout[1]),
        view => {
            if let Some(kind) = view.reference_kind() {
                reference::render(f, app, kind, layout[1]);
            }
        }
    }

    render_footer(f, app, layout[2]);
    render_modal(f, app);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let owner = match (&app.proprietario.nome, app.proprietario.proprietario_id) {
        (Some(nome), _) => nome.clone(),
        (None, Some(id)) => format!("#{}", id),
        (None, None) => "nenhum selecionado".to_string(),
    };
    let title = format!(
        "DEMTRACK | {} | Proprietário: {}",
        app.active_view.title(),
        owner
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(app.theme.primary)));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let help = "j/k move • h/l página • + tamanho • / busca • Tab visão • n/e/d referência • ? ajuda • q sair";
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "AVISO",
            NotificationLevel::Error => "ERRO",
            NotificationLevel::Success => "OK",
        };
        (
            format!("{}: {}", label, note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
