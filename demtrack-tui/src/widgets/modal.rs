//! Modal dialogs rendered over the active view.

use crate::state::{App, Modal};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Centered sub-rect covering the given percentage of the area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn render_modal(f: &mut Frame<'_>, app: &App) {
    let Some(modal) = &app.modal else {
        return;
    };
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Busca { buffer } => render_input(f, app, "Busca", "Termo: ", buffer),
        Modal::ConfirmDelete { kind, nome, .. } => {
            let title = format!("Excluir {}", kind.singular());
            let body = format!(
                "Excluir \"{}\"?\n\nEnter confirma, Esc cancela.",
                nome
            );
            render_dialog(f, app, &title, &body);
        }
        Modal::EditNome { kind, id, buffer } => {
            let title = if id.is_some() {
                format!("Editar {}", kind.singular())
            } else {
                format!("Novo {}", kind.singular())
            };
            render_input(f, app, &title, "Nome: ", buffer);
        }
    }
}

fn render_help(f: &mut Frame<'_>, app: &App) {
    let area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);
    let lines = [
        "Tab / Shift-Tab  alternar visão",
        "1-9, 0           ir direto para uma visão",
        "j/k ou setas     mover seleção",
        "h/l ou setas     página anterior / próxima",
        "+                alternar tamanho da página",
        "/                buscar na lista atual",
        "Espaço           selecionar proprietário (na visão Proprietários)",
        "n / e / d        novo / editar / excluir (referências)",
        "Ctrl-R           recarregar a visão atual",
        "?                esta ajuda",
        "q ou Ctrl-C      sair",
    ];
    let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
    let widget = Paragraph::new(text)
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Atalhos")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(widget, area);
}

fn render_dialog(f: &mut Frame<'_>, app: &App, title: &str, body: &str) {
    let area = centered_rect(50, 30, f.size());
    f.render_widget(Clear, area);
    let widget = Paragraph::new(body.to_string())
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.warning)),
        );
    f.render_widget(widget, area);
}

fn render_input(f: &mut Frame<'_>, app: &App, title: &str, label: &str, buffer: &str) {
    let area = centered_rect(50, 20, f.size());
    f.render_widget(Clear, area);
    let line = Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(app.theme.primary)),
        Span::styled(
            buffer.to_string(),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
        Span::styled("▏", Style::default().fg(app.theme.primary)),
    ]);
    let widget = Paragraph::new(vec![
        line,
        Line::from(""),
        Line::from(Span::styled(
            "Enter salva, Esc cancela",
            Style::default().fg(app.theme.text_dim),
        )),
    ])
    .block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border_focus)),
    );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 30, parent);
        assert!(rect.x >= parent.x && rect.y >= parent.y);
        assert!(rect.right() <= parent.right() && rect.bottom() <= parent.bottom());
    }
}
