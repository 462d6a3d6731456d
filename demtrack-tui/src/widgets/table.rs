//! Paginated resource table widget.
//!
//! All list views render through this widget so they share one
//! contract: a `#` column numbered continuously across pages, a
//! loading placeholder that wins over the empty placeholder, and a
//! pager line fed only by the server's navigation flags.

use crate::theme::ClaroTheme;
use demtrack_core::PageState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// What the table body shows, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBody {
    /// A fetch is in flight; takes precedence over the empty state so a
    /// refetch never flashes "no records".
    Loading,
    Empty,
    Rows,
}

impl TableBody {
    pub fn classify(loading: bool, row_count: usize) -> Self {
        if loading {
            TableBody::Loading
        } else if row_count == 0 {
            TableBody::Empty
        } else {
            TableBody::Rows
        }
    }
}

pub struct ResourceTable<'a> {
    pub title: String,
    /// Column headers, not counting the leading `#` column.
    pub headers: Vec<&'a str>,
    /// One cell vector per row, aligned with `headers`.
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<Constraint>,
    pub page: PageState,
    pub selected_index: Option<usize>,
    pub loading: bool,
}

impl ResourceTable<'_> {
    pub fn render(&self, f: &mut Frame<'_>, theme: &ClaroTheme, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        match TableBody::classify(self.loading, self.rows.len()) {
            TableBody::Loading => self.render_placeholder(f, theme, chunks[0], "Carregando..."),
            TableBody::Empty => {
                self.render_placeholder(f, theme, chunks[0], "Nenhum registro encontrado")
            }
            TableBody::Rows => self.render_rows(f, theme, chunks[0]),
        }
        self.render_pager(f, theme, chunks[1]);
    }

    fn render_placeholder(&self, f: &mut Frame<'_>, theme: &ClaroTheme, area: Rect, text: &str) {
        let widget = Paragraph::new(text)
            .style(Style::default().fg(theme.text_dim))
            .block(
                Block::default()
                    .title(self.title.as_str())
                    .borders(Borders::ALL),
            );
        f.render_widget(widget, area);
    }

    fn render_rows(&self, f: &mut Frame<'_>, theme: &ClaroTheme, area: Rect) {
        let header_cells = std::iter::once("#")
            .chain(self.headers.iter().copied())
            .map(|h| Cell::from(h).style(Style::default().fg(theme.primary)));
        let header = Row::new(header_cells).height(1);

        let rows = self.rows.iter().enumerate().map(|(index, cells)| {
            let numbered = std::iter::once(self.page.row_number(index).to_string())
                .chain(cells.iter().cloned())
                .map(Cell::from);
            let style = if self.selected_index == Some(index) {
                Style::default()
                    .bg(theme.bg_highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Row::new(numbered).style(style)
        });

        let mut widths = vec![Constraint::Length(6)];
        widths.extend(self.widths.iter().cloned());

        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .title(self.title.as_str())
                .borders(Borders::ALL),
        );
        f.render_widget(table, area);
    }

    fn render_pager(&self, f: &mut Frame<'_>, theme: &ClaroTheme, area: Rect) {
        let arrow = |enabled: bool| {
            if enabled {
                Style::default().fg(theme.primary)
            } else {
                Style::default().fg(theme.text_muted)
            }
        };
        let line = Line::from(vec![
            Span::styled("← anterior", arrow(self.page.has_prev)),
            Span::styled(
                format!(
                    "  página {}  ({} registros, {} por página)  ",
                    self.page.current_page, self.page.total_records, self.page.page_size
                ),
                Style::default().fg(theme.text_dim),
            ),
            Span::styled("próxima →", arrow(self.page.has_next)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_wins_over_empty() {
        assert_eq!(TableBody::classify(true, 0), TableBody::Loading);
        assert_eq!(TableBody::classify(true, 5), TableBody::Loading);
    }

    #[test]
    fn empty_only_when_idle_and_no_rows() {
        assert_eq!(TableBody::classify(false, 0), TableBody::Empty);
        assert_eq!(TableBody::classify(false, 1), TableBody::Rows);
    }

    #[test]
    fn row_numbers_continue_across_pages() {
        let mut page = PageState::new(25);
        page.current_page = 3;
        assert_eq!(page.row_number(0), 51);
        assert_eq!(page.row_number(24), 75);
    }
}
