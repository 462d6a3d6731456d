//! Dashboard view: demanda counts grouped by status and by priority.

use crate::state::App;
use crate::theme::status_badge_bg;
use demtrack_core::{Demanda, Prioridade, StatusDemanda};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Label used for demandas whose status is unset or unknown.
const SEM_STATUS: &str = "Sem status";
const SEM_PRIORIDADE: &str = "Sem prioridade";

/// Demanda count per status, in the lookup's order, with the badge
/// color carried along. Unknown/unset statuses aggregate at the end.
pub fn contagem_por_status(
    demandas: &[Demanda],
    status: &[StatusDemanda],
) -> Vec<(String, String, u64)> {
    let mut counts: Vec<(String, String, u64)> = status
        .iter()
        .map(|s| {
            let count = demandas
                .iter()
                .filter(|d| d.status_id == Some(s.id))
                .count() as u64;
            (s.nome.clone(), s.cor.clone(), count)
        })
        .collect();
    let unknown = demandas
        .iter()
        .filter(|d| match d.status_id {
            Some(id) => !status.iter().any(|s| s.id == id),
            None => true,
        })
        .count() as u64;
    if unknown > 0 {
        counts.push((SEM_STATUS.to_string(), "#9E9E9E".to_string(), unknown));
    }
    counts
}

/// Demanda count per priority. Same aggregation rules as status.
pub fn contagem_por_prioridade(
    demandas: &[Demanda],
    prioridades: &[Prioridade],
) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = prioridades
        .iter()
        .map(|p| {
            let count = demandas
                .iter()
                .filter(|d| d.prioridade_id == Some(p.id))
                .count() as u64;
            (p.nome.clone(), count)
        })
        .collect();
    let unknown = demandas
        .iter()
        .filter(|d| match d.prioridade_id {
            Some(id) => !prioridades.iter().any(|p| p.id == id),
            None => true,
        })
        .count() as u64;
    if unknown > 0 {
        counts.push((SEM_PRIORIDADE.to_string(), unknown));
    }
    counts
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_summary(f, app, chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_status_chart(f, app, charts[0]);
    render_prioridade_chart(f, app, charts[1]);
}

fn render_summary(f: &mut Frame<'_>, app: &App, area: Rect) {
    let text = if app.dashboard.loading {
        "Carregando...".to_string()
    } else {
        format!("{} demandas", app.dashboard.demandas.len())
    };
    let widget = Paragraph::new(text)
        .style(Style::default().fg(app.theme.text))
        .block(Block::default().title("Resumo").borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_status_chart(f: &mut Frame<'_>, app: &App, area: Rect) {
    let counts = contagem_por_status(&app.dashboard.demandas, &app.lookups.status);
    let bars: Vec<Bar> = counts
        .iter()
        .map(|(nome, cor, count)| {
            Bar::default()
                .value(*count)
                .label(nome.clone().into())
                .style(Style::default().fg(status_badge_bg(cor, &app.theme)))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Demandas por status")
                .borders(Borders::ALL),
        )
        .bar_width(12)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn render_prioridade_chart(f: &mut Frame<'_>, app: &App, area: Rect) {
    let counts = contagem_por_prioridade(&app.dashboard.demandas, &app.lookups.prioridades);
    let bars: Vec<Bar> = counts
        .iter()
        .map(|(nome, count)| {
            Bar::default()
                .value(*count)
                .label(nome.clone().into())
                .style(Style::default().fg(app.theme.accent))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Demandas por prioridade")
                .borders(Borders::ALL),
        )
        .bar_width(12)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use demtrack_core::RecordId;

    fn demanda(id: RecordId, status_id: Option<RecordId>, prioridade_id: Option<RecordId>) -> Demanda {
        Demanda {
            id,
            nome: format!("Demanda {}", id),
            descricao: None,
            demandante: None,
            status_id,
            prioridade_id,
            categoria_id: None,
            alinhamento_id: None,
            responsavel_id: None,
            proprietario_id: 1,
            data_status: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn counts_follow_lookup_order() {
        let status = vec![
            StatusDemanda::new(1, "Aberto", "#4CAF50"),
            StatusDemanda::new(2, "Fechado", "#9E9E9E"),
        ];
        let demandas = vec![
            demanda(1, Some(2), None),
            demanda(2, Some(1), None),
            demanda(3, Some(1), None),
        ];
        let counts = contagem_por_status(&demandas, &status);
        assert_eq!(counts[0], ("Aberto".to_string(), "#4CAF50".to_string(), 2));
        assert_eq!(counts[1].2, 1);
    }

    #[test]
    fn unset_and_unknown_statuses_aggregate() {
        let status = vec![StatusDemanda::new(1, "Aberto", "#4CAF50")];
        let demandas = vec![
            demanda(1, None, None),
            demanda(2, Some(99), None),
            demanda(3, Some(1), None),
        ];
        let counts = contagem_por_status(&demandas, &status);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[1].0, SEM_STATUS);
        assert_eq!(counts[1].2, 2);
    }

    #[test]
    fn no_unknown_bucket_when_all_resolve() {
        let prioridades = vec![Prioridade::new(1, "Alta")];
        let demandas = vec![demanda(1, None, Some(1))];
        let counts = contagem_por_prioridade(&demandas, &prioridades);
        assert_eq!(counts, vec![("Alta".to_string(), 1)]);
    }

    #[test]
    fn empty_inputs_produce_empty_counts() {
        assert!(contagem_por_status(&[], &[]).is_empty());
        assert!(contagem_por_prioridade(&[], &[]).is_empty());
    }
}
