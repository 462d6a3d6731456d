//! Navigation and view switching.

use serde::{Deserialize, Serialize};

/// Reference-data resources that share the same list/edit screen shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Categorias,
    Alinhamentos,
    Prioridades,
    Status,
    Times,
    Desenvolvedores,
    Responsaveis,
    Proprietarios,
}

impl ReferenceKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReferenceKind::Categorias => "Categorias",
            ReferenceKind::Alinhamentos => "Alinhamentos",
            ReferenceKind::Prioridades => "Prioridades",
            ReferenceKind::Status => "Status",
            ReferenceKind::Times => "Times",
            ReferenceKind::Desenvolvedores => "Desenvolvedores",
            ReferenceKind::Responsaveis => "Responsáveis",
            ReferenceKind::Proprietarios => "Proprietários",
        }
    }

    /// Singular label used in modal titles ("Nova Categoria").
    pub fn singular(&self) -> &'static str {
        match self {
            ReferenceKind::Categorias => "Categoria",
            ReferenceKind::Alinhamentos => "Alinhamento",
            ReferenceKind::Prioridades => "Prioridade",
            ReferenceKind::Status => "Status",
            ReferenceKind::Times => "Time",
            ReferenceKind::Desenvolvedores => "Desenvolvedor",
            ReferenceKind::Responsaveis => "Responsável",
            ReferenceKind::Proprietarios => "Proprietário",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    Demandas,
    Solucoes,
    Historico,
    Categorias,
    Alinhamentos,
    Prioridades,
    Status,
    Times,
    Desenvolvedores,
    Responsaveis,
    Proprietarios,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Demandas => "Demandas",
            View::Solucoes => "Soluções",
            View::Historico => "Histórico",
            View::Categorias => "Categorias",
            View::Alinhamentos => "Alinhamentos",
            View::Prioridades => "Prioridades",
            View::Status => "Status",
            View::Times => "Times",
            View::Desenvolvedores => "Desenvolvedores",
            View::Responsaveis => "Responsáveis",
            View::Proprietarios => "Proprietários",
        }
    }

    pub fn all() -> &'static [View] {
        &[
            View::Dashboard,
            View::Demandas,
            View::Solucoes,
            View::Historico,
            View::Categorias,
            View::Alinhamentos,
            View::Prioridades,
            View::Status,
            View::Times,
            View::Desenvolvedores,
            View::Responsaveis,
            View::Proprietarios,
        ]
    }

    /// Which reference resource this view shows, if any.
    pub fn reference_kind(&self) -> Option<ReferenceKind> {
        match self {
            View::Categorias => Some(ReferenceKind::Categorias),
            View::Alinhamentos => Some(ReferenceKind::Alinhamentos),
            View::Prioridades => Some(ReferenceKind::Prioridades),
            View::Status => Some(ReferenceKind::Status),
            View::Times => Some(ReferenceKind::Times),
            View::Desenvolvedores => Some(ReferenceKind::Desenvolvedores),
            View::Responsaveis => Some(ReferenceKind::Responsaveis),
            View::Proprietarios => Some(ReferenceKind::Proprietarios),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let all = Self::all();
        let idx = self.index();
        all[if idx == 0 { all.len() - 1 } else { idx - 1 }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_views() {
        let mut view = View::Dashboard;
        for _ in 0..View::all().len() {
            view = view.next();
        }
        assert_eq!(view, View::Dashboard);
    }

    #[test]
    fn previous_is_inverse_of_next() {
        for view in View::all() {
            assert_eq!(view.next().previous(), *view);
        }
    }

    #[test]
    fn reference_views_map_to_kinds() {
        assert_eq!(View::Status.reference_kind(), Some(ReferenceKind::Status));
        assert_eq!(View::Demandas.reference_kind(), None);
        assert_eq!(View::Dashboard.reference_kind(), None);
    }
}
