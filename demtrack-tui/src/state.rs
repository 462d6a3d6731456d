//! Application state and view state definitions.

use crate::config::TuiConfig;
use crate::nav::{ReferenceKind, View};
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::ClaroTheme;
use demtrack_client::{RecursoHistorico, RestClient};
use demtrack_core::{
    Alinhamento, Categoria, Demanda, Desenvolvedor, HistoricoEntry, Linguagem, LookupContext,
    PageMeta, PageState, Prioridade, Proprietario, RecordId, Responsavel, Solucao, StatusDemanda,
    Time, Tipo,
};

/// Page sizes the `+` key cycles through.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

#[derive(Debug, Clone)]
pub struct ProprietarioContext {
    pub proprietario_id: Option<RecordId>,
    pub nome: Option<String>,
}

impl ProprietarioContext {
    pub fn new(proprietario_id: Option<RecordId>) -> Self {
        Self {
            proprietario_id,
            nome: None,
        }
    }
}

pub trait HasRecordId {
    fn record_id(&self) -> RecordId;
}

macro_rules! has_record_id {
    ($($entity:ty),* $(,)?) => {
        $(impl HasRecordId for $entity {
            fn record_id(&self) -> RecordId {
                self.id
            }
        })*
    };
}

has_record_id!(
    Demanda,
    Solucao,
    HistoricoEntry,
    StatusDemanda,
    Categoria,
    Alinhamento,
    Prioridade,
    Time,
    Desenvolvedor,
    Responsavel,
    Proprietario,
    Tipo,
    Linguagem,
);

/// State for one paginated collection view: the current page of items
/// plus pagination, selection, search, and loading flags.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub page: PageState,
    pub selected: Option<RecordId>,
    pub busca: String,
    pub loading: bool,
}

impl<T: HasRecordId> CollectionState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: PageState::new(page_size),
            selected: None,
            busca: String::new(),
            loading: false,
        }
    }

    /// Replace the displayed page with a freshly fetched one.
    ///
    /// Selection is kept when the selected record survived the refetch,
    /// cleared otherwise so it never points at a row on another page.
    pub fn set_page(&mut self, items: Vec<T>, meta: &PageMeta) {
        self.items = items;
        self.page.apply_meta(meta);
        self.loading = false;
        if let Some(id) = self.selected {
            if !self.items.iter().any(|item| item.record_id() == id) {
                self.selected = None;
            }
        }
    }

    pub fn selected_item(&self) -> Option<&T> {
        let id = self.selected?;
        self.items.iter().find(|item| item.record_id() == id)
    }

    pub fn select_next(&mut self) {
        select_next_id(&self.items, &mut self.selected);
    }

    pub fn select_previous(&mut self) {
        select_prev_id(&self.items, &mut self.selected);
    }
}

fn select_next_id<T: HasRecordId>(items: &[T], selected: &mut Option<RecordId>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| items.iter().position(|item| item.record_id() == id))
        .unwrap_or(usize::MAX);
    let next = if index == usize::MAX {
        0
    } else {
        (index + 1) % items.len()
    };
    *selected = Some(items[next].record_id());
}

fn select_prev_id<T: HasRecordId>(items: &[T], selected: &mut Option<RecordId>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| items.iter().position(|item| item.record_id() == id))
        .unwrap_or(0);
    let prev = if index == 0 {
        items.len() - 1
    } else {
        index - 1
    };
    *selected = Some(items[prev].record_id());
}

/// Change-log view: which resource's histórico is shown, full entry
/// list for the owner, and an optional per-record filter.
#[derive(Debug, Clone)]
pub struct HistoricoViewState {
    pub recurso: RecursoHistorico,
    pub entries: Vec<HistoricoEntry>,
    /// When set, only entries for this record are shown.
    pub registro_filter: Option<RecordId>,
    pub selected: Option<RecordId>,
    pub loading: bool,
}

impl HistoricoViewState {
    pub fn new() -> Self {
        Self {
            recurso: RecursoHistorico::Demandas,
            entries: Vec::new(),
            registro_filter: None,
            selected: None,
            loading: false,
        }
    }

    pub fn set_entries(&mut self, entries: Vec<HistoricoEntry>) {
        self.entries = entries;
        self.loading = false;
        if let Some(id) = self.selected {
            if !self.visible().iter().any(|e| e.id == id) {
                self.selected = None;
            }
        }
    }

    /// Entries after the record filter, newest first.
    pub fn visible(&self) -> Vec<&HistoricoEntry> {
        let mut entries: Vec<&HistoricoEntry> = self
            .entries
            .iter()
            .filter(|entry| match self.registro_filter {
                Some(registro_id) => entry.registro_id == registro_id,
                None => true,
            })
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries
    }

    pub fn toggle_recurso(&mut self) {
        self.recurso = match self.recurso {
            RecursoHistorico::Demandas => RecursoHistorico::Solucoes,
            RecursoHistorico::Solucoes => RecursoHistorico::Demandas,
        };
        self.registro_filter = None;
        self.selected = None;
    }
}

impl Default for HistoricoViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Dashboard snapshot: the owner's full demanda list, aggregated at
/// render time.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub demandas: Vec<Demanda>,
    pub loading: bool,
}

/// Reference collections cached for id -> name resolution.
#[derive(Debug, Clone, Default)]
pub struct LookupCache {
    pub tipos: Vec<Tipo>,
    pub linguagens: Vec<Linguagem>,
    pub desenvolvedores: Vec<Desenvolvedor>,
    pub categorias: Vec<Categoria>,
    pub responsaveis: Vec<Responsavel>,
    pub status: Vec<StatusDemanda>,
    pub demandas: Vec<Demanda>,
    pub alinhamentos: Vec<Alinhamento>,
    pub prioridades: Vec<Prioridade>,
    pub proprietarios: Vec<Proprietario>,
}

impl LookupCache {
    pub fn context(&self) -> LookupContext<'_> {
        LookupContext {
            tipos: &self.tipos,
            linguagens: &self.linguagens,
            desenvolvedores: &self.desenvolvedores,
            categorias: &self.categorias,
            responsaveis: &self.responsaveis,
            status: &self.status,
            demandas: &self.demandas,
            alinhamentos: &self.alinhamentos,
            prioridades: &self.prioridades,
            proprietarios: &self.proprietarios,
        }
    }

    pub fn nome_status(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.status
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.nome.as_str())
    }

    pub fn status_cor(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.status
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.cor.as_str())
    }

    pub fn nome_prioridade(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.prioridades
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.nome.as_str())
    }

    pub fn nome_responsavel(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.responsaveis
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.nome.as_str())
    }

    pub fn nome_categoria(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.categorias
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.nome.as_str())
    }

    pub fn nome_tipo(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.tipos.iter().find(|t| t.id == id).map(|t| t.nome.as_str())
    }

    pub fn nome_desenvolvedor(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.desenvolvedores
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.nome.as_str())
    }

    pub fn nome_demanda(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.demandas
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.nome.as_str())
    }

    /// Resolve a comma-joined linguagem id list ("1,3") to names.
    pub fn nomes_linguagens(&self, raw: Option<&str>) -> Option<String> {
        let raw = raw?;
        let nomes: Vec<&str> = raw
            .split(',')
            .filter_map(|part| {
                let id = part.trim().parse::<RecordId>().ok()?;
                self.linguagens
                    .iter()
                    .find(|l| l.id == id)
                    .map(|l| l.nome.as_str())
            })
            .collect();
        if nomes.is_empty() {
            None
        } else {
            Some(nomes.join(", "))
        }
    }
}

/// Modal dialogs layered over the active view.
#[derive(Debug, Clone)]
pub enum Modal {
    Help,
    /// Free-text search applied to the active list on confirm.
    Busca { buffer: String },
    ConfirmDelete {
        kind: ReferenceKind,
        id: RecordId,
        nome: String,
    },
    /// Create (id None) or rename (id Some) a reference record.
    EditNome {
        kind: ReferenceKind,
        id: Option<RecordId>,
        buffer: String,
    },
}

#[derive(Clone)]
pub struct App {
    pub config: TuiConfig,
    pub theme: ClaroTheme,
    pub api: RestClient,
    pub proprietario: ProprietarioContext,
    pub active_view: View,

    pub dashboard: DashboardState,
    pub demanda_view: CollectionState<Demanda>,
    pub solucao_view: CollectionState<Solucao>,
    pub historico_view: HistoricoViewState,

    pub categoria_view: CollectionState<Categoria>,
    pub alinhamento_view: CollectionState<Alinhamento>,
    pub prioridade_view: CollectionState<Prioridade>,
    pub status_view: CollectionState<StatusDemanda>,
    pub time_view: CollectionState<Time>,
    pub desenvolvedor_view: CollectionState<Desenvolvedor>,
    pub responsavel_view: CollectionState<Responsavel>,
    pub proprietario_view: CollectionState<Proprietario>,

    pub lookups: LookupCache,
    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: TuiConfig, api: RestClient) -> Self {
        let page_size = config.page_size;
        let proprietario = ProprietarioContext::new(config.proprietario_id);
        let active_view = if proprietario.proprietario_id.is_some() {
            View::Dashboard
        } else {
            // Nothing owner-scoped can load until an owner is picked.
            View::Proprietarios
        };
        Self {
            config,
            theme: ClaroTheme::claro(),
            api,
            proprietario,
            active_view,
            dashboard: DashboardState::default(),
            demanda_view: CollectionState::new(page_size),
            solucao_view: CollectionState::new(page_size),
            historico_view: HistoricoViewState::new(),
            categoria_view: CollectionState::new(page_size),
            alinhamento_view: CollectionState::new(page_size),
            prioridade_view: CollectionState::new(page_size),
            status_view: CollectionState::new(page_size),
            time_view: CollectionState::new(page_size),
            desenvolvedor_view: CollectionState::new(page_size),
            responsavel_view: CollectionState::new(page_size),
            proprietario_view: CollectionState::new(page_size),
            lookups: LookupCache::default(),
            notifications: Vec::new(),
            modal: None,
            should_quit: false,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn set_proprietario(&mut self, proprietario: &Proprietario) {
        self.proprietario.proprietario_id = Some(proprietario.id);
        self.proprietario.nome = Some(proprietario.nome.clone());
    }

    pub fn select_next(&mut self) {
        match self.active_view {
            View::Dashboard => {}
            View::Demandas => self.demanda_view.select_next(),
            View::Solucoes => self.solucao_view.select_next(),
            View::Historico => {
                let ids: Vec<RecordId> = self.historico_view.visible().iter().map(|e| e.id).collect();
                select_next_in(&ids, &mut self.historico_view.selected);
            }
            View::Categorias => self.categoria_view.select_next(),
            View::Alinhamentos => self.alinhamento_view.select_next(),
            View::Prioridades => self.prioridade_view.select_next(),
            View::Status => self.status_view.select_next(),
            View::Times => self.time_view.select_next(),
            View::Desenvolvedores => self.desenvolvedor_view.select_next(),
            View::Responsaveis => self.responsavel_view.select_next(),
            View::Proprietarios => self.proprietario_view.select_next(),
        }
    }

    pub fn select_previous(&mut self) {
        match self.active_view {
            View::Dashboard => {}
            View::Demandas => self.demanda_view.select_previous(),
            View::Solucoes => self.solucao_view.select_previous(),
            View::Historico => {
                let ids: Vec<RecordId> = self.historico_view.visible().iter().map(|e| e.id).collect();
                select_prev_in(&ids, &mut self.historico_view.selected);
            }
            View::Categorias => self.categoria_view.select_previous(),
            View::Alinhamentos => self.alinhamento_view.select_previous(),
            View::Prioridades => self.prioridade_view.select_previous(),
            View::Status => self.status_view.select_previous(),
            View::Times => self.time_view.select_previous(),
            View::Desenvolvedores => self.desenvolvedor_view.select_previous(),
            View::Responsaveis => self.responsavel_view.select_previous(),
            View::Proprietarios => self.proprietario_view.select_previous(),
        }
    }

    /// Search text of the active view, if it is a paginated list.
    pub fn active_busca_mut(&mut self) -> Option<&mut String> {
        match self.active_view {
            View::Dashboard | View::Historico => None,
            View::Demandas => Some(&mut self.demanda_view.busca),
            View::Solucoes => Some(&mut self.solucao_view.busca),
            View::Categorias => Some(&mut self.categoria_view.busca),
            View::Alinhamentos => Some(&mut self.alinhamento_view.busca),
            View::Prioridades => Some(&mut self.prioridade_view.busca),
            View::Status => Some(&mut self.status_view.busca),
            View::Times => Some(&mut self.time_view.busca),
            View::Desenvolvedores => Some(&mut self.desenvolvedor_view.busca),
            View::Responsaveis => Some(&mut self.responsavel_view.busca),
            View::Proprietarios => Some(&mut self.proprietario_view.busca),
        }
    }

    /// Apply a search to the active list. Resets to page 1 so results
    /// start from the beginning. Returns whether a refetch is needed.
    pub fn apply_busca(&mut self, busca: String) -> bool {
        let Some(slot) = self.active_busca_mut() else {
            return false;
        };
        *slot = busca;
        if let Some(page) = self.active_page_mut() {
            page.current_page = 1;
        }
        true
    }

    /// Pagination state of the active view, if it is a paginated list.
    pub fn active_page_mut(&mut self) -> Option<&mut PageState> {
        match self.active_view {
            View::Dashboard | View::Historico => None,
            View::Demandas => Some(&mut self.demanda_view.page),
            View::Solucoes => Some(&mut self.solucao_view.page),
            View::Categorias => Some(&mut self.categoria_view.page),
            View::Alinhamentos => Some(&mut self.alinhamento_view.page),
            View::Prioridades => Some(&mut self.prioridade_view.page),
            View::Status => Some(&mut self.status_view.page),
            View::Times => Some(&mut self.time_view.page),
            View::Desenvolvedores => Some(&mut self.desenvolvedor_view.page),
            View::Responsaveis => Some(&mut self.responsavel_view.page),
            View::Proprietarios => Some(&mut self.proprietario_view.page),
        }
    }

    /// Move the active list to its next page. Returns whether a refetch
    /// is needed.
    pub fn next_page(&mut self) -> bool {
        self.active_page_mut().map(PageState::advance).unwrap_or(false)
    }

    /// Move the active list to its previous page. Returns whether a
    /// refetch is needed.
    pub fn prev_page(&mut self) -> bool {
        self.active_page_mut().map(PageState::retreat).unwrap_or(false)
    }

    /// Cycle the active list through the supported page sizes. The page
    /// resets to 1 as part of the size change. Returns whether a refetch
    /// is needed.
    pub fn cycle_page_size(&mut self) -> bool {
        let Some(page) = self.active_page_mut() else {
            return false;
        };
        let current = PAGE_SIZES
            .iter()
            .position(|size| *size == page.page_size)
            .unwrap_or(0);
        let next = PAGE_SIZES[(current + 1) % PAGE_SIZES.len()];
        page.set_page_size(next);
        true
    }

    /// Uniform `(id, nome)` rows for a reference view.
    pub fn reference_rows(&self, kind: ReferenceKind) -> Vec<(RecordId, String)> {
        match kind {
            ReferenceKind::Categorias => rows(&self.categoria_view.items, |e| e.nome.clone()),
            ReferenceKind::Alinhamentos => rows(&self.alinhamento_view.items, |e| e.nome.clone()),
            ReferenceKind::Prioridades => rows(&self.prioridade_view.items, |e| e.nome.clone()),
            ReferenceKind::Status => rows(&self.status_view.items, |e| e.nome.clone()),
            ReferenceKind::Times => rows(&self.time_view.items, |e| e.nome.clone()),
            ReferenceKind::Desenvolvedores => {
                rows(&self.desenvolvedor_view.items, |e| e.nome.clone())
            }
            ReferenceKind::Responsaveis => rows(&self.responsavel_view.items, |e| e.nome.clone()),
            ReferenceKind::Proprietarios => rows(&self.proprietario_view.items, |e| e.nome.clone()),
        }
    }

    /// Pagination/selection/loading snapshot for a reference view.
    pub fn reference_list(&self, kind: ReferenceKind) -> (PageState, Option<RecordId>, bool) {
        match kind {
            ReferenceKind::Categorias => snapshot(&self.categoria_view),
            ReferenceKind::Alinhamentos => snapshot(&self.alinhamento_view),
            ReferenceKind::Prioridades => snapshot(&self.prioridade_view),
            ReferenceKind::Status => snapshot(&self.status_view),
            ReferenceKind::Times => snapshot(&self.time_view),
            ReferenceKind::Desenvolvedores => snapshot(&self.desenvolvedor_view),
            ReferenceKind::Responsaveis => snapshot(&self.responsavel_view),
            ReferenceKind::Proprietarios => snapshot(&self.proprietario_view),
        }
    }

    /// Currently selected reference record, as `(id, nome)`.
    pub fn reference_selected(&self, kind: ReferenceKind) -> Option<(RecordId, String)> {
        self.reference_rows(kind).into_iter().find(|(id, _)| {
            let (_, selected, _) = self.reference_list(kind);
            selected == Some(*id)
        })
    }
}

fn rows<T: HasRecordId>(items: &[T], nome: impl Fn(&T) -> String) -> Vec<(RecordId, String)> {
    items
        .iter()
        .map(|item| (item.record_id(), nome(item)))
        .collect()
}

fn snapshot<T>(state: &CollectionState<T>) -> (PageState, Option<RecordId>, bool) {
    (state.page, state.selected, state.loading)
}

fn select_next_in(ids: &[RecordId], selected: &mut Option<RecordId>) {
    if ids.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| ids.iter().position(|candidate| *candidate == id))
        .unwrap_or(usize::MAX);
    let next = if index == usize::MAX {
        0
    } else {
        (index + 1) % ids.len()
    };
    *selected = Some(ids[next]);
}

fn select_prev_in(ids: &[RecordId], selected: &mut Option<RecordId>) {
    if ids.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| ids.iter().position(|candidate| *candidate == id))
        .unwrap_or(0);
    let prev = if index == 0 { ids.len() - 1 } else { index - 1 };
    *selected = Some(ids[prev]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use demtrack_core::PageMeta;

    fn meta(current_page: u32, per_page: u32, next: bool, prev: bool) -> PageMeta {
        PageMeta {
            total: 120,
            per_page,
            current_page,
            last_page: 5,
            first_page: 1,
            first_page_url: "/?page=1".to_string(),
            last_page_url: "/?page=5".to_string(),
            next_page_url: next.then(|| "/?page=next".to_string()),
            previous_page_url: prev.then(|| "/?page=prev".to_string()),
        }
    }

    fn categorias(ids: &[RecordId]) -> Vec<Categoria> {
        ids.iter()
            .map(|id| Categoria::new(*id, format!("Categoria {}", id)))
            .collect()
    }

    #[test]
    fn set_page_keeps_surviving_selection() {
        let mut state: CollectionState<Categoria> = CollectionState::new(25);
        state.set_page(categorias(&[1, 2, 3]), &meta(1, 25, true, false));
        state.selected = Some(2);

        state.set_page(categorias(&[2, 4]), &meta(2, 25, false, true));
        assert_eq!(state.selected, Some(2));

        state.set_page(categorias(&[5, 6]), &meta(3, 25, false, true));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn set_page_clears_loading() {
        let mut state: CollectionState<Categoria> = CollectionState::new(25);
        state.loading = true;
        state.set_page(categorias(&[1]), &meta(1, 25, false, false));
        assert!(!state.loading);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state: CollectionState<Categoria> = CollectionState::new(25);
        state.set_page(categorias(&[1, 2, 3]), &meta(1, 25, false, false));

        state.select_next();
        assert_eq!(state.selected, Some(1));
        state.select_previous();
        assert_eq!(state.selected, Some(3));
        state.select_next();
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn selection_on_empty_list_is_none() {
        let mut state: CollectionState<Categoria> = CollectionState::new(25);
        state.select_next();
        assert_eq!(state.selected, None);
        state.select_previous();
        assert_eq!(state.selected, None);
    }

    #[test]
    fn historico_filter_restricts_visible_entries() {
        let mut state = HistoricoViewState::new();
        let entry = |id: RecordId, registro_id: RecordId| HistoricoEntry {
            id,
            registro_id,
            usuario: "ana".to_string(),
            descricao: String::new(),
            registro: serde_json::json!({}),
            changes: None,
            created_at: chrono::Utc::now(),
        };
        state.set_entries(vec![entry(1, 10), entry(2, 20), entry(3, 10)]);

        assert_eq!(state.visible().len(), 3);
        state.registro_filter = Some(10);
        let visible: Vec<RecordId> = state.visible().iter().map(|e| e.id).collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.contains(&1) && visible.contains(&3));
    }

    #[test]
    fn historico_toggle_switches_resource_and_clears_filter() {
        let mut state = HistoricoViewState::new();
        state.registro_filter = Some(7);
        state.toggle_recurso();
        assert_eq!(state.recurso, RecursoHistorico::Solucoes);
        assert_eq!(state.registro_filter, None);
        state.toggle_recurso();
        assert_eq!(state.recurso, RecursoHistorico::Demandas);
    }

    #[test]
    fn lookup_cache_resolves_multi_value_linguagens() {
        let lookups = LookupCache {
            linguagens: vec![Linguagem::new(1, "Rust"), Linguagem::new(3, "Python")],
            ..LookupCache::default()
        };
        assert_eq!(
            lookups.nomes_linguagens(Some("1,3")).as_deref(),
            Some("Rust, Python")
        );
        assert_eq!(lookups.nomes_linguagens(Some("9")), None);
        assert_eq!(lookups.nomes_linguagens(None), None);
    }

    fn test_app() -> App {
        let config: TuiConfig = toml::from_str(
            r#"
api_base_url = "http://localhost:3333"
request_timeout_ms = 5000
refresh_interval_ms = 30000
page_size = 25
persistence_path = "/tmp/demtrack-test-state.json"

[theme]
name = "claro"
"#,
        )
        .unwrap();
        let api =
            RestClient::new("http://localhost:3333", std::time::Duration::from_secs(5)).unwrap();
        App::new(config, api)
    }

    #[test]
    fn app_without_owner_starts_on_proprietarios() {
        let app = test_app();
        assert_eq!(app.active_view, View::Proprietarios);
    }

    #[test]
    fn cycle_page_size_resets_to_first_page() {
        let mut app = test_app();
        app.active_view = View::Demandas;
        app.demanda_view.page.current_page = 3;
        assert!(app.cycle_page_size());
        assert_eq!(app.demanda_view.page.page_size, 50);
        assert_eq!(app.demanda_view.page.current_page, 1);
    }

    #[test]
    fn next_page_is_gated_by_server_flags() {
        let mut app = test_app();
        app.active_view = View::Demandas;
        assert!(!app.next_page());

        app.demanda_view.page.has_next = true;
        assert!(app.next_page());
        assert_eq!(app.demanda_view.page.current_page, 2);
    }

    #[test]
    fn dashboard_has_no_pagination() {
        let mut app = test_app();
        app.active_view = View::Dashboard;
        assert!(!app.next_page());
        assert!(!app.prev_page());
        assert!(!app.cycle_page_size());
    }

    #[test]
    fn apply_busca_resets_to_first_page() {
        let mut app = test_app();
        app.active_view = View::Solucoes;
        app.solucao_view.page.current_page = 4;
        assert!(app.apply_busca("relatorio".to_string()));
        assert_eq!(app.solucao_view.busca, "relatorio");
        assert_eq!(app.solucao_view.page.current_page, 1);
    }

    #[test]
    fn busca_is_unavailable_outside_lists() {
        let mut app = test_app();
        app.active_view = View::Dashboard;
        assert!(!app.apply_busca("x".to_string()));
        app.active_view = View::Historico;
        assert!(app.active_busca_mut().is_none());
    }

    #[test]
    fn reference_rows_expose_id_and_nome() {
        let mut app = test_app();
        app.categoria_view
            .set_page(categorias(&[1, 2]), &meta(1, 25, false, false));
        let rows = app.reference_rows(ReferenceKind::Categorias);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], (1, "Categoria 1".to_string()));
    }
}
