//! Demtrack TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use demtrack_client::{ListParams, NomeRequest, RestClient, StatusRequest};
use demtrack_core::RecordId;
use demtrack_tui::config::TuiConfig;
use demtrack_tui::error::TuiError;
use demtrack_tui::events::TuiEvent;
use demtrack_tui::keys::{map_key, Action};
use demtrack_tui::nav::{ReferenceKind, View};
use demtrack_tui::notifications::NotificationLevel;
use demtrack_tui::persistence::{self, PersistedState};
use demtrack_tui::state::{App, Modal};
use demtrack_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// Default badge color for statuses created from the TUI.
const COR_PADRAO: &str = "#9E9E9E";

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    let api = RestClient::new(
        &config.api_base_url,
        Duration::from_millis(config.request_timeout_ms),
    )?;
    let mut app = App::new(config, api);
    restore_persisted(&mut app);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    reload_lookups(&mut app).await;
    if let Err(err) = refresh_view(&mut app).await {
        app.notify(
            NotificationLevel::Error,
            format!("Falha ao carregar: {}", err),
        );
    }

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                let _ = event_tx.send(TuiEvent::Tick).await;
            }
            event = event_rx.recv() => {
                // The reader thread never drops its sender while running.
                let event = event.ok_or(TuiError::ChannelClosed)?;
                if handle_event(&mut app, event).await? {
                    break;
                }
            }
        }
    }

    let persisted = PersistedState {
        active_view: app.active_view,
        proprietario_id: app.proprietario.proprietario_id,
        page_size: app.demanda_view.page.page_size,
    };
    let _ = persistence::save(&app.config.persistence_path, &persisted);

    Ok(())
}

fn restore_persisted(app: &mut App) {
    let Ok(Some(state)) = persistence::load(&app.config.persistence_path) else {
        return;
    };
    // Config wins over persisted state for the owner selection.
    if app.proprietario.proprietario_id.is_none() {
        app.proprietario.proprietario_id = state.proprietario_id;
    }
    if app.proprietario.proprietario_id.is_some() {
        app.active_view = state.active_view;
    }
    if (1..=100).contains(&state.page_size) {
        for page in [
            &mut app.demanda_view.page,
            &mut app.solucao_view.page,
            &mut app.categoria_view.page,
            &mut app.alinhamento_view.page,
            &mut app.prioridade_view.page,
            &mut app.status_view.page,
            &mut app.time_view.page,
            &mut app.desenvolvedor_view.page,
            &mut app.responsavel_view.page,
            &mut app.proprietario_view.page,
        ] {
            page.set_page_size(state.page_size);
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

async fn handle_event(app: &mut App, event: TuiEvent) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            if app.modal.is_some() {
                handle_modal_key(app, key).await;
                return Ok(false);
            }
            if handle_view_key(app, key).await {
                return Ok(false);
            }
            if let Some(action) = map_key(key) {
                return handle_action(app, action).await;
            }
        }
        TuiEvent::Tick => {
            if let Err(err) = refresh_view(app).await {
                app.notify(
                    NotificationLevel::Error,
                    format!("Falha ao atualizar: {}", err),
                );
            }
        }
        TuiEvent::Resize { .. } => {}
    }
    Ok(false)
}

/// Keys with a meaning specific to the active view, checked before the
/// global keymap.
async fn handle_view_key(app: &mut App, key: KeyEvent) -> bool {
    if app.active_view != View::Historico {
        return false;
    }
    match key.code {
        KeyCode::Char('t') => {
            app.historico_view.toggle_recurso();
            if let Err(err) = refresh_view(app).await {
                app.notify(
                    NotificationLevel::Error,
                    format!("Falha ao carregar: {}", err),
                );
            }
            true
        }
        // Restrict the log to the selected entry's record.
        KeyCode::Char('f') => {
            let registro = app
                .historico_view
                .selected
                .and_then(|id| app.historico_view.entries.iter().find(|e| e.id == id))
                .map(|e| e.registro_id);
            app.historico_view.registro_filter = registro;
            true
        }
        KeyCode::Esc if app.historico_view.registro_filter.is_some() => {
            app.historico_view.registro_filter = None;
            true
        }
        _ => false,
    }
}

async fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(modal) = app.modal.clone() else {
        return;
    };
    match modal {
        Modal::Help => {
            app.modal = None;
        }
        Modal::Busca { mut buffer } => match key.code {
            KeyCode::Enter => {
                app.modal = None;
                if app.apply_busca(buffer.trim().to_string()) {
                    refresh_or_notify(app).await;
                }
            }
            KeyCode::Esc => app.modal = None,
            KeyCode::Backspace => {
                buffer.pop();
                app.modal = Some(Modal::Busca { buffer });
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                app.modal = Some(Modal::Busca { buffer });
            }
            _ => {
                app.modal = Some(Modal::Busca { buffer });
            }
        },
        Modal::ConfirmDelete { kind, id, nome } => match key.code {
            KeyCode::Enter => {
                app.modal = None;
                match delete_reference(app, kind, id).await {
                    Ok(()) => {
                        app.notify(NotificationLevel::Success, format!("\"{}\" excluído", nome));
                        let _ = refresh_view(app).await;
                    }
                    Err(err) => {
                        app.notify(
                            NotificationLevel::Error,
                            format!("Falha ao excluir: {}", err),
                        );
                    }
                }
            }
            KeyCode::Esc => app.modal = None,
            _ => {}
        },
        Modal::EditNome { kind, id, mut buffer } => match key.code {
            KeyCode::Enter => {
                let nome = buffer.trim().to_string();
                app.modal = None;
                if nome.is_empty() {
                    app.notify(NotificationLevel::Warning, "Nome não pode ser vazio");
                    return;
                }
                match submit_reference(app, kind, id, &nome).await {
                    Ok(true) => {
                        app.notify(NotificationLevel::Success, format!("\"{}\" salvo", nome));
                        let _ = refresh_view(app).await;
                    }
                    // No request was made; the owner warning is already up.
                    Ok(false) => {}
                    Err(err) => {
                        app.notify(NotificationLevel::Error, format!("Falha ao salvar: {}", err));
                    }
                }
            }
            KeyCode::Esc => app.modal = None,
            KeyCode::Backspace => {
                buffer.pop();
                app.modal = Some(Modal::EditNome { kind, id, buffer });
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                app.modal = Some(Modal::EditNome { kind, id, buffer });
            }
            _ => {
                app.modal = Some(Modal::EditNome { kind, id, buffer });
            }
        },
    }
}

async fn handle_action(app: &mut App, action: Action) -> Result<bool, TuiError> {
    match action {
        Action::Quit => return Ok(true),
        Action::NextView => {
            app.active_view = app.active_view.next();
            refresh_or_notify(app).await;
        }
        Action::PrevView => {
            app.active_view = app.active_view.previous();
            refresh_or_notify(app).await;
        }
        Action::SwitchView(index) => {
            if let Some(view) = View::from_index(index) {
                app.active_view = view;
                refresh_or_notify(app).await;
            }
        }
        Action::MoveDown => app.select_next(),
        Action::MoveUp => app.select_previous(),
        Action::NextPage => {
            if app.next_page() {
                refresh_or_notify(app).await;
            }
        }
        Action::PrevPage => {
            if app.prev_page() {
                refresh_or_notify(app).await;
            }
        }
        Action::CycleLimit => {
            if app.cycle_page_size() {
                refresh_or_notify(app).await;
            }
        }
        Action::Select => {
            if app.active_view == View::Proprietarios {
                let selected = app.proprietario_view.selected_item().cloned();
                if let Some(proprietario) = selected {
                    app.set_proprietario(&proprietario);
                    app.notify(
                        NotificationLevel::Success,
                        format!("Proprietário ativo: {}", proprietario.nome),
                    );
                    reload_lookups(app).await;
                }
            }
        }
        Action::NewItem => {
            if let Some(kind) = app.active_view.reference_kind() {
                app.modal = Some(Modal::EditNome {
                    kind,
                    id: None,
                    buffer: String::new(),
                });
            }
        }
        Action::EditItem => {
            if let Some(kind) = app.active_view.reference_kind() {
                if let Some((id, nome)) = app.reference_selected(kind) {
                    app.modal = Some(Modal::EditNome {
                        kind,
                        id: Some(id),
                        buffer: nome,
                    });
                }
            }
        }
        Action::DeleteItem => {
            if let Some(kind) = app.active_view.reference_kind() {
                if let Some((id, nome)) = app.reference_selected(kind) {
                    app.modal = Some(Modal::ConfirmDelete { kind, id, nome });
                }
            }
        }
        Action::OpenSearch => {
            if let Some(busca) = app.active_busca_mut() {
                let buffer = busca.clone();
                app.modal = Some(Modal::Busca { buffer });
            }
        }
        Action::OpenHelp => app.modal = Some(Modal::Help),
        Action::Refresh => {
            refresh_or_notify(app).await;
        }
        Action::Confirm | Action::Cancel => {}
    }
    Ok(false)
}

async fn refresh_or_notify(app: &mut App) {
    if let Err(err) = refresh_view(app).await {
        app.notify(
            NotificationLevel::Error,
            format!("Falha ao carregar: {}", err),
        );
    }
}

fn owner_or_warn(app: &mut App) -> Option<RecordId> {
    match app.proprietario.proprietario_id {
        Some(id) => Some(id),
        None => {
            app.notify(
                NotificationLevel::Warning,
                "Selecione um proprietário (visão Proprietários, tecla Espaço)",
            );
            None
        }
    }
}

async fn refresh_view(app: &mut App) -> Result<(), TuiError> {
    match app.active_view {
        View::Dashboard => {
            let Some(owner) = owner_or_warn(app) else {
                return Ok(());
            };
            app.dashboard.loading = true;
            let result = app.api.lookup_demandas(owner).await;
            app.dashboard.loading = false;
            app.dashboard.demandas = result?;
        }
        View::Demandas => {
            let Some(owner) = owner_or_warn(app) else {
                return Ok(());
            };
            app.demanda_view.loading = true;
            let params = list_params(&app.demanda_view.page, &app.demanda_view.busca);
            match app.api.list_demandas(owner, &params).await {
                Ok(page) => app.demanda_view.set_page(page.data, &page.meta),
                Err(err) => {
                    app.demanda_view.loading = false;
                    return Err(err.into());
                }
            }
        }
        View::Solucoes => {
            let Some(owner) = owner_or_warn(app) else {
                return Ok(());
            };
            app.solucao_view.loading = true;
            let params = list_params(&app.solucao_view.page, &app.solucao_view.busca);
            match app.api.list_solucoes(owner, &params).await {
                Ok(page) => app.solucao_view.set_page(page.data, &page.meta),
                Err(err) => {
                    app.solucao_view.loading = false;
                    return Err(err.into());
                }
            }
        }
        View::Historico => {
            let Some(owner) = owner_or_warn(app) else {
                return Ok(());
            };
            app.historico_view.loading = true;
            let recurso = app.historico_view.recurso;
            match app.api.list_historico(recurso, owner).await {
                Ok(entries) => app.historico_view.set_entries(entries),
                Err(err) => {
                    app.historico_view.loading = false;
                    return Err(err.into());
                }
            }
        }
        View::Proprietarios => {
            app.proprietario_view.loading = true;
            let params = list_params(&app.proprietario_view.page, &app.proprietario_view.busca);
            match app.api.list_proprietarios(&params).await {
                Ok(page) => app.proprietario_view.set_page(page.data, &page.meta),
                Err(err) => {
                    app.proprietario_view.loading = false;
                    return Err(err.into());
                }
            }
        }
        view => {
            let Some(kind) = view.reference_kind() else {
                return Ok(());
            };
            let Some(owner) = owner_or_warn(app) else {
                return Ok(());
            };
            refresh_reference(app, kind, owner).await?;
        }
    }
    Ok(())
}

macro_rules! refresh_collection {
    ($app:expr, $field:ident, $list:ident, $owner:expr) => {{
        $app.$field.loading = true;
        let params = list_params(&$app.$field.page, &$app.$field.busca);
        match $app.api.$list($owner, &params).await {
            Ok(page) => {
                $app.$field.set_page(page.data, &page.meta);
                Ok(())
            }
            Err(err) => {
                $app.$field.loading = false;
                Err(TuiError::from(err))
            }
        }
    }};
}

async fn refresh_reference(
    app: &mut App,
    kind: ReferenceKind,
    owner: RecordId,
) -> Result<(), TuiError> {
    match kind {
        ReferenceKind::Categorias => refresh_collection!(app, categoria_view, list_categorias, owner),
        ReferenceKind::Alinhamentos => {
            refresh_collection!(app, alinhamento_view, list_alinhamentos, owner)
        }
        ReferenceKind::Prioridades => {
            refresh_collection!(app, prioridade_view, list_prioridades, owner)
        }
        ReferenceKind::Status => refresh_collection!(app, status_view, list_status, owner),
        ReferenceKind::Times => refresh_collection!(app, time_view, list_times, owner),
        ReferenceKind::Desenvolvedores => {
            refresh_collection!(app, desenvolvedor_view, list_desenvolvedores, owner)
        }
        ReferenceKind::Responsaveis => {
            refresh_collection!(app, responsavel_view, list_responsaveis, owner)
        }
        // Handled by refresh_view directly; not owner-scoped.
        ReferenceKind::Proprietarios => Ok(()),
    }
}

fn list_params(page: &demtrack_core::PageState, busca: &str) -> ListParams {
    let params = ListParams::from_page(page);
    if busca.trim().is_empty() {
        params
    } else {
        params.with_busca(busca.trim())
    }
}

/// Load the reference collections used for id -> name resolution, and
/// resolve the active owner's display name.
async fn reload_lookups(app: &mut App) {
    match app.api.lookup_proprietarios().await {
        Ok(proprietarios) => {
            if let Some(owner) = app.proprietario.proprietario_id {
                app.proprietario.nome = proprietarios
                    .iter()
                    .find(|p| p.id == owner)
                    .map(|p| p.nome.clone());
            }
            app.lookups.proprietarios = proprietarios;
        }
        Err(err) => {
            app.notify(
                NotificationLevel::Error,
                format!("Falha ao carregar proprietários: {}", err),
            );
        }
    }

    let Some(owner) = app.proprietario.proprietario_id else {
        return;
    };

    let results = tokio::join!(
        app.api.lookup_status(owner),
        app.api.lookup_prioridades(owner),
        app.api.lookup_categorias(owner),
        app.api.lookup_alinhamentos(owner),
        app.api.lookup_responsaveis(owner),
        app.api.lookup_desenvolvedores(owner),
        app.api.lookup_tipos(owner),
        app.api.lookup_linguagens(owner),
        app.api.lookup_demandas(owner),
    );

    let mut failures = 0usize;
    match results.0 {
        Ok(v) => app.lookups.status = v,
        Err(_) => failures += 1,
    }
    match results.1 {
        Ok(v) => app.lookups.prioridades = v,
        Err(_) => failures += 1,
    }
    match results.2 {
        Ok(v) => app.lookups.categorias = v,
        Err(_) => failures += 1,
    }
    match results.3 {
        Ok(v) => app.lookups.alinhamentos = v,
        Err(_) => failures += 1,
    }
    match results.4 {
        Ok(v) => app.lookups.responsaveis = v,
        Err(_) => failures += 1,
    }
    match results.5 {
        Ok(v) => app.lookups.desenvolvedores = v,
        Err(_) => failures += 1,
    }
    match results.6 {
        Ok(v) => app.lookups.tipos = v,
        Err(_) => failures += 1,
    }
    match results.7 {
        Ok(v) => app.lookups.linguagens = v,
        Err(_) => failures += 1,
    }
    match results.8 {
        Ok(v) => app.lookups.demandas = v,
        Err(_) => failures += 1,
    }

    if failures > 0 {
        app.notify(
            NotificationLevel::Warning,
            format!("{} tabelas de referência não carregaram", failures),
        );
    }
}

/// Create or rename a reference record. Returns `Ok(false)` when the
/// request was skipped because no proprietário is selected, so the
/// caller knows nothing was saved.
async fn submit_reference(
    app: &mut App,
    kind: ReferenceKind,
    id: Option<RecordId>,
    nome: &str,
) -> Result<bool, TuiError> {
    let req = NomeRequest {
        nome: nome.to_string(),
    };
    match kind {
        ReferenceKind::Proprietarios => {
            match id {
                Some(id) => {
                    app.api.update_proprietario(id, &req).await?;
                }
                None => {
                    app.api.create_proprietario(&req).await?;
                }
            }
            return Ok(true);
        }
        ReferenceKind::Status => {
            // Updates keep the existing color; creates get the default.
            let cor = id
                .and_then(|id| app.status_view.items.iter().find(|s| s.id == id))
                .map(|s| s.cor.clone())
                .unwrap_or_else(|| COR_PADRAO.to_string());
            let req = StatusRequest {
                nome: nome.to_string(),
                cor,
            };
            match id {
                Some(id) => {
                    app.api.update_status(id, &req).await?;
                }
                None => {
                    let Some(owner) = owner_or_warn(app) else {
                        return Ok(false);
                    };
                    app.api.create_status(owner, &req).await?;
                }
            }
            return Ok(true);
        }
        _ => {}
    }

    if let Some(id) = id {
        match kind {
            ReferenceKind::Categorias => app.api.update_categoria(id, &req).await.map(drop)?,
            ReferenceKind::Alinhamentos => app.api.update_alinhamento(id, &req).await.map(drop)?,
            ReferenceKind::Prioridades => app.api.update_prioridade(id, &req).await.map(drop)?,
            ReferenceKind::Times => app.api.update_time(id, &req).await.map(drop)?,
            ReferenceKind::Desenvolvedores => {
                app.api.update_desenvolvedor(id, &req).await.map(drop)?
            }
            ReferenceKind::Responsaveis => app.api.update_responsavel(id, &req).await.map(drop)?,
            ReferenceKind::Status | ReferenceKind::Proprietarios => {}
        }
        return Ok(true);
    }

    let Some(owner) = owner_or_warn(app) else {
        return Ok(false);
    };
    match kind {
        ReferenceKind::Categorias => app.api.create_categoria(owner, &req).await.map(drop)?,
        ReferenceKind::Alinhamentos => app.api.create_alinhamento(owner, &req).await.map(drop)?,
        ReferenceKind::Prioridades => app.api.create_prioridade(owner, &req).await.map(drop)?,
        ReferenceKind::Times => app.api.create_time(owner, &req).await.map(drop)?,
        ReferenceKind::Desenvolvedores => {
            app.api.create_desenvolvedor(owner, &req).await.map(drop)?
        }
        ReferenceKind::Responsaveis => app.api.create_responsavel(owner, &req).await.map(drop)?,
        ReferenceKind::Status | ReferenceKind::Proprietarios => {}
    }
    Ok(true)
}

async fn delete_reference(app: &mut App, kind: ReferenceKind, id: RecordId) -> Result<(), TuiError> {
    match kind {
        ReferenceKind::Categorias => app.api.delete_categoria(id).await?,
        ReferenceKind::Alinhamentos => app.api.delete_alinhamento(id).await?,
        ReferenceKind::Prioridades => app.api.delete_prioridade(id).await?,
        ReferenceKind::Status => app.api.delete_status(id).await?,
        ReferenceKind::Times => app.api.delete_time(id).await?,
        ReferenceKind::Desenvolvedores => app.api.delete_desenvolvedor(id).await?,
        ReferenceKind::Responsaveis => app.api.delete_responsavel(id).await?,
        ReferenceKind::Proprietarios => app.api.delete_proprietario(id).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_without_owner() -> App {
        let config: TuiConfig = toml::from_str(
            r#"
api_base_url = "http://localhost:3333"
request_timeout_ms = 5000
refresh_interval_ms = 30000
page_size = 25
persistence_path = "/tmp/demtrack-tui-test.json"

[theme]
name = "claro"
"#,
        )
        .unwrap();
        let api = RestClient::new("http://localhost:3333", Duration::from_secs(5)).unwrap();
        App::new(config, api)
    }

    #[tokio::test]
    async fn create_without_owner_reports_nothing_saved() {
        let mut app = app_without_owner();
        let saved = submit_reference(&mut app, ReferenceKind::Categorias, None, "Nova")
            .await
            .unwrap();
        assert!(!saved);
        assert!(matches!(
            app.notifications.last().map(|n| n.level),
            Some(NotificationLevel::Warning)
        ));
    }

    #[tokio::test]
    async fn status_create_without_owner_reports_nothing_saved() {
        let mut app = app_without_owner();
        let saved = submit_reference(&mut app, ReferenceKind::Status, None, "Novo")
            .await
            .unwrap();
        assert!(!saved);
    }
}
