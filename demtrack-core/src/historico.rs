//! Change-log (histórico) entries and the diff description formatter.
//!
//! The backend appends one histórico entry per mutating operation. Older
//! entries carry only a free-text `descricao` with transitions in the
//! shape `campo_id: <old> -> <new>`; newer entries also carry a
//! structured `changes` list. Rendering prefers the structured list and
//! falls back to regex-parsing the text, substituting foreign-key ids
//! with display names from the reference lookups.
//!
//! Every function here is a pure transform: no I/O, deterministic, and
//! never failing. Resolution misses degrade to fallback strings so a log
//! line always renders.

use crate::entities::{
    Alinhamento, Categoria, Demanda, Desenvolvedor, Linguagem, Prioridade, Proprietario,
    Responsavel, StatusDemanda, Tipo,
};
use crate::{RecordId, Timestamp};
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Shown when an id has no matching entity in the lookup.
pub const DESCONHECIDO: &str = "Desconhecido";
/// Shown for `null` (field not provided).
pub const NULO: &str = "Nulo (não informado)";

/// One append-only change-log entry, read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricoEntry {
    pub id: RecordId,
    /// Id of the record this entry belongs to (client-side filter key).
    pub registro_id: RecordId,
    /// Who performed the mutation.
    pub usuario: String,
    /// Raw transition text, e.g. "status_id: 1 -> 2".
    pub descricao: String,
    /// Snapshot of the record at the time of the change.
    pub registro: serde_json::Value,
    /// Structured diff, present on entries written by newer backends.
    #[serde(default)]
    pub changes: Option<Vec<FieldChange>>,
    pub created_at: Timestamp,
}

impl HistoricoEntry {
    /// Human-readable rendering of this entry's changes.
    ///
    /// Prefers the structured `changes` list; entries that predate it go
    /// through the text formatter.
    pub fn render(&self, ctx: &LookupContext<'_>) -> String {
        match &self.changes {
            Some(changes) if !changes.is_empty() => format_field_changes(changes, ctx),
            _ => format_descricao(&self.descricao, ctx),
        }
    }
}

/// Fields the formatter knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampoAlterado {
    Tipo,
    Linguagem,
    Desenvolvedor,
    Categoria,
    Responsavel,
    Status,
    Demanda,
    Alinhamento,
    Prioridade,
    Proprietario,
    DataStatus,
}

impl CampoAlterado {
    /// Friendly label used in rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            CampoAlterado::Tipo => "Tipo",
            CampoAlterado::Linguagem => "Linguagem",
            CampoAlterado::Desenvolvedor => "Desenvolvedor",
            CampoAlterado::Categoria => "Categoria",
            CampoAlterado::Responsavel => "Responsável",
            CampoAlterado::Status => "Status",
            CampoAlterado::Demanda => "Demanda",
            CampoAlterado::Alinhamento => "Alinhamento",
            CampoAlterado::Prioridade => "Prioridade",
            CampoAlterado::Proprietario => "Proprietário",
            CampoAlterado::DataStatus => "Data do status",
        }
    }

    /// Map a normalized `<campo>_id` token to its field.
    ///
    /// `data_status` is deliberately absent: dates are handled by a
    /// separate pass with date formatting, not id resolution.
    fn from_id_token(token: &str) -> Option<Self> {
        match token {
            "tipo_id" => Some(CampoAlterado::Tipo),
            "linguagem_id" => Some(CampoAlterado::Linguagem),
            "desenvolvedor_id" => Some(CampoAlterado::Desenvolvedor),
            "categoria_id" => Some(CampoAlterado::Categoria),
            "responsavel_id" => Some(CampoAlterado::Responsavel),
            "status_id" => Some(CampoAlterado::Status),
            "demanda_id" => Some(CampoAlterado::Demanda),
            "alinhamento_id" => Some(CampoAlterado::Alinhamento),
            "prioridade_id" => Some(CampoAlterado::Prioridade),
            "proprietario_id" => Some(CampoAlterado::Proprietario),
            _ => None,
        }
    }
}

/// Structured replacement for the interpolated transition strings.
///
/// `None` means the field was null on that side. Values are kept as raw
/// strings so multi-value ids ("1,3") and dates fit the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: CampoAlterado,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Reference collections used for id -> display-name resolution.
///
/// Borrowed from the caller for the duration of one render pass; the
/// formatter never mutates them.
#[derive(Debug, Clone, Copy)]
pub struct LookupContext<'a> {
    pub tipos: &'a [Tipo],
    pub linguagens: &'a [Linguagem],
    pub desenvolvedores: &'a [Desenvolvedor],
    pub categorias: &'a [Categoria],
    pub responsaveis: &'a [Responsavel],
    pub status: &'a [StatusDemanda],
    pub demandas: &'a [Demanda],
    pub alinhamentos: &'a [Alinhamento],
    pub prioridades: &'a [Prioridade],
    pub proprietarios: &'a [Proprietario],
}

impl LookupContext<'_> {
    pub fn empty() -> LookupContext<'static> {
        LookupContext {
            tipos: &[],
            linguagens: &[],
            desenvolvedores: &[],
            categorias: &[],
            responsaveis: &[],
            status: &[],
            demandas: &[],
            alinhamentos: &[],
            prioridades: &[],
            proprietarios: &[],
        }
    }

    /// Resolve one raw transition value for a field.
    fn resolve(&self, field: CampoAlterado, raw: &str) -> String {
        if raw == "null" || raw.is_empty() {
            return NULO.to_string();
        }
        match field {
            CampoAlterado::DataStatus => format_data(raw),
            CampoAlterado::Linguagem => raw
                .split(',')
                .map(|part| self.resolve_one(field, part.trim()))
                .collect::<Vec<_>>()
                .join(", "),
            _ => self.resolve_one(field, raw),
        }
    }

    fn resolve_one(&self, field: CampoAlterado, raw: &str) -> String {
        let Ok(id) = raw.parse::<RecordId>() else {
            return DESCONHECIDO.to_string();
        };
        let nome = match field {
            CampoAlterado::Tipo => self.tipos.iter().find(|e| e.id == id).map(|e| &e.nome),
            CampoAlterado::Linguagem => {
                self.linguagens.iter().find(|e| e.id == id).map(|e| &e.nome)
            }
            CampoAlterado::Desenvolvedor => self
                .desenvolvedores
                .iter()
                .find(|e| e.id == id)
                .map(|e| &e.nome),
            CampoAlterado::Categoria => {
                self.categorias.iter().find(|e| e.id == id).map(|e| &e.nome)
            }
            CampoAlterado::Responsavel => self
                .responsaveis
                .iter()
                .find(|e| e.id == id)
                .map(|e| &e.nome),
            CampoAlterado::Status => self.status.iter().find(|e| e.id == id).map(|e| &e.nome),
            CampoAlterado::Demanda => self.demandas.iter().find(|e| e.id == id).map(|e| &e.nome),
            CampoAlterado::Alinhamento => self
                .alinhamentos
                .iter()
                .find(|e| e.id == id)
                .map(|e| &e.nome),
            CampoAlterado::Prioridade => self
                .prioridades
                .iter()
                .find(|e| e.id == id)
                .map(|e| &e.nome),
            CampoAlterado::Proprietario => self
                .proprietarios
                .iter()
                .find(|e| e.id == id)
                .map(|e| &e.nome),
            CampoAlterado::DataStatus => None,
        };
        nome.cloned().unwrap_or_else(|| DESCONHECIDO.to_string())
    }
}

// The four textual variants, in fixed order: id-suffixed before bare so
// "status_id" is consumed before the bare pattern could split it, spaced
// before tight. Replaced spans contain "→" and a capitalized label, which
// no pattern matches, so later passes skip them. Overlapping matches
// across variants within one malformed input are processed independently
// (inherited behavior, not de-duplicated).
// Value class: "null" or digits with optional comma-joined extra ids;
// a comma must be followed by a digit so list-like prose after the value
// is not swallowed.
static RE_ID_SPACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z][a-z_]*_id):\s+(null|\d+(?:,\d+)*)\s+->\s+(null|\d+(?:,\d+)*)")
        .expect("valid regex")
});
static RE_ID_TIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z][a-z_]*_id):(null|\d+(?:,\d+)*)->(null|\d+(?:,\d+)*)").expect("valid regex")
});
static RE_BARE_SPACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z][a-z_]*):\s+(null|\d+(?:,\d+)*)\s+->\s+(null|\d+(?:,\d+)*)")
        .expect("valid regex")
});
static RE_BARE_TIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z][a-z_]*):(null|\d+(?:,\d+)*)->(null|\d+(?:,\d+)*)").expect("valid regex")
});
static RE_DATA_STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"data_status:\s*(\S+)\s*->\s*(\S+)").expect("valid regex"));

/// Rewrite every recognized `campo_id: <old> -> <new>` transition in
/// `descricao` into `"<Label>: <old name> → <new name>"`.
///
/// Unrecognized fields and free text pass through verbatim. A second
/// pass reformats `data_status` transitions with locale dates. Pure and
/// infallible by design.
pub fn format_descricao(descricao: &str, ctx: &LookupContext<'_>) -> String {
    let mut result = descricao.to_string();
    for pattern in [&*RE_ID_SPACED, &*RE_ID_TIGHT, &*RE_BARE_SPACED, &*RE_BARE_TIGHT] {
        result = pattern
            .replace_all(&result, |caps: &Captures<'_>| {
                let token = normalize_token(&caps[1]);
                match CampoAlterado::from_id_token(&token) {
                    Some(field) => format!(
                        "{}: {} → {}",
                        field.label(),
                        ctx.resolve(field, &caps[2]),
                        ctx.resolve(field, &caps[3]),
                    ),
                    None => caps[0].to_string(),
                }
            })
            .into_owned();
    }
    result = RE_DATA_STATUS
        .replace_all(&result, |caps: &Captures<'_>| {
            format!(
                "{}: {} → {}",
                CampoAlterado::DataStatus.label(),
                format_data(&caps[1]),
                format_data(&caps[2]),
            )
        })
        .into_owned();
    result
}

/// Render one structured change. Same output shape as the text path.
pub fn format_field_change(change: &FieldChange, ctx: &LookupContext<'_>) -> String {
    let resolve = |side: &Option<String>| match side {
        Some(value) => ctx.resolve(change.field, value),
        None => NULO.to_string(),
    };
    format!(
        "{}: {} → {}",
        change.field.label(),
        resolve(&change.old),
        resolve(&change.new)
    )
}

/// Render a structured change list, one clause per change.
pub fn format_field_changes(changes: &[FieldChange], ctx: &LookupContext<'_>) -> String {
    changes
        .iter()
        .map(|change| format_field_change(change, ctx))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Format a raw date token as dd/mm/YYYY. `null` resolves to the
/// not-provided sentinel; unparseable tokens pass through unchanged.
fn format_data(raw: &str) -> String {
    if raw == "null" || raw.is_empty() {
        return NULO.to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

fn normalize_token(token: &str) -> String {
    if token.ends_with("_id") {
        token.to_string()
    } else {
        format!("{}_id", token)
    }
}
