//! Demtrack Core - Entity Types and Pure Transforms
//!
//! Pure data structures and deterministic transforms with no I/O.
//! All other crates depend on this. The change-log formatter and the
//! pagination state machine live here so they can be tested without a
//! terminal or a network.

pub mod color;
pub mod entities;
pub mod error;
pub mod historico;
pub mod pagination;

pub use color::{contrast_foreground, parse_hex_color, relative_luminance, Foreground};
pub use entities::{
    Alinhamento, Categoria, Demanda, Desenvolvedor, Linguagem, Prioridade, Proprietario,
    Responsavel, Solucao, StatusDemanda, Time, Tipo,
};
pub use error::CoreError;
pub use historico::{
    format_descricao, format_field_change, format_field_changes, CampoAlterado, FieldChange,
    HistoricoEntry, LookupContext, DESCONHECIDO, NULO,
};
pub use pagination::{PageMeta, PageState};

use chrono::{DateTime, Utc};

/// Record identifier. The backend assigns sequential positive integers.
pub type RecordId = i64;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
