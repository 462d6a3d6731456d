//! Entity definitions for Demtrack resources.
//!
//! Every resource the API serves gets an explicit struct; payloads are
//! parsed into these at the client boundary instead of flowing through
//! as untyped JSON.

use crate::{RecordId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked demand/work item belonging to an owner organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demanda {
    pub id: RecordId,
    pub nome: String,
    pub descricao: Option<String>,
    /// Person or unit that raised the demand.
    pub demandante: Option<String>,
    pub status_id: Option<RecordId>,
    pub prioridade_id: Option<RecordId>,
    pub categoria_id: Option<RecordId>,
    pub alinhamento_id: Option<RecordId>,
    pub responsavel_id: Option<RecordId>,
    pub proprietario_id: RecordId,
    /// Date the current status took effect.
    pub data_status: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A solution/project record, optionally linked to a Demanda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solucao {
    pub id: RecordId,
    pub nome: String,
    pub descricao: Option<String>,
    pub tipo_id: Option<RecordId>,
    /// Comma-separated list of Linguagem ids (multi-value field).
    pub linguagem_id: Option<String>,
    pub desenvolvedor_id: Option<RecordId>,
    pub demanda_id: Option<RecordId>,
    /// Progress percentage, 0-100.
    pub andamento: Option<u8>,
    pub proprietario_id: RecordId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Status of a Demanda. Carries a hex badge color ("#RRGGBB").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDemanda {
    pub id: RecordId,
    pub nome: String,
    pub cor: String,
}

macro_rules! reference_entity {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub id: RecordId,
            pub nome: String,
        }

        impl $name {
            pub fn new(id: RecordId, nome: impl Into<String>) -> Self {
                Self { id, nome: nome.into() }
            }
        }
    };
}

reference_entity!(
    /// Category a Demanda is filed under.
    Categoria
);
reference_entity!(
    /// Strategic alignment of a Demanda.
    Alinhamento
);
reference_entity!(
    /// Priority level of a Demanda.
    Prioridade
);
reference_entity!(
    /// Team that works on a Solucao.
    Time
);
reference_entity!(
    /// Developer assigned to a Solucao.
    Desenvolvedor
);
reference_entity!(
    /// Person responsible for a Demanda.
    Responsavel
);
reference_entity!(
    /// Owner organization that scopes most collections.
    Proprietario
);
reference_entity!(
    /// Kind of Solucao (system, integration, report...).
    Tipo
);
reference_entity!(
    /// Language/technology a Solucao is built with.
    Linguagem
);

impl StatusDemanda {
    pub fn new(id: RecordId, nome: impl Into<String>, cor: impl Into<String>) -> Self {
        Self {
            id,
            nome: nome.into(),
            cor: cor.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demanda_roundtrips_through_json() {
        let raw = r#"{
            "id": 7,
            "nome": "Portal de atendimento",
            "descricao": null,
            "demandante": "Ouvidoria",
            "status_id": 2,
            "prioridade_id": 1,
            "categoria_id": null,
            "alinhamento_id": null,
            "responsavel_id": 3,
            "proprietario_id": 1,
            "data_status": "2024-03-15",
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": "2024-03-15T09:30:00Z"
        }"#;
        let demanda: Demanda = serde_json::from_str(raw).unwrap();
        assert_eq!(demanda.id, 7);
        assert_eq!(demanda.status_id, Some(2));
        assert_eq!(
            demanda.data_status,
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        let back = serde_json::to_value(&demanda).unwrap();
        assert_eq!(back["nome"], "Portal de atendimento");
        assert_eq!(back["categoria_id"], serde_json::Value::Null);
    }

    #[test]
    fn solucao_multi_value_linguagem_is_plain_string() {
        let raw = r#"{
            "id": 1,
            "nome": "Emissor de guias",
            "descricao": "Backend de emissão",
            "tipo_id": 2,
            "linguagem_id": "1,3",
            "desenvolvedor_id": 4,
            "demanda_id": 7,
            "andamento": 60,
            "proprietario_id": 1,
            "created_at": "2024-02-10T08:00:00Z",
            "updated_at": "2024-02-20T08:00:00Z"
        }"#;
        let solucao: Solucao = serde_json::from_str(raw).unwrap();
        assert_eq!(solucao.linguagem_id.as_deref(), Some("1,3"));
        assert_eq!(solucao.andamento, Some(60));
    }

    #[test]
    fn status_carries_badge_color() {
        let status = StatusDemanda::new(1, "Em andamento", "#FFB300");
        assert_eq!(status.cor, "#FFB300");
    }
}
