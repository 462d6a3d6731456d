//! API request and response types.
//!
//! Wire shapes for the external backend. Collections arrive wrapped in
//! `Paginated<T>` with the backend's paginator meta; mutations take
//! explicit request structs so nothing loosely-typed crosses this
//! boundary.

use chrono::NaiveDate;
use demtrack_core::{PageMeta, PageState, RecordId};
use serde::{Deserialize, Serialize};

/// One page of a collection plus its paginator meta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn page_state(&self) -> PageState {
        PageState::from_meta(&self.meta)
    }
}

/// Query parameters for collection listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busca: Option<String>,
}

impl ListParams {
    /// Build the query for the page the UI currently wants.
    ///
    /// Callers that change the page size must do so through
    /// `PageState::set_page_size` before calling this, so the reset-to-
    /// page-1 contract is already applied here.
    pub fn from_page(page: &PageState) -> Self {
        Self {
            page: page.current_page,
            limit: page.page_size,
            busca: None,
        }
    }

    pub fn with_busca(mut self, busca: impl Into<String>) -> Self {
        self.busca = Some(busca.into());
        self
    }
}

/// Request to create a new demanda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDemandaRequest {
    pub nome: String,
    pub descricao: Option<String>,
    pub demandante: Option<String>,
    pub status_id: Option<RecordId>,
    pub prioridade_id: Option<RecordId>,
    pub categoria_id: Option<RecordId>,
    pub alinhamento_id: Option<RecordId>,
    pub responsavel_id: Option<RecordId>,
    pub data_status: Option<NaiveDate>,
}

/// Request to update an existing demanda. Only provided fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDemandaRequest {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub demandante: Option<String>,
    pub status_id: Option<RecordId>,
    pub prioridade_id: Option<RecordId>,
    pub categoria_id: Option<RecordId>,
    pub alinhamento_id: Option<RecordId>,
    pub responsavel_id: Option<RecordId>,
    pub data_status: Option<NaiveDate>,
}

/// Request to create a new solução.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSolucaoRequest {
    pub nome: String,
    pub descricao: Option<String>,
    pub tipo_id: Option<RecordId>,
    /// Comma-separated Linguagem ids.
    pub linguagem_id: Option<String>,
    pub desenvolvedor_id: Option<RecordId>,
    pub demanda_id: Option<RecordId>,
    pub andamento: Option<u8>,
}

/// Request to update an existing solução.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSolucaoRequest {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub tipo_id: Option<RecordId>,
    pub linguagem_id: Option<String>,
    pub desenvolvedor_id: Option<RecordId>,
    pub demanda_id: Option<RecordId>,
    pub andamento: Option<u8>,
}

/// Create/update payload for name-only reference resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomeRequest {
    pub nome: String,
}

/// Create/update payload for status, which also carries a badge color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    pub nome: String,
    pub cor: String,
}

/// Error body the backend returns on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

/// Which resource a histórico listing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursoHistorico {
    Demandas,
    Solucoes,
}

impl RecursoHistorico {
    pub fn path(&self) -> &'static str {
        match self {
            RecursoHistorico::Demandas => "/historico/demandas",
            RecursoHistorico::Solucoes => "/historico/solucoes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demtrack_core::Demanda;

    #[test]
    fn paginated_collection_deserializes() {
        let raw = r#"{
            "data": [{
                "id": 1,
                "nome": "Portal",
                "descricao": null,
                "demandante": null,
                "status_id": 1,
                "prioridade_id": null,
                "categoria_id": null,
                "alinhamento_id": null,
                "responsavel_id": null,
                "proprietario_id": 1,
                "data_status": null,
                "created_at": "2024-03-01T12:00:00Z",
                "updated_at": "2024-03-01T12:00:00Z"
            }],
            "meta": {
                "total": 1,
                "perPage": 25,
                "currentPage": 1,
                "lastPage": 1,
                "firstPage": 1,
                "firstPageUrl": "/?page=1",
                "lastPageUrl": "/?page=1",
                "nextPageUrl": null,
                "previousPageUrl": null
            }
        }"#;
        let page: Paginated<Demanda> = serde_json::from_str(raw).unwrap();
        assert_eq!(page.data.len(), 1);
        let state = page.page_state();
        assert!(!state.has_next);
        assert_eq!(state.total_records, 1);
    }

    #[test]
    fn list_params_follow_page_state() {
        let mut page = demtrack_core::PageState::new(10);
        page.current_page = 3;
        let params = ListParams::from_page(&page);
        assert_eq!((params.page, params.limit), (3, 10));

        // Changing the limit resets the requested page to 1.
        page.set_page_size(50);
        let params = ListParams::from_page(&page);
        assert_eq!((params.page, params.limit), (1, 50));
    }

    #[test]
    fn busca_is_omitted_when_absent() {
        let params = ListParams {
            page: 1,
            limit: 25,
            busca: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("busca").is_none());
    }
}
