//! REST client for the Demtrack backend.
//!
//! Thin typed wrapper over the external API. Every owner-scoped call
//! takes the `proprietario_id` as an explicit parameter; nothing is read
//! from ambient state.

pub mod types;

pub use types::{
    ApiErrorBody, CreateDemandaRequest, CreateSolucaoRequest, ListParams, NomeRequest, Paginated,
    RecursoHistorico, StatusRequest, UpdateDemandaRequest, UpdateSolucaoRequest,
};

use demtrack_core::{
    Alinhamento, Categoria, Demanda, Desenvolvedor, HistoricoEntry, Linguagem, Prioridade,
    Proprietario, RecordId, Responsavel, Solucao, StatusDemanda, Time, Tipo,
};
use std::time::Duration;

/// Page size used when fetching a collection as a lookup table.
const LOOKUP_LIMIT: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Clone, Debug)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

macro_rules! reference_endpoints {
    ($entity:ty, $path:literal, $list:ident, $create:ident, $update:ident, $delete:ident) => {
        pub async fn $list(
            &self,
            proprietario_id: RecordId,
            params: &ListParams,
        ) -> Result<Paginated<$entity>, ApiClientError> {
            self.get_json($path, Some(proprietario_id), Some(params)).await
        }

        pub async fn $create(
            &self,
            proprietario_id: RecordId,
            req: &NomeRequest,
        ) -> Result<$entity, ApiClientError> {
            self.post_json($path, Some(proprietario_id), req).await
        }

        pub async fn $update(
            &self,
            id: RecordId,
            req: &NomeRequest,
        ) -> Result<$entity, ApiClientError> {
            let path = format!("{}/{}", $path, id);
            self.put_json(&path, req).await
        }

        pub async fn $delete(&self, id: RecordId) -> Result<(), ApiClientError> {
            let path = format!("{}/{}", $path, id);
            self.delete(&path).await
        }
    };
}

impl RestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        if base_url.trim().is_empty() {
            return Err(ApiClientError::Config("base_url must not be empty".into()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // ------------------------------------------------------------------------
    // Demandas
    // ------------------------------------------------------------------------

    pub async fn list_demandas(
        &self,
        proprietario_id: RecordId,
        params: &ListParams,
    ) -> Result<Paginated<Demanda>, ApiClientError> {
        self.get_json("/demandas", Some(proprietario_id), Some(params))
            .await
    }

    pub async fn get_demanda(&self, id: RecordId) -> Result<Demanda, ApiClientError> {
        let path = format!("/demandas/{}", id);
        self.get_json::<Demanda, ()>(&path, None, None).await
    }

    pub async fn create_demanda(
        &self,
        proprietario_id: RecordId,
        req: &CreateDemandaRequest,
    ) -> Result<Demanda, ApiClientError> {
        self.post_json("/demandas", Some(proprietario_id), req).await
    }

    pub async fn update_demanda(
        &self,
        id: RecordId,
        req: &UpdateDemandaRequest,
    ) -> Result<Demanda, ApiClientError> {
        let path = format!("/demandas/{}", id);
        self.put_json(&path, req).await
    }

    pub async fn delete_demanda(&self, id: RecordId) -> Result<(), ApiClientError> {
        let path = format!("/demandas/{}", id);
        self.delete(&path).await
    }

    // ------------------------------------------------------------------------
    // Soluções
    // ------------------------------------------------------------------------

    pub async fn list_solucoes(
        &self,
        proprietario_id: RecordId,
        params: &ListParams,
    ) -> Result<Paginated<Solucao>, ApiClientError> {
        self.get_json("/solucoes", Some(proprietario_id), Some(params))
            .await
    }

    pub async fn get_solucao(&self, id: RecordId) -> Result<Solucao, ApiClientError> {
        let path = format!("/solucoes/{}", id);
        self.get_json::<Solucao, ()>(&path, None, None).await
    }

    pub async fn create_solucao(
        &self,
        proprietario_id: RecordId,
        req: &CreateSolucaoRequest,
    ) -> Result<Solucao, ApiClientError> {
        self.post_json("/solucoes", Some(proprietario_id), req).await
    }

    pub async fn update_solucao(
        &self,
        id: RecordId,
        req: &UpdateSolucaoRequest,
    ) -> Result<Solucao, ApiClientError> {
        let path = format!("/solucoes/{}", id);
        self.put_json(&path, req).await
    }

    pub async fn delete_solucao(&self, id: RecordId) -> Result<(), ApiClientError> {
        let path = format!("/solucoes/{}", id);
        self.delete(&path).await
    }

    // ------------------------------------------------------------------------
    // Reference data
    // ------------------------------------------------------------------------

    reference_endpoints!(Categoria, "/categorias", list_categorias, create_categoria, update_categoria, delete_categoria);
    reference_endpoints!(Alinhamento, "/alinhamentos", list_alinhamentos, create_alinhamento, update_alinhamento, delete_alinhamento);
    reference_endpoints!(Prioridade, "/prioridades", list_prioridades, create_prioridade, update_prioridade, delete_prioridade);
    reference_endpoints!(Time, "/times", list_times, create_time, update_time, delete_time);
    reference_endpoints!(Desenvolvedor, "/desenvolvedores", list_desenvolvedores, create_desenvolvedor, update_desenvolvedor, delete_desenvolvedor);
    reference_endpoints!(Responsavel, "/responsaveis", list_responsaveis, create_responsavel, update_responsavel, delete_responsavel);

    // Status carries a badge color, so it gets explicit methods.

    pub async fn list_status(
        &self,
        proprietario_id: RecordId,
        params: &ListParams,
    ) -> Result<Paginated<StatusDemanda>, ApiClientError> {
        self.get_json("/status", Some(proprietario_id), Some(params))
            .await
    }

    pub async fn create_status(
        &self,
        proprietario_id: RecordId,
        req: &StatusRequest,
    ) -> Result<StatusDemanda, ApiClientError> {
        self.post_json("/status", Some(proprietario_id), req).await
    }

    pub async fn update_status(
        &self,
        id: RecordId,
        req: &StatusRequest,
    ) -> Result<StatusDemanda, ApiClientError> {
        let path = format!("/status/{}", id);
        self.put_json(&path, req).await
    }

    pub async fn delete_status(&self, id: RecordId) -> Result<(), ApiClientError> {
        let path = format!("/status/{}", id);
        self.delete(&path).await
    }

    // Proprietários are the scoping entity themselves: never owner-scoped.

    pub async fn list_proprietarios(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Proprietario>, ApiClientError> {
        self.get_json("/proprietarios", None, Some(params)).await
    }

    pub async fn create_proprietario(
        &self,
        req: &NomeRequest,
    ) -> Result<Proprietario, ApiClientError> {
        self.post_json("/proprietarios", None, req).await
    }

    pub async fn update_proprietario(
        &self,
        id: RecordId,
        req: &NomeRequest,
    ) -> Result<Proprietario, ApiClientError> {
        let path = format!("/proprietarios/{}", id);
        self.put_json(&path, req).await
    }

    pub async fn delete_proprietario(&self, id: RecordId) -> Result<(), ApiClientError> {
        let path = format!("/proprietarios/{}", id);
        self.delete(&path).await
    }

    // ------------------------------------------------------------------------
    // Lookups and histórico
    // ------------------------------------------------------------------------

    /// Fetch a whole owner-scoped collection as a lookup table.
    pub async fn lookup_categorias(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Categoria>, ApiClientError> {
        self.lookup("/categorias", Some(proprietario_id)).await
    }

    pub async fn lookup_alinhamentos(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Alinhamento>, ApiClientError> {
        self.lookup("/alinhamentos", Some(proprietario_id)).await
    }

    pub async fn lookup_prioridades(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Prioridade>, ApiClientError> {
        self.lookup("/prioridades", Some(proprietario_id)).await
    }

    pub async fn lookup_status(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<StatusDemanda>, ApiClientError> {
        self.lookup("/status", Some(proprietario_id)).await
    }

    pub async fn lookup_desenvolvedores(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Desenvolvedor>, ApiClientError> {
        self.lookup("/desenvolvedores", Some(proprietario_id)).await
    }

    pub async fn lookup_responsaveis(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Responsavel>, ApiClientError> {
        self.lookup("/responsaveis", Some(proprietario_id)).await
    }

    pub async fn lookup_tipos(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Tipo>, ApiClientError> {
        self.lookup("/tipos", Some(proprietario_id)).await
    }

    pub async fn lookup_linguagens(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Linguagem>, ApiClientError> {
        self.lookup("/linguagens", Some(proprietario_id)).await
    }

    pub async fn lookup_demandas(
        &self,
        proprietario_id: RecordId,
    ) -> Result<Vec<Demanda>, ApiClientError> {
        self.lookup("/demandas", Some(proprietario_id)).await
    }

    pub async fn lookup_proprietarios(&self) -> Result<Vec<Proprietario>, ApiClientError> {
        self.lookup("/proprietarios", None).await
    }

    /// Full histórico for a resource. The caller filters entries by the
    /// owning record's id.
    pub async fn list_historico(
        &self,
        recurso: RecursoHistorico,
        proprietario_id: RecordId,
    ) -> Result<Vec<HistoricoEntry>, ApiClientError> {
        self.lookup(recurso.path(), Some(proprietario_id)).await
    }

    async fn lookup<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        proprietario_id: Option<RecordId>,
    ) -> Result<Vec<T>, ApiClientError> {
        let params = ListParams {
            page: 1,
            limit: LOOKUP_LIMIT,
            busca: None,
        };
        let page: Paginated<T> = self.get_json(path, proprietario_id, Some(&params)).await?;
        Ok(page.data)
    }

    // ------------------------------------------------------------------------
    // HTTP helpers
    // ------------------------------------------------------------------------

    async fn get_json<T, Q>(
        &self,
        path: &str,
        proprietario_id: Option<RecordId>,
        query: Option<&Q>,
    ) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(url);
        if let Some(owner) = proprietario_id {
            request = request.query(&[("proprietario_id", owner)]);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        self.parse_response(response).await
    }

    async fn post_json<T, B>(
        &self,
        path: &str,
        proprietario_id: Option<RecordId>,
        body: &B,
    ) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(url);
        if let Some(owner) = proprietario_id {
            request = request.query(&[("proprietario_id", owner)]);
        }
        let response = request.json(body).send().await?;
        self.parse_response(response).await
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.put(url).json(body).send().await?;
        self.parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.delete(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.error_from_body(status, response).await)
        }
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(self.error_from_body(status, response).await)
        }
    }

    async fn error_from_body(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiClientError {
        let text = response.text().await.unwrap_or_default();
        if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
            return ApiClientError::InvalidResponse(format!("{}: {}", body.code, body.message));
        }
        ApiClientError::InvalidResponse(format!("HTTP {}: {}", status.as_u16(), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = RestClient::new("http://localhost:3333/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://localhost:3333");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = RestClient::new("   ", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ApiClientError::Config(_)));
    }

    #[test]
    fn historico_paths_per_recurso() {
        assert_eq!(RecursoHistorico::Demandas.path(), "/historico/demandas");
        assert_eq!(RecursoHistorico::Solucoes.path(), "/historico/solucoes");
    }
}
