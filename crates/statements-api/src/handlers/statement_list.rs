use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::{ApiPath, ApiQuery};
use crate::services::{ListParams, SortDirection};
use crate::state::AppState;
use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use statements_core::models::{Page, StatementMetadata, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStatementsQuery {
    /// Page number (0-based)
    #[param(example = 0)]
    pub page: Option<usize>,
    /// Page size (1-100, default 10)
    #[param(example = 10)]
    pub size: Option<usize>,
    /// Sort field and direction
    #[param(example = "period,desc")]
    pub sort: Option<String>,
}

impl ListStatementsQuery {
    fn into_params(self) -> Result<ListParams, HttpAppError> {
        let direction = match self.sort.as_deref() {
            Some(sort) => SortDirection::parse_sort(sort)?,
            None => SortDirection::default(),
        };
        Ok(ListParams::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            direction,
        ))
    }
}

#[utoipa::path(
    get,
    path = "/api/statements/{customer_id}",
    tag = "statements",
    params(
        ("customer_id" = u64, Path, description = "Customer ID", example = 12345),
        ListStatementsQuery
    ),
    responses(
        (status = 200, description = "Statements retrieved", body = Page<StatementMetadata>),
        (status = 400, description = "Malformed customer ID, or invalid paging or sort parameters", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_statements"))]
pub async fn list_statements(
    State(state): State<Arc<AppState>>,
    ApiPath(customer_id): ApiPath<u64>,
    ApiQuery(query): ApiQuery<ListStatementsQuery>,
) -> Result<Json<Page<StatementMetadata>>, HttpAppError> {
    let params = query.into_params()?;
    Ok(Json(state.statements.list_statements(customer_id, params)))
}
