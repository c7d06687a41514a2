//! Handlers for the static catalogs: certificate fields and operators.
//!
//! These are the only `/api/v1` routes that need no caller identity.

use axum::extract::Query;
use axum::Json;
use coi_core::fields::{fields_in_category, FieldCategory, FieldDescriptor, FIELD_REGISTRY};
use coi_core::requirements::operators::{ComparisonOperator, LogicalOperator};
use serde::{Deserialize, Serialize};

use crate::response::DataResponse;

/// Query parameters for `GET /fields`.
#[derive(Debug, Deserialize)]
pub struct FieldListParams {
    pub category: Option<FieldCategory>,
}

/// One registry entry plus its category's display label.
#[derive(Debug, Serialize)]
pub struct FieldEntry {
    #[serde(flatten)]
    pub descriptor: &'static FieldDescriptor,
    pub category_label: &'static str,
}

/// A comparison operator as shown in the rule editor.
#[derive(Debug, Serialize)]
pub struct ComparisonEntry {
    pub value: ComparisonOperator,
    pub label: &'static str,
    pub symbol: &'static str,
    pub numeric: bool,
}

/// A logical joiner as shown in the rule editor.
#[derive(Debug, Serialize)]
pub struct LogicalEntry {
    pub value: LogicalOperator,
    pub label: &'static str,
}

/// Both operator catalogs.
#[derive(Debug, Serialize)]
pub struct OperatorCatalog {
    pub comparison: Vec<ComparisonEntry>,
    pub logical: Vec<LogicalEntry>,
}

/// GET /api/v1/fields
///
/// The field registry in display order, optionally narrowed to one category.
pub async fn list_fields(
    Query(params): Query<FieldListParams>,
) -> Json<DataResponse<Vec<FieldEntry>>> {
    let entry = |descriptor: &'static FieldDescriptor| FieldEntry {
        descriptor,
        category_label: descriptor.category.label(),
    };
    let data = match params.category {
        Some(category) => fields_in_category(category).map(entry).collect(),
        None => FIELD_REGISTRY.iter().map(entry).collect(),
    };
    Json(DataResponse { data })
}

/// GET /api/v1/operators
pub async fn list_operators() -> Json<DataResponse<OperatorCatalog>> {
    let comparison = ComparisonOperator::ALL
        .into_iter()
        .map(|op| ComparisonEntry {
            value: op,
            label: op.label(),
            symbol: op.symbol(),
            numeric: op.is_relational(),
        })
        .collect();
    let logical = LogicalOperator::ALL
        .into_iter()
        .map(|op| LogicalEntry {
            value: op,
            label: op.label(),
        })
        .collect();
    Json(DataResponse {
        data: OperatorCatalog {
            comparison,
            logical,
        },
    })
}
