//! OpenAPI documentation configuration

use domain_tasks::TasksApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Task tracking REST API"
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    )
)]
struct ApiInfo;

/// Combined OpenAPI documentation for the Todo API
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        ApiInfo::openapi().merge_from(TasksApiDoc::openapi())
    }
}
