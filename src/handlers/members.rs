use actix_web::{web, HttpResponse};

use crate::application::order_query_service::OrderQueryService;
use crate::errors::AppError;
use crate::projection::assembler::{assemble, MemberListResponse};

/// GET /api/v2/members
#[utoipa::path(
    get,
    path = "/api/v2/members",
    responses(
        (status = 200, description = "Member names", body = MemberListResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "members"
)]
pub async fn members_v2(service: web::Data<OrderQueryService>) -> Result<HttpResponse, AppError> {
    let service = service.into_inner();
    let members = web::block(move || service.members())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(MemberListResponse {
        data: assemble(&members),
    }))
}
