//! HTTP surface: every route lives under `/api`.

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::state::AppState;
use crate::{accounts, offers, orders, profiles, reviews, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "gigmarket",
        description = "Freelance gig-marketplace backend",
    ),
    components(schemas(
        accounts::dto::RegistrationRequest,
        accounts::dto::LoginRequest,
        accounts::dto::AuthResponse,
        profiles::dto::ProfileDto,
        profiles::dto::ProfileListItemDto,
        profiles::dto::ProfileUpdateRequest,
        offers::dto::OfferCreateRequest,
        offers::dto::OfferUpdateRequest,
        offers::dto::OfferDetailWrite,
        offers::dto::OfferDetailDto,
        offers::dto::OfferListItemDto,
        offers::dto::OfferRetrieveDto,
        offers::dto::OfferWithDetailsDto,
        orders::dto::OrderCreateRequest,
        orders::dto::OrderUpdateRequest,
        orders::dto::OrderDto,
        orders::dto::OrderCountDto,
        orders::dto::CompletedOrderCountDto,
        reviews::dto::ReviewCreateRequest,
        reviews::dto::ReviewUpdateRequest,
        reviews::dto::ReviewDto,
        reviews::dto::ReviewStatsDto,
        stats::dto::BaseInfoDto,
        crate::problem::Problem,
        crate::problem::ValidationViolation,
    ))
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(accounts::handlers::register))
        .route("/api/login", post(accounts::handlers::login))
        .route(
            "/api/profile/{user_id}",
            get(profiles::handlers::get_profile)
                .patch(profiles::handlers::update_profile)
                .put(profiles::handlers::update_profile),
        )
        .route(
            "/api/profiles/business",
            get(profiles::handlers::list_business_profiles),
        )
        .route(
            "/api/profiles/customer",
            get(profiles::handlers::list_customer_profiles),
        )
        .route(
            "/api/offers",
            get(offers::handlers::list_offers).post(offers::handlers::create_offer),
        )
        .route(
            "/api/offers/{offer_id}",
            get(offers::handlers::get_offer)
                .patch(offers::handlers::update_offer)
                .put(offers::handlers::update_offer)
                .delete(offers::handlers::delete_offer),
        )
        .route(
            "/api/offerdetails/{detail_id}",
            get(offers::handlers::get_offer_detail),
        )
        .route(
            "/api/orders",
            get(orders::handlers::list_orders).post(orders::handlers::create_order),
        )
        .route(
            "/api/orders/{order_id}",
            get(orders::handlers::get_order)
                .patch(orders::handlers::update_order)
                .put(orders::handlers::update_order)
                .delete(orders::handlers::delete_order),
        )
        .route(
            "/api/order-count/{business_user_id}",
            get(orders::handlers::order_count),
        )
        .route(
            "/api/completed-order-count/{business_user_id}",
            get(orders::handlers::completed_order_count),
        )
        .route(
            "/api/reviews",
            get(reviews::handlers::list_reviews).post(reviews::handlers::create_review),
        )
        .route(
            "/api/reviews/{review_id}",
            get(reviews::handlers::get_review)
                .patch(reviews::handlers::update_review)
                .delete(reviews::handlers::delete_review),
        )
        .route(
            "/api/business-users/{business_user_id}/review-stats",
            get(reviews::handlers::review_stats),
        )
        .route("/api/base-info", get(stats::handlers::base_info))
        .route("/api/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
