pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::Config;
use crate::extract::ValidJson;
use crate::models::requests::CareerQuery;
use crate::profile::handlers as profile;
use crate::recommendation::builder::EnrichmentTopic;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

/// Origin of the local Expo dev server, always allowed.
pub const DEV_ORIGIN: &str = "http://localhost:8081";

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        // Recommendation
        .route("/prompt", post(recommendation::handle_prompt))
        .route("/api", post(recommendation::handle_legacy_api))
        // Profile
        .route("/addProfile", post(profile::handle_add_profile))
        .route("/get_user_details", post(profile::handle_get_user_details))
        .route("/get_user_info/:user_id", get(profile::handle_get_user_info))
        .route(
            "/addtechnicalSkills",
            post(profile::handle_add_technical_skills),
        )
        .route("/addSoftskill", post(profile::handle_add_softskill))
        .route("/addcareer", post(profile::handle_add_career))
        .route(
            "/update_EducationLevel",
            post(profile::handle_update_education_level),
        )
        .route("/updateActivities", post(profile::handle_update_activities));

    // Enrichment: one route per topic, all sharing a handler
    for topic in EnrichmentTopic::ALL {
        router = router.route(
            topic.path(),
            post(
                move |state: State<AppState>, query: ValidJson<CareerQuery>| {
                    recommendation::handle_enrichment(topic, state, query)
                },
            ),
        );
    }

    router.with_state(state)
}

/// CORS policy: the dev origin plus `ALLOW_ORIGIN`, credentials, GET/POST, any header.
/// Credentials rule out `*`, so request headers are mirrored instead.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let mut origins = vec![HeaderValue::from_static(DEV_ORIGIN)];
    if let Some(origin) = &config.allow_origin {
        origins.push(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("ALLOW_ORIGIN '{origin}' is not a valid origin"))?,
        );
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request()))
}
