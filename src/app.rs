//! Application wiring shared by the binary and the integration tests.

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::adapters::email::{InMemoryMailer, ResendConfig, ResendMailer};
use crate::adapters::http::{booking_routes, BookingHandlers, BookingRedirects};
use crate::application::handlers::booking::SubmitBookingHandler;
use crate::config::{AppConfig, ServerConfig, WidgetConfig};
use crate::domain::assets::AssetPathResolver;
use crate::domain::booking::BookingNotifications;
use crate::domain::foundation::DomainError;
use crate::domain::matching::{MatchEngine, Roster};
use crate::domain::presentation::ResultsPresenter;
use crate::domain::questionnaire::canonical::canonical_catalog;
use crate::domain::widget::Widget;
use crate::ports::{MailError, Mailer};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. Production logs are JSON.
pub fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resend when an API key is configured, otherwise an in-memory mailbox.
pub fn build_mailer(config: &AppConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.email.api_key() {
        Some(key) => {
            let resend = ResendConfig::new(key)
                .with_base_url(&config.email.resend_base_url)
                .with_timeout(Duration::from_secs(config.email.timeout_secs));
            Ok(Arc::new(ResendMailer::new(resend)?))
        }
        None => {
            tracing::warn!("No Resend API key configured; booking emails are captured in memory");
            Ok(Arc::new(InMemoryMailer::new()))
        }
    }
}

/// Builds the HTTP router with tracing, CORS, timeout and request-id layers.
pub fn build_router(config: &AppConfig, mailer: Arc<dyn Mailer>) -> Router {
    let notifications = BookingNotifications::new(config.organisation());
    let submit_handler = Arc::new(SubmitBookingHandler::new(mailer, notifications));
    let redirects = BookingRedirects {
        error_page: config.booking.error_path.clone(),
        thank_you_page: config.booking.thank_you_path.clone(),
    };

    booking_routes(BookingHandlers::new(submit_handler, redirects))
        .layer(cors_layer(&config.server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<http::HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins)
    }
}

/// Assembles the widget services from configuration and a loaded roster.
pub fn build_widget(config: &WidgetConfig, roster: Roster) -> Result<Arc<Widget>, DomainError> {
    let engine = MatchEngine::new(config.weights)
        .with_specialty_overlap_required(config.require_specialty_overlap);
    let presenter = ResultsPresenter::new(
        AssetPathResolver::new(config.assets.clone()),
        config.presenter_config(),
    );

    Ok(Arc::new(Widget::new(
        Arc::new(canonical_catalog()?),
        Arc::new(roster),
        engine,
        presenter,
        config.max_results,
    )))
}
