//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Condition;
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppSettings;
use crate::doc::ApiDoc;
use crate::domain::{BookingService, ImagePolicy, RentalService, UserService};
use crate::inbound::http::bookings::{
    create_booking, delete_booking, get_booking, list_bookings, update_booking,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::rentals::{
    add_gallery_image, create_rental, delete_rental, get_rental, list_rentals,
    remove_gallery_image, update_cover_image, update_rental,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    create_user, delete_user, get_user, list_user_bookings, list_user_rentals, list_users,
    update_profile_image, update_user,
};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselRentalRepository, DieselUserRepository,
};
use crate::outbound::storage::CapStdImageStore;

/// Build the shared HTTP state over database-backed repositories and the
/// capability-rooted image store.
pub fn build_http_state(
    pool: DbPool,
    images: CapStdImageStore,
    settings: &AppSettings,
) -> web::Data<HttpState> {
    let users_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let rentals_repo = Arc::new(DieselRentalRepository::new(pool.clone()));
    let bookings_repo = Arc::new(DieselBookingRepository::new(pool));
    let images = Arc::new(images);
    let image_policy = ImagePolicy::new(settings.max_image_bytes);

    let users = Arc::new(UserService::new(
        users_repo.clone(),
        images.clone(),
        image_policy,
        settings.default_user_image(),
    ));
    let rentals = Arc::new(RentalService::new(
        rentals_repo.clone(),
        users_repo.clone(),
        images,
        image_policy,
        settings.default_rental_image(),
    ));
    let bookings = Arc::new(BookingService::new(bookings_repo, users_repo, rentals_repo));

    web::Data::new(HttpState::new(users, rentals, bookings))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    enable_docs: bool,
    permissive_cors: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<EitherBody<BoxBody>>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        enable_docs,
        permissive_cors,
    } = deps;

    let api = web::scope("/api")
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(update_profile_image)
        .service(list_user_rentals)
        .service(list_user_bookings)
        .service(create_rental)
        .service(list_rentals)
        .service(get_rental)
        .service(update_rental)
        .service(delete_rental)
        .service(update_cover_image)
        .service(add_gallery_image)
        .service(remove_gallery_image)
        .service(create_booking)
        .service(list_bookings)
        .service(get_booking)
        .service(update_booking)
        .service(delete_booking);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Condition::new(permissive_cors, Cors::permissive()))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    if enable_docs {
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        app
    }
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        http_state,
        enable_docs,
        permissive_cors,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            enable_docs,
            permissive_cors,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
