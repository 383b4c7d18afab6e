use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{self, SecurityConfig};
use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};
use crate::state::AppState;

/// The complete HTTP application
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .merge(public_routes())
        // Protected (JWT)
        .merge(protected_routes())
        // Elevated (JWT + admin)
        .merge(admin_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(&config::config().security) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn public_routes() -> Router<AppState> {
    use public::{auth, categories, products};

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/categories", get(categories::list))
        .route("/categories/:id", get(categories::show))
        .route("/products", get(products::list))
        .route("/products/:id", get(products::show))
}

fn protected_routes() -> Router<AppState> {
    use protected::{auth, cart, orders};

    Router::new()
        .route("/auth/me", get(auth::whoami))
        .route(
            "/cart",
            get(cart::list).post(cart::add).delete(cart::clear),
        )
        .route("/cart/:item_id", put(cart::update).delete(cart::remove))
        .route("/orders", get(orders::list).post(orders::place))
        .route("/orders/:id", get(orders::show))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use elevated::{categories, products, session, users};

    // Layers run bottom-up: JWT first, then the admin check
    let guarded = Router::new()
        .route("/admin/users", get(users::list))
        .route(
            "/admin/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/admin/categories/:id",
            get(categories::show)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/admin/products", get(products::list).post(products::create))
        .route(
            "/admin/products/:id",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route_layer(from_fn_with_state(state, require_admin_middleware))
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/admin/login", post(session::login))
        .merge(guarded)
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
