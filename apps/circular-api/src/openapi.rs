//! OpenAPI documentation configuration

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Circular API",
        version = "0.1.0",
        description = "Campus event announcements: admins publish, students browse"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc),
        (path = "/api/auth", api = domain_users::AuthApiDoc),
        (path = "/api/admin", api = domain_users::AdminApiDoc)
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "events", description = "Campus event announcements"),
        (name = "auth", description = "Signup and login"),
        (name = "admin", description = "Role management")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by guarded operations.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
