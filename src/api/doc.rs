use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const CATEGORY_TAG: &str = "Category";
pub const GOOD_TAG: &str = "Good";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog",
        description = "Users, categories and goods with many-to-many category links",
    ),
    modifiers(&SecurityAddon),
    components(schemas(crate::api::dto::ErrorResponse)),
    tags(
        (name = AUTH_TAG, description = "Sign-up and sign-in"),
        (name = CATEGORY_TAG, description = "Category management and listing"),
        (name = GOOD_TAG, description = "Goods and their category links"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("HS512 token from /user/signin"))
                        .build(),
                ),
            )
        }
    }
}
