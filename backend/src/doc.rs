//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`], and the session cookie security scheme.
//! Swagger UI serves it in debug builds; `openapi-dump` prints it as JSON.

use crate::inbound::http::auth::{AccountResponse, CredentialsRequest};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorEnvelopeSchema, SpendSummarySchema, SubscriptionSchema,
};
use crate::inbound::http::subscriptions::DeleteResponse;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Subscription tracker API",
        description = "Session-authenticated tracking of recurring subscriptions and their spend."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::subscriptions::list_subscriptions,
        crate::inbound::http::subscriptions::create_subscription,
        crate::inbound::http::subscriptions::update_subscription,
        crate::inbound::http::subscriptions::delete_subscription,
        crate::inbound::http::stats::spend_stats,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CredentialsRequest,
        AccountResponse,
        DeleteResponse,
        SubscriptionSchema,
        SpendSummarySchema,
        ErrorEnvelopeSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "accounts", description = "Registration and session management"),
        (name = "subscriptions", description = "Subscription rows and spend statistics"),
        (name = "dashboard", description = "Server-rendered overview page"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/register")]
    #[case("/api/login")]
    #[case("/api/logout")]
    #[case("/api/subscriptions")]
    #[case("/api/subscriptions/{id}")]
    #[case("/api/stats")]
    #[case("/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("ErrorEnvelope", "traceId")]
    #[case("SpendSummary", "yearly_total")]
    #[case("Subscription", "billing_cycle")]
    fn registered_schemas_expose_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
