use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "Account signup, lookup, update and closure with HTTP Basic authentication. \
                       Every path listed under `/api` is also served without the prefix, \
                       e.g. `POST /signup`."
    ),
    nest(
        (path = "/api", api = domain_users::ApiDoc)
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `basic_auth` scheme referenced by the account paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_account_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in ["/signup", "/users/{id}", "/close"] {
            assert!(
                paths.iter().any(|p| p.ends_with(expected)),
                "missing {expected} in {paths:?}"
            );
        }
    }

    #[test]
    fn test_basic_auth_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("basic_auth"));
    }

    #[test]
    fn test_description_mentions_unprefixed_routes() {
        let doc = ApiDoc::openapi();
        let description = doc.info.description.unwrap_or_default();
        assert!(description.contains("without the prefix"));
    }
}
