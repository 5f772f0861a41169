use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
    routing::{get, post},
};
use axum_helpers::{AuditEvent, BasicAuth, ErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreatedUser, MessageResponse, Profile, SignupRequest, SignupResponse, UpdateUser,
    UpdateUserResponse, UserDetails, UserDetailsResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "accounts";

pub const ACCOUNT_CREATED: &str = "Account successfully created";
pub const USER_DETAILS: &str = "User details by user_id";
pub const USER_UPDATED: &str = "User successfully updated";
pub const ACCOUNT_CLOSED: &str = "Account and user successfully removed";

/// OpenAPI documentation for the account endpoints
#[derive(OpenApi)]
#[openapi(
    paths(signup, get_user, update_user, close_account),
    components(schemas(
        SignupRequest,
        UpdateUser,
        CreatedUser,
        UserDetails,
        Profile,
        SignupResponse,
        UserDetailsResponse,
        UpdateUserResponse,
        MessageResponse,
        ErrorResponse
    )),
    tags((name = TAG, description = "Account signup, lookup, update and closure"))
)]
pub struct ApiDoc;

/// Create the accounts router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/signup", post(signup))
        .route("/users/{id}", get(get_user).patch(update_user))
        .route("/close", post(close_account))
        .with_state(shared_service)
}

/// Reject requests whose Basic id differs from the account in the path.
fn ensure_same_account(
    auth: &BasicAuth,
    id: &str,
    action: &'static str,
    headers: &HeaderMap,
) -> UserResult<()> {
    if auth.username != id {
        AuditEvent::denied(action)
            .actor(auth.username.as_str())
            .resource(format!("user:{id}"))
            .reason("authenticated id does not match requested user")
            .client_ip(headers)
            .log();
        return Err(UserError::Forbidden);
    }
    Ok(())
}

/// Record a failed credential check before passing the error on.
fn audit_rejection(
    err: UserError,
    action: &'static str,
    actor: &str,
    headers: &HeaderMap,
) -> UserError {
    if matches!(err, UserError::AuthenticationFailed) {
        AuditEvent::failure(action)
            .actor(actor)
            .reason("credential mismatch")
            .client_ip(headers)
            .log();
    }
    err
}

/// Create an account
#[utoipa::path(
    post,
    path = "/signup",
    tag = TAG,
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid or unreadable body, or id already taken", body = ErrorResponse)
    )
)]
async fn signup<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> UserResult<Json<SignupResponse>> {
    let Json(input) = payload.map_err(UserError::MalformedSignup)?;
    let id = input.id.clone();

    let user = service.signup(input).await.inspect_err(|err| {
        if matches!(err, UserError::AlreadyExists(_)) {
            AuditEvent::failure("account.signup")
                .actor(id.as_str())
                .reason("id already taken")
                .client_ip(&headers)
                .log();
        }
    })?;

    AuditEvent::success("account.signup")
        .actor(user.id.as_str())
        .client_ip(&headers)
        .log();

    Ok(Json(SignupResponse {
        message: ACCOUNT_CREATED.to_string(),
        user,
    }))
}

/// Get an account's details
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Account id")
    ),
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Account found", body = UserDetailsResponse),
        (status = 401, description = "Missing or wrong credentials", body = ErrorResponse),
        (status = 403, description = "Credentials belong to another account", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    auth: BasicAuth,
    Path(id): Path<String>,
) -> UserResult<Json<UserDetailsResponse>> {
    ensure_same_account(&auth, &id, "account.read", &headers)?;

    let user = service
        .get_user(&id, &auth.password)
        .await
        .map_err(|err| audit_rejection(err, "account.read", &id, &headers))?;

    Ok(Json(UserDetailsResponse {
        message: USER_DETAILS.to_string(),
        user,
    }))
}

/// Update an account's display name and/or note
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "Account id")
    ),
    request_body = UpdateUser,
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Account updated", body = UpdateUserResponse),
        (status = 400, description = "Nothing to update, id/credential in body, or unreadable body", body = ErrorResponse),
        (status = 401, description = "Missing or wrong credentials", body = ErrorResponse),
        (status = 403, description = "Credentials belong to another account", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    auth: BasicAuth,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> UserResult<Json<UpdateUserResponse>> {
    ensure_same_account(&auth, &id, "account.update", &headers)?;

    // An unreadable body still reports NotFound/Unauthorized first.
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            service
                .get_user(&id, &auth.password)
                .await
                .map_err(|err| audit_rejection(err, "account.update", &id, &headers))?;
            return Err(UserError::MalformedUpdate(rejection));
        }
    };

    let recipe = service
        .update_user(&id, &auth.password, input)
        .await
        .map_err(|err| audit_rejection(err, "account.update", &id, &headers))?;

    Ok(Json(UpdateUserResponse {
        message: USER_UPDATED.to_string(),
        recipe,
    }))
}

/// Close the authenticated account
#[utoipa::path(
    post,
    path = "/close",
    tag = TAG,
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Account removed", body = MessageResponse),
        (status = 401, description = "Missing or wrong credentials", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    )
)]
async fn close_account<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    auth: BasicAuth,
) -> UserResult<Json<MessageResponse>> {
    service
        .close_account(&auth.username, &auth.password)
        .await
        .map_err(|err| audit_rejection(err, "account.close", &auth.username, &headers))?;

    AuditEvent::success("account.close")
        .actor(auth.username.as_str())
        .client_ip(&headers)
        .log();

    Ok(Json(MessageResponse {
        message: ACCOUNT_CLOSED.to_string(),
    }))
}
