use super::{created, success};
use crate::error::RiffResult;
use crate::server::metrics;
use crate::server::state::{GuardedUserManager, ServerState};
use crate::server::JsonBody;
use crate::store::User;
use axum::{extract::State, response::IntoResponse, routing::post, Router};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    pub handle: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct LoginBody {
    pub handle: String,
    pub password: String,
}

#[derive(Serialize)]
struct UserResponse {
    user: User,
}

async fn register(
    State(user_manager): State<GuardedUserManager>,
    JsonBody(body): JsonBody<RegisterBody>,
) -> RiffResult<impl IntoResponse> {
    let user = user_manager.register(&body.handle, &body.password, body.display_name)?;
    Ok(created(UserResponse { user }))
}

async fn login(
    State(user_manager): State<GuardedUserManager>,
    JsonBody(body): JsonBody<LoginBody>,
) -> RiffResult<impl IntoResponse> {
    match user_manager.login(&body.handle, &body.password) {
        Ok(user) => {
            metrics::record_login_attempt("success");
            Ok(success(UserResponse { user }))
        }
        Err(err) => {
            metrics::record_login_attempt("failure");
            Err(err)
        }
    }
}

pub fn make_auth_routes(state: ServerState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .with_state(state)
}
