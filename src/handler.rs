use crate::resolve::Resolver;
use crate::slack::SigningSecret;
use crate::types::IncomingRequest;
use crate::validate::validate;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

pub const NO_RESULTS: &str = "No results match your query";

/// Status and plain-text body returned to Slack. Non-200 responses carry no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub status: StatusCode,
    pub body: String,
}

impl CommandResponse {
    fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        if self.status == StatusCode::OK {
            (self.status, self.body).into_response()
        } else {
            self.status.into_response()
        }
    }
}

pub async fn handle(
    request: &IncomingRequest,
    secret: &SigningSecret,
    resolver: &dyn Resolver,
) -> CommandResponse {
    let command = match validate(request, secret) {
        Ok(command) => command,
        Err(rejection) => {
            warn!(
                "Rejected slash command ({}): {}",
                rejection.status().as_u16(),
                rejection
            );
            return CommandResponse::empty(rejection.status());
        }
    };

    info!("Slash command query: {:?}", command.query);

    match resolver.resolve(&command.query).await {
        Ok(Some(answer)) => CommandResponse::ok(answer),
        Ok(None) => CommandResponse::ok(NO_RESULTS),
        Err(e) => {
            error!("Lookup failed for {:?}: {}", command.query, e);
            CommandResponse::empty(StatusCode::BAD_GATEWAY)
        }
    }
}
