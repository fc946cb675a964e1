//! HTTP handlers
//!
//! `POST /graphql` runs a document against the schema with the caller's
//! identity attached. `POST /post-image` stores an uploaded post image.

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql::{Response, ServerError};
use async_graphql_actix_web::GraphQLRequest;
use chrono::{SecondsFormat, Utc};
use futures_util::StreamExt;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};

use crate::config::UploadConfig;
use crate::error::{BlogError, GENERIC_ERROR_MESSAGE};
use crate::middleware::AuthenticatedUser;
use crate::schema::AppSchema;

const IMAGE_FIELD: &str = "image";
const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

/// Register every route. GraphiQL is only mounted when `playground` is set.
pub fn configure(cfg: &mut web::ServiceConfig, playground: bool) {
    cfg.route("/graphql", web::post().to(graphql_handler))
        .route("/graphql/schema", web::get().to(schema_handler))
        .route("/health", web::get().to(health_handler))
        .route("/post-image", web::post().to(upload_image));

    if playground {
        cfg.route("/graphql", web::get().to(playground_handler));
    }
}

pub async fn graphql_handler(
    schema: web::Data<AppSchema>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> HttpResponse {
    let mut request = req.into_inner();

    let user = http_req.extensions().get::<AuthenticatedUser>().cloned();
    if let Some(user) = user {
        request = request.data(user);
    }

    let response = schema.execute(request).await;
    HttpResponse::Ok().json(format_response(response))
}

/// Render a GraphQL response.
///
/// Errors raised by the service layer carry a `status` extension and are
/// flattened to `{ message, status, data? }`. Parse and validation errors
/// keep the standard shape.
pub fn format_response(response: Response) -> Value {
    let mut body = Map::new();
    body.insert(
        "data".to_string(),
        response.data.into_json().unwrap_or(Value::Null),
    );

    if !response.errors.is_empty() {
        let errors = response.errors.into_iter().map(format_error).collect();
        body.insert("errors".to_string(), Value::Array(errors));
    }

    Value::Object(body)
}

fn format_error(err: ServerError) -> Value {
    let extensions = err.extensions.as_ref();
    let Some(status) = extensions.and_then(|ext| ext.get("status")) else {
        return serde_json::to_value(&err).unwrap_or_else(|_| json!({ "message": err.message.clone() }));
    };

    let mut out = Map::new();
    out.insert("message".to_string(), Value::String(err.message.clone()));
    out.insert(
        "status".to_string(),
        serde_json::to_value(status).unwrap_or(json!(500)),
    );
    if let Some(data) = extensions.and_then(|ext| ext.get("data")) {
        out.insert(
            "data".to_string(),
            serde_json::to_value(data).unwrap_or(Value::Null),
        );
    }
    Value::Object(out)
}

pub async fn playground_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub async fn schema_handler(schema: web::Data<AppSchema>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(schema.sdl())
}

pub async fn health_handler() -> &'static str {
    "ok"
}

fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "message": message,
        "status": status.as_u16(),
    }))
}

fn blog_error_response(err: &BlogError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_error(status, &err.public_message())
}

/// Reduce an uploaded file name to `[A-Za-z0-9._-]`
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

pub async fn upload_image(
    http_req: HttpRequest,
    config: web::Data<UploadConfig>,
    mut payload: Multipart,
) -> HttpResponse {
    let user = http_req.extensions().get::<AuthenticatedUser>().cloned();
    let Some(user) = user else {
        return blog_error_response(&BlogError::Unauthenticated);
    };

    let mut stored: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                warn!(error = %e, "Malformed multipart body");
                return json_error(StatusCode::BAD_REQUEST, "Malformed multipart body.");
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let accepted = field
            .content_type()
            .map(|mime| ACCEPTED_IMAGE_TYPES.iter().any(|t| *t == mime.essence_str()))
            .unwrap_or(false);
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(sanitize_filename);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(chunk) => {
                    if bytes.len() + chunk.len() > config.max_bytes {
                        warn!(user_id = %user.user_id, limit = config.max_bytes, "Upload too large");
                        return json_error(StatusCode::PAYLOAD_TOO_LARGE, "File too large.");
                    }
                    bytes.extend_from_slice(&chunk);
                }
                Err(e) => {
                    error!(error = %e, "Error reading upload field");
                    return json_error(StatusCode::BAD_REQUEST, "Malformed multipart body.");
                }
            }
        }

        match name.as_str() {
            IMAGE_FIELD if accepted => {
                stored = Some((filename.unwrap_or_else(|| "image".to_string()), bytes));
            }
            IMAGE_FIELD => {
                debug!(user_id = %user.user_id, "Dropping upload with unaccepted content type");
            }
            _ => {}
        }
    }

    let Some((filename, bytes)) = stored else {
        return HttpResponse::Ok().json(json!({
            "message": "No file provided!",
            "filePath": Value::Null,
        }));
    };

    if let Err(e) = tokio::fs::create_dir_all(&config.images_dir).await {
        error!(error = %e, dir = %config.images_dir.display(), "Failed to create images directory");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE);
    }

    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let path = config.images_dir.join(format!("{}-{}", stamp, filename));

    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        error!(error = %e, path = %path.display(), "Failed to store image");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE);
    }

    let file_path = path.to_string_lossy().replace('\\', "/");
    info!(user_id = %user.user_id, path = %file_path, size = bytes.len(), "Image stored");

    HttpResponse::Created().json(json!({
        "message": "File stored.",
        "filePath": file_path,
    }))
}
