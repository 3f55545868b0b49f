//! The `/api/fileanalyse` HTTP endpoint.
//!
//! A `POST` carrying a `multipart/form-data` body is answered with the
//! metadata of the uploaded file:
//!
//! ```json
//! { "name": "a.txt", "type": "text/plain", "size": 5 }
//! ```
//!
//! Failures are answered with `{ "error": "<message>" }`.

use crate::config::ServiceConfig;
use crate::{Error, FieldDescriptor, Multipart};
use bytes::Bytes;
use futures_util::StreamExt;
use http_body_util::{BodyStream, Full};
use hyper::body::Body;
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Path of the upload endpoint.
pub const FILE_ANALYSE_PATH: &str = "/api/fileanalyse";

const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Routes one request. Never fails: every error becomes a JSON response.
pub async fn handle<B>(req: Request<B>, config: Arc<ServiceConfig>) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = match (&method, path.as_str()) {
        (&Method::OPTIONS, _) => preflight(),
        (&Method::POST, FILE_ANALYSE_PATH) => analyse(req, &config).await,
        (_, FILE_ANALYSE_PATH) => error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        _ => error_response(StatusCode::NOT_FOUND, "Not found"),
    };

    debug!("{} {} {}", method, path, response.status());

    Ok(with_cors(response))
}

async fn analyse<B>(req: Request<B>, config: &ServiceConfig) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
{
    // Extract the `multipart/form-data` boundary from the headers.
    let boundary = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .and_then(|ct| crate::parse_boundary(ct).ok());

    let boundary = match boundary {
        Some(boundary) => boundary,
        None => return error_response(StatusCode::BAD_REQUEST, "Content-Type must be multipart/form-data"),
    };

    match process_upload(req.into_body(), boundary, config).await {
        Ok(descriptor) => json_response(StatusCode::OK, &descriptor),
        Err(err) => {
            if err.is_client_error() {
                debug!("rejected upload: {}", err);
            } else {
                warn!("failed to process upload: {}", err);
            }

            let (status, message) = error_status(&err);
            error_response(status, message)
        }
    }
}

async fn process_upload<B>(body: B, boundary: String, config: &ServiceConfig) -> crate::Result<FieldDescriptor>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
{
    // Convert the body into a stream of data frames.
    let body_stream = BodyStream::new(body)
        .filter_map(|result| async move { result.map(|frame| frame.into_data().ok()).transpose() });

    let multipart = Multipart::from_stream(body_stream, boundary, config.size_limit.clone()).await?;
    let field_name = config.field_name.clone();

    tokio::task::spawn_blocking(move || multipart.extract_field(&field_name))
        .await
        .map_err(|err| Error::UnexpectedParsing(err.to_string().into()))?
}

fn error_status(err: &Error) -> (StatusCode, &'static str) {
    match err {
        Error::NoMultipart | Error::NoBoundary | Error::DecodeContentType(_) => {
            (StatusCode::BAD_REQUEST, "Content-Type must be multipart/form-data")
        }
        Error::FieldNotFound { .. } => (StatusCode::BAD_REQUEST, "No file uploaded or incorrect field name"),
        Error::FilenameNotFound { .. } => (StatusCode::BAD_REQUEST, "Could not extract filename"),
        Error::ContentStartNotFound { .. } => (StatusCode::BAD_REQUEST, "Could not find file content"),
        Error::FieldSizeExceeded { .. } | Error::StreamSizeExceeded { .. } => {
            (StatusCode::PAYLOAD_TOO_LARGE, "File too large")
        }
        Error::StreamReadFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error reading request"),
        Error::UnexpectedParsing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error processing file upload"),
        _ => (StatusCode::BAD_REQUEST, "Invalid multipart data"),
    }
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut res = Response::new(Full::from(body));
            *res.status_mut() = status;
            res.headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            res
        }
        Err(err) => {
            warn!("failed to serialize response: {}", err);

            let mut res = Response::new(Full::from("Internal Server Error"));
            *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            res
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &ErrorBody { error: message })
}

fn preflight() -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = StatusCode::NO_CONTENT;

    let headers = res.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    res
}

fn with_cors(mut res: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    res.headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    res
}
