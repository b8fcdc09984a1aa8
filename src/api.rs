// API client module: a small blocking HTTP client that talks to the
// lab's web service. It is intentionally small and synchronous: each
// call blocks until the HTTP exchange completes, with no retries and no
// timeout override beyond reqwest's defaults.

use anyhow::Context;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    BatchUploadResult, DemographicCreateRequest, DemographicSaveResponse, InterpretationOptions,
};

/// Everything that can go wrong during one client operation. The
/// interactive loop prints these and keeps going; one-shot mode treats
/// them as fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// The local file to upload is missing or unreadable.
    #[error("local file {path}: {source}")]
    LocalFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Date text did not match the fixed `YYYY-MM-DD` form.
    #[error("malformed date: {0}")]
    Format(#[from] chrono::ParseError),

    /// A 2xx response body did not match the expected JSON shape.
    #[error("decoding {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Transport-level failure (connection, TLS, mid-body I/O).
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Composite payload for the report-generation endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportRequest<'a> {
    batch_id: Uuid,
    sample_name: &'a str,
    options: &'a InterpretationOptions,
}

/// Blocking client for the lab API. Holds the base URL and a reqwest
/// client with the bearer token and default headers baked in; read-only
/// after construction.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url`, authenticating every request
    /// with `Authorization: Bearer <token>`.
    pub fn new(base_url: impl Into<String>, token: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("CLSDemo/0.1"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("token is not a valid header value")?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Upload an OpenArray file as an opaque byte stream. The file is
    /// checked locally before any request goes out.
    pub fn upload_open_array(&self, path: &Path) -> Result<BatchUploadResult> {
        if !path.is_file() {
            return Err(Error::LocalFile {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            });
        }
        let file = File::open(path).map_err(|source| Error::LocalFile {
            path: path.to_path_buf(),
            source,
        })?;

        let res = self
            .client
            .post(self.url("wh/loadStream"))
            .header(CONTENT_TYPE, "text/tsv")
            .header("X-IgnoreUnmapped", "true")
            .header("X-ChopTargets", "true")
            .body(file)
            .send()?;
        let body = check_status(res)?.text()?;
        decode_json(&body, "batch upload")
    }

    /// Post a demographic record. Optional fields the caller left unset
    /// are omitted from the payload entirely (see `models`).
    pub fn post_demographics(
        &self,
        request: &DemographicCreateRequest,
    ) -> Result<DemographicSaveResponse> {
        let res = self
            .client
            .post(self.url("wh/demo"))
            .json(request)
            .send()?;
        let body = check_status(res)?.text()?;
        decode_json(&body, "demographic save")
    }

    /// Kick off report generation for one sample of a batch. Side effect
    /// only: success is the confirmation, the body is not decoded.
    pub fn create_interpretation(
        &self,
        batch_id: Uuid,
        sample_name: &str,
        options: &InterpretationOptions,
    ) -> Result<()> {
        let payload = ReportRequest {
            batch_id,
            sample_name,
            options,
        };
        let res = self
            .client
            .post(self.url("wh/generateReport"))
            .json(&payload)
            .send()?;
        check_status(res)?;
        Ok(())
    }
}

/// Turn a non-2xx response into `Error::Api` carrying the status and the
/// raw body text.
fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        let body = res.text().unwrap_or_default();
        Err(Error::Api { status, body })
    }
}

fn decode_json<T: DeserializeOwned>(body: &str, context: &'static str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Decode { context, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::date_only;
    use serde_json::json;

    #[test]
    fn upload_of_missing_file_fails_before_any_request() {
        // the base URL is unroutable: reaching the network would surface
        // as Http, not LocalFile
        let api = ApiClient::new("http://127.0.0.1:1", "t0k3n").unwrap();
        let err = api
            .upload_open_array(Path::new("/no/such/openarray.tsv"))
            .unwrap_err();
        assert!(matches!(err, Error::LocalFile { .. }), "got {err:?}");
    }

    #[test]
    fn upload_of_directory_fails_locally() {
        let api = ApiClient::new("http://127.0.0.1:1", "t0k3n").unwrap();
        let err = api.upload_open_array(Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, Error::LocalFile { .. }), "got {err:?}");
    }

    #[test]
    fn batch_upload_body_decodes_with_all_fields() {
        let result: BatchUploadResult = decode_json(
            r#"{"batchId":"11111111-1111-1111-1111-111111111111","sampleNames":["S1","S2","S1"]}"#,
            "batch upload",
        )
        .unwrap();
        assert_eq!(
            result.batch_id,
            Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
        );
        assert_eq!(result.sample_names.len(), 2);
    }

    #[test]
    fn mismatched_body_is_a_decode_error() {
        let err = decode_json::<BatchUploadResult>(r#"{"unexpected": true}"#, "batch upload")
            .unwrap_err();
        match err {
            Error::Decode { context, .. } => assert_eq!(context, "batch upload"),
            other => panic!("got {other:?}"),
        }
    }

    #[test]
    fn api_error_carries_status_and_body() {
        let err = Error::Api {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: "sampleName is required".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"), "got {msg}");
        assert!(msg.contains("sampleName is required"), "got {msg}");
    }

    #[test]
    fn malformed_date_maps_to_format_error() {
        let err: Error = date_only::parse("not-a-date").unwrap_err().into();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn report_payload_nests_options_under_camel_case_keys() {
        let options = InterpretationOptions::default();
        let payload = ReportRequest {
            batch_id: Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap(),
            sample_name: "S1",
            options: &options,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "batchId": "11111111-1111-1111-1111-111111111111",
                "sampleName": "S1",
                "options": {
                    "groupId": 2,
                    "qcGroupId": 1,
                    "includeCharts": false,
                    "panels": []
                }
            })
        );
    }
}
