//! Test helpers shared by the integration tests
//!
//! Provides an in-process stand-in for the BOSH director API and fixture
//! loading. Not every test binary uses every helper.
#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use create_install_bat::director::{DirectorClient, DirectorSettings};
use create_install_bat::pipeline::GenerateOptions;

/// `Authorization` header for admin:admin
pub const ADMIN_BASIC_AUTH: &str = "Basic YWRtaW46YWRtaW4=";

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Read a manifest from `tests/fixtures`
pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// A request the fake director received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
}

/// What `GET /deployments` answers with
#[derive(Clone)]
enum DeploymentList {
    Json(Value),
    ServerError,
    NotJson,
}

#[derive(Clone)]
struct DirectorState {
    deployments: DeploymentList,
    manifests: Arc<HashMap<String, String>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl DirectorState {
    /// Record the request and report whether it carried admin:admin
    fn record(&self, path: String, headers: &HeaderMap) -> bool {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let authorized = authorization.as_deref() == Some(ADMIN_BASIC_AUTH);
        self.requests.lock().unwrap().push(RecordedRequest {
            path,
            authorization,
        });
        authorized
    }
}

/// A running fake director
pub struct FakeDirector {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeDirector {
    /// Serve `deployments` from `/deployments` and each manifest from
    /// `/deployments/<name>`. An empty manifest is served as a body without
    /// the `manifest` key.
    pub async fn start(deployments: Value, manifests: HashMap<String, String>) -> Self {
        Self::serve(DeploymentList::Json(deployments), manifests).await
    }

    /// A director whose `/deployments` endpoint answers 500
    pub async fn failing() -> Self {
        Self::serve(DeploymentList::ServerError, HashMap::new()).await
    }

    /// A director whose `/deployments` endpoint answers 200 with a non-JSON body
    pub async fn not_json() -> Self {
        Self::serve(DeploymentList::NotJson, HashMap::new()).await
    }

    /// The usual cf-warden / cf-warden-diego pair, with `manifest` on the
    /// Diego deployment
    pub async fn with_diego_manifest(manifest: String) -> Self {
        let mut manifests = HashMap::new();
        manifests.insert("cf-warden-diego".to_string(), manifest);
        Self::start(default_deployments(), manifests).await
    }

    async fn serve(deployments: DeploymentList, manifests: HashMap<String, String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = DirectorState {
            deployments,
            manifests: Arc::new(manifests),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/deployments", get(list_deployments))
            .route("/deployments/{name}", get(show_deployment))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn client(&self) -> DirectorClient {
        DirectorClient::new(&self.settings("admin", "admin")).unwrap()
    }

    pub fn settings(&self, username: &str, password: &str) -> DirectorSettings {
        DirectorSettings {
            base_url: self.url.clone(),
            username: username.to_string(),
            password: password.to_string(),
            skip_tls_verify: false,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn options(&self, output_dir: &std::path::Path) -> GenerateOptions {
        GenerateOptions {
            director: self.settings("admin", "admin"),
            output_dir: output_dir.to_path_buf(),
            required_releases: vec!["cf".to_string(), "diego".to_string()],
            windows_username: None,
            windows_password: None,
            aws_subnet: None,
        }
    }
}

pub fn default_deployments() -> Value {
    json!([
        {
            "name": "cf-warden",
            "releases": [{"name": "cf", "version": "213+dev.2"}]
        },
        {
            "name": "cf-warden-diego",
            "releases": [
                {"name": "cf", "version": "213+dev.2"},
                {"name": "diego", "version": "0.1366.0+dev.2"}
            ]
        }
    ])
}

async fn list_deployments(State(state): State<DirectorState>, headers: HeaderMap) -> Response {
    if !state.record("/deployments".to_string(), &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match &state.deployments {
        DeploymentList::Json(deployments) => Json(deployments.clone()).into_response(),
        DeploymentList::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "director exploded").into_response()
        }
        DeploymentList::NotJson => (StatusCode::OK, "not json").into_response(),
    }
}

async fn show_deployment(
    State(state): State<DirectorState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !state.record(format!("/deployments/{name}"), &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.manifests.get(&name) {
        Some(manifest) if manifest.is_empty() => Json(json!({ "name": name })).into_response(),
        Some(manifest) => Json(json!({ "manifest": manifest })).into_response(),
        None => (StatusCode::NOT_FOUND, "deployment not found").into_response(),
    }
}

/// File names in `dir`, sorted
pub fn files_in(dir: &std::path::Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
