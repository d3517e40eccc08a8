// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-memory cluster API backing the unit tests.

use crate::config::Config;
use crate::kubernetes::ApiClient;
use bytes::Bytes;
use http::{Method, Request, Response};
use http_body_util::BodyExt;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::{Client, Resource};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;
use tracing_subscriber::EnvFilter;

/// Poll interval of every client handed out by [`FakeApiServer::api_client`]
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ObjectPath {
    base: String,
    plural: String,
    namespace: Option<String>,
    name: String,
}

#[derive(Debug)]
struct Target {
    base: String,
    plural: String,
    namespace: Option<String>,
    name: Option<String>,
}

impl Target {
    fn object_path(&self, name: &str) -> ObjectPath {
        ObjectPath {
            base: self.base.clone(),
            plural: self.plural.clone(),
            namespace: self.namespace.clone(),
            name: name.to_string(),
        }
    }

    fn contains(&self, path: &ObjectPath) -> bool {
        path.base == self.base
            && path.plural == self.plural
            && (self.namespace.is_none() || path.namespace == self.namespace)
    }
}

#[derive(Default)]
struct State {
    objects: BTreeMap<ObjectPath, Value>,
    responses: HashMap<String, (u16, String)>,
    failures: Vec<(Method, String, u16)>,
    requests: Vec<(Method, String)>,
    revision: u64,
}

impl State {
    fn next_revision(&mut self) -> String {
        self.revision += 1;
        self.revision.to_string()
    }
}

/// A fake API server that stores objects and answers like the real one.
///
/// Objects get a fresh `resourceVersion` on every write and a stale version
/// on update is rejected with 409. Scripted GET responses and one-shot
/// failures take precedence over the store.
#[derive(Clone, Default)]
pub struct FakeApiServer {
    state: Arc<Mutex<State>>,
}

impl FakeApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GET requests for exactly `path` with a fixed response
    pub fn on_get(&self, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// Fail the next request with `method` on exactly `path`
    pub fn fail_next(&self, method: Method, path: &str, status: u16) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((method, path.to_string(), status));
    }

    /// Build a kube Client from this server
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Client with a short poll interval, sharing this server's store
    pub fn api_client(&self) -> ApiClient {
        init_tracing();
        ApiClient::with_config(
            self.clone().into_client(),
            Config {
                poll_interval: TEST_POLL_INTERVAL,
            },
        )
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Store an object as if it had been created through the API
    pub fn seed<K>(&self, object: &K)
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        let path = path_of::<K>(object.meta().namespace.as_deref(), &object.meta().name.clone().unwrap_or_default());
        let mut value = serde_json::to_value(object).unwrap();

        let mut state = self.state.lock().unwrap();
        let revision = state.next_revision();
        stamp_new(&mut value, &path, &revision);
        state.objects.insert(path, value);
    }

    /// Read back a stored object
    pub fn object<K>(&self, namespace: Option<&str>, name: &str) -> Option<K>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let path = path_of::<K>(namespace, name);
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&path)
            .map(|v| serde_json::from_value(v.clone()).unwrap())
    }

    /// Change a stored object in place, as another writer would
    pub fn modify<K>(&self, namespace: Option<&str>, name: &str, change: impl FnOnce(&mut K))
    where
        K: Resource<DynamicType = ()> + Serialize + DeserializeOwned,
    {
        let path = path_of::<K>(namespace, name);
        let mut state = self.state.lock().unwrap();
        let current = state.objects.get(&path).cloned().expect("object to modify");

        let mut object: K = serde_json::from_value(current).unwrap();
        change(&mut object);
        let mut value = serde_json::to_value(&object).unwrap();
        let revision = state.next_revision();
        value["metadata"]["resourceVersion"] = json!(revision);
        state.objects.insert(path, value);
    }

    fn handle(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        body: &[u8],
    ) -> (u16, String) {
        let mut state = self.state.lock().unwrap();
        state.requests.push((method.clone(), path.to_string()));

        if let Some(pos) = state
            .failures
            .iter()
            .position(|(m, p, _)| m == method && p == path)
        {
            let (_, _, code) = state.failures.remove(pos);
            return (code, status_json(code, reason_for(code), "injected failure"));
        }

        if *method == Method::GET {
            if let Some(response) = state.responses.get(path) {
                return response.clone();
            }
        }

        let Some(target) = parse_path(path) else {
            return (404, status_json(404, "NotFound", "the server could not find the requested resource"));
        };

        match (method.clone(), target.name.clone()) {
            (Method::GET, Some(name)) => match state.objects.get(&target.object_path(&name)) {
                Some(object) => (200, object.to_string()),
                None => not_found(&target.plural, &name),
            },
            (Method::GET, None) => {
                let selector = query.map(label_selector).unwrap_or_default();
                let items: Vec<Value> = state
                    .objects
                    .iter()
                    .filter(|(p, v)| target.contains(p) && matches_labels(v, &selector))
                    .map(|(_, v)| v.clone())
                    .collect();
                let list = json!({
                    "apiVersion": "v1",
                    "kind": "List",
                    "metadata": { "resourceVersion": state.revision.to_string() },
                    "items": items,
                });
                (200, list.to_string())
            }
            (Method::POST, None) => {
                let Ok(mut object) = serde_json::from_slice::<Value>(body) else {
                    return (400, status_json(400, "BadRequest", "malformed body"));
                };
                let Some(name) = object["metadata"]["name"].as_str().map(str::to_string) else {
                    return (422, status_json(422, "Invalid", "metadata.name: Required value"));
                };
                let path = target.object_path(&name);
                if state.objects.contains_key(&path) {
                    return (
                        409,
                        status_json(409, "AlreadyExists", &format!("{} \"{}\" already exists", target.plural, name)),
                    );
                }
                let revision = state.next_revision();
                stamp_new(&mut object, &path, &revision);
                state.objects.insert(path, object.clone());
                (201, object.to_string())
            }
            (Method::PUT, Some(name)) => {
                let path = target.object_path(&name);
                let Some(stored) = state.objects.get(&path).cloned() else {
                    return not_found(&target.plural, &name);
                };
                let Ok(mut object) = serde_json::from_slice::<Value>(body) else {
                    return (400, status_json(400, "BadRequest", "malformed body"));
                };
                let sent = object["metadata"]["resourceVersion"].as_str().map(str::to_string);
                let current = stored["metadata"]["resourceVersion"].as_str().map(str::to_string);
                if sent.is_some() && sent != current {
                    return (
                        409,
                        status_json(
                            409,
                            "Conflict",
                            &format!("Operation cannot be fulfilled on {} \"{}\": the object has been modified", target.plural, name),
                        ),
                    );
                }
                let revision = state.next_revision();
                object["metadata"]["resourceVersion"] = json!(revision);
                object["metadata"]["uid"] = stored["metadata"]["uid"].clone();
                object["metadata"]["creationTimestamp"] = stored["metadata"]["creationTimestamp"].clone();
                state.objects.insert(path, object.clone());
                (200, object.to_string())
            }
            (Method::DELETE, Some(name)) => match state.objects.remove(&target.object_path(&name)) {
                Some(object) => (200, object.to_string()),
                None => not_found(&target.plural, &name),
            },
            _ => (405, status_json(405, "MethodNotAllowed", "method not supported by the fake server")),
        }
    }
}

impl Service<Request<Body>> for FakeApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let server = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let payload: Bytes = body.collect().await?.to_bytes();

            let (status, body) = server.handle(&parts.method, parts.uri.path(), parts.uri.query(), &payload);

            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Install a test subscriber once; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An empty ConfigMap
pub fn config_map(name: &str, namespace: &str) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn path_of<K: Resource<DynamicType = ()>>(namespace: Option<&str>, name: &str) -> ObjectPath {
    let collection = K::url_path(&(), namespace);
    let target = parse_path(&format!("{}/{}", collection, name)).expect("resource url");
    target.object_path(name)
}

/// Split `/api/v1/...` and `/apis/group/version/...` paths into their parts
fn parse_path(path: &str) -> Option<Target> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let (base, rest) = match segments.as_slice() {
        ["api", version, rest @ ..] => (format!("/api/{}", version), rest),
        ["apis", group, version, rest @ ..] => (format!("/apis/{}/{}", group, version), rest),
        _ => return None,
    };

    let (namespace, plural, name) = match rest {
        ["namespaces", ns, plural] => (Some(ns), plural, None),
        ["namespaces", ns, plural, name] => (Some(ns), plural, Some(name)),
        [plural] => (None, plural, None),
        [plural, name] => (None, plural, Some(name)),
        _ => return None,
    };

    Some(Target {
        base,
        plural: plural.to_string(),
        namespace: namespace.map(|ns| ns.to_string()),
        name: name.map(|n| n.to_string()),
    })
}

fn stamp_new(object: &mut Value, path: &ObjectPath, revision: &str) {
    let metadata = &mut object["metadata"];
    if let Some(ns) = &path.namespace {
        metadata["namespace"] = json!(ns);
    }
    metadata["resourceVersion"] = json!(revision);
    metadata["uid"] = json!(format!("uid-{}", revision));
    metadata["creationTimestamp"] = json!("2026-01-01T00:00:00Z");
}

/// One term of an equality-based label selector
#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectorTerm {
    Equals(String, String),
    NotEquals(String, String),
    Exists(String),
    NotExists(String),
}

impl SelectorTerm {
    fn parse(term: &str) -> Self {
        let term = term.trim();
        if let Some((key, value)) = term.split_once("!=") {
            SelectorTerm::NotEquals(key.trim().to_string(), value.trim().to_string())
        } else if let Some((key, value)) = term.split_once("==").or_else(|| term.split_once('=')) {
            SelectorTerm::Equals(key.trim().to_string(), value.trim().to_string())
        } else if let Some(key) = term.strip_prefix('!') {
            SelectorTerm::NotExists(key.trim().to_string())
        } else {
            SelectorTerm::Exists(term.to_string())
        }
    }

    fn matches(&self, labels: &Value) -> bool {
        let label = |key: &str| labels[key].as_str();
        match self {
            SelectorTerm::Equals(key, value) => label(key) == Some(value.as_str()),
            SelectorTerm::NotEquals(key, value) => label(key) != Some(value.as_str()),
            SelectorTerm::Exists(key) => label(key).is_some(),
            SelectorTerm::NotExists(key) => label(key).is_none(),
        }
    }
}

fn label_selector(query: &str) -> Vec<SelectorTerm> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "labelSelector")
        .flat_map(|(_, selector)| {
            selector
                .split(',')
                .filter(|term| !term.trim().is_empty())
                .map(SelectorTerm::parse)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn matches_labels(object: &Value, selector: &[SelectorTerm]) -> bool {
    selector
        .iter()
        .all(|term| term.matches(&object["metadata"]["labels"]))
}

fn reason_for(code: u16) -> &'static str {
    match code {
        403 => "Forbidden",
        404 => "NotFound",
        409 => "Conflict",
        503 => "ServiceUnavailable",
        _ => "InternalError",
    }
}

fn status_json(code: u16, reason: &str, message: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

fn not_found(plural: &str, name: &str) -> (u16, String) {
    (
        404,
        status_json(404, "NotFound", &format!("{} \"{}\" not found", plural, name)),
    )
}
