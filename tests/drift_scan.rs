//! End-to-end scans over temporary reference/client trees.

use contract_drift::{scan, DriftConfig, DriftError, IssueKind};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct Workspace {
    _dir: TempDir,
    config: DriftConfig,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let mut config = DriftConfig::default();
        config.paths.reference_root = dir.path().join("backend");
        config.paths.client_root = dir.path().join("sdk");
        fs::create_dir_all(config.reference_models_dir()).unwrap();
        Self { _dir: dir, config }
    }

    fn write(&self, dir: &Path, name: &str, text: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), text).unwrap();
    }

    fn reference_model(&self, name: &str, text: &str) {
        self.write(&self.config.reference_models_dir(), name, text);
    }

    fn reference_router(&self, name: &str, text: &str) {
        self.write(&self.config.reference_routers_dir(), name, text);
    }

    fn client_model(&self, name: &str, text: &str) {
        self.write(&self.config.client_models_dir(), name, text);
    }

    fn client_router(&self, name: &str, text: &str) {
        self.write(&self.config.client_routers_dir(), name, text);
    }
}

const AUTHS_REFERENCE: &str = r#"
from pydantic import BaseModel

class Token(BaseModel):
    token: str
    token_type: str
"#;

const TOOLS_ROUTER: &str = r#"
router = APIRouter()

@router.get("/{id}/valves")
async def get_tools_valves_by_id(id: str):
    ...
"#;

const TOOLS_CLIENT: &str = r#"
class ToolsClient(ResourceBase):
    async def get_valves(self, id: str):
        return await self._request("GET", f"{self.base}/tools/id/{id}/valves")
"#;

#[test]
fn missing_field_is_reported() {
    let ws = Workspace::new();
    ws.reference_model("auths.py", AUTHS_REFERENCE);
    ws.client_model(
        "auths.py",
        "from pydantic import BaseModel\n\nclass Token(BaseModel):\n    token: str\n",
    );

    let report = scan(&ws.config).unwrap();
    assert_eq!(report.len(), 1, "{report}");
    let issue = &report.issues[0];
    assert_eq!(issue.kind, IssueKind::MissingFields);
    assert_eq!(issue.file, "auths.py");
    assert_eq!(issue.message, "Model Token missing fields: token_type");
    assert_eq!(
        issue.to_string(),
        "[MISSING_FIELDS] auths.py: Model Token missing fields: token_type"
    );
}

#[test]
fn placeholder_names_do_not_matter() {
    let ws = Workspace::new();
    ws.reference_router("tools.py", TOOLS_ROUTER);
    ws.client_router("tools.py", TOOLS_CLIENT);

    assert!(scan(&ws.config).unwrap().is_clean());
}

#[test]
fn root_route_needs_resource_suffix() {
    let ws = Workspace::new();
    ws.reference_router(
        "channels.py",
        "@router.post(\"/\")\nasync def create_channel(form: ChannelForm):\n    ...\n",
    );
    ws.client_router(
        "channels.py",
        r#"
class ChannelsClient(ResourceBase):
    async def create(self, form):
        return await self._request("POST", "/v1/channels/create", json=form)
"#,
    );

    let report = scan(&ws.config).unwrap();
    assert_eq!(report.len(), 1, "{report}");
    assert_eq!(report.issues[0].kind, IssueKind::MissingEndpoint);
    assert_eq!(report.issues[0].file, "channels.py");
    assert_eq!(report.issues[0].message, "Endpoint POST / not called in client");

    ws.client_router(
        "channels.py",
        r#"
class ChannelsClient(ResourceBase):
    async def create(self, form):
        return await self._request("POST", f"{self.base}/channels/", json=form)
"#,
    );
    assert!(scan(&ws.config).unwrap().is_clean());
}

#[test]
fn catch_all_route_matches_dynamic_method() {
    let ws = Workspace::new();
    ws.reference_router(
        "ollama.py",
        "@router.api_route(\"/proxy/{path:path}\", methods=[\"GET\", \"POST\"])\nasync def proxy(path: str):\n    ...\n",
    );
    ws.client_router(
        "ollama.py",
        r#"
class OllamaClient(ResourceBase):
    async def passthrough(self, method: str, path: str):
        return await self._request(method, f"{self.base}/ollama/proxy/{path}")
"#,
    );

    assert!(scan(&ws.config).unwrap().is_clean());
}

#[test]
fn catch_all_route_needs_a_method_argument() {
    let ws = Workspace::new();
    ws.reference_router(
        "ollama.py",
        "@router.api_route(\"/{path:path}\")\nasync def proxy(path: str):\n    ...\n",
    );
    ws.client_router(
        "ollama.py",
        r#"
class OllamaClient(ResourceBase):
    async def passthrough(self, x: str):
        return await self._request(url=f"/ollama/{x}")
"#,
    );

    let report = scan(&ws.config).unwrap();
    assert_eq!(report.len(), 1, "{report}");
    assert_eq!(
        report.issues[0].message,
        "Endpoint API_ROUTE /{path:path} not called in client"
    );
}

#[test]
fn malformed_client_file_does_not_stop_scan() {
    let ws = Workspace::new();
    ws.reference_model("auths.py", AUTHS_REFERENCE);
    ws.client_model("auths.py", "class Token(BaseModel:\n    token: str\n");
    ws.reference_model("users.py", "class User(BaseModel):\n    id: str\n    name: str\n");
    ws.client_model("users.py", "class User(BaseModel):\n    id: str\n");

    let report = scan(&ws.config).unwrap();
    assert_eq!(report.len(), 1, "{report}");
    assert_eq!(report.issues[0].file, "users.py");
    assert_eq!(report.issues_for("auths.py").count(), 0);
}

#[test]
fn malformed_client_router_skips_only_its_endpoints() {
    let ws = Workspace::new();
    ws.reference_router(
        "chats.py",
        "@router.get(\"/{id}\")\nasync def get_chat(id: str):\n    ...\n\n@router.post(\"/{id}/share\")\nasync def share(id: str):\n    ...\n",
    );
    ws.client_router("chats.py", "class ChatsClient(ResourceBase:\n    def get(self\n");
    ws.reference_router(
        "users.py",
        "@router.get(\"/{user_id}/settings\")\nasync def settings(user_id: str):\n    ...\n",
    );
    ws.client_router(
        "users.py",
        r#"
class UsersClient(ResourceBase):
    async def me(self):
        return await self._request("GET", f"{self.base}/users/me")
"#,
    );

    let report = scan(&ws.config).unwrap();
    assert_eq!(report.issues_for("chats.py").count(), 0, "{report}");
    assert_eq!(report.len(), 1, "{report}");
    assert_eq!(report.issues[0].file, "users.py");
    assert_eq!(
        report.issues[0].message,
        "Endpoint GET /{user_id}/settings not called in client"
    );
}

#[test]
fn unresolvable_url_found_by_source_text() {
    let ws = Workspace::new();
    ws.reference_router(
        "files.py",
        "@router.get(\"/{id}/content\")\nasync def get_file_content(id: str):\n    ...\n",
    );
    ws.client_router(
        "files.py",
        r#"
class FilesClient(ResourceBase):
    async def content(self, id: str):
        return await self._request("GET", self.base + "/files/" + id + "/content")
"#,
    );

    assert!(scan(&ws.config).unwrap().is_clean());
}

#[test]
fn identical_trees_are_clean() {
    let ws = Workspace::new();
    ws.reference_model("auths.py", AUTHS_REFERENCE);
    ws.client_model("auths.py", AUTHS_REFERENCE);
    ws.reference_router("tools.py", TOOLS_ROUTER);
    ws.client_router("tools.py", TOOLS_CLIENT);

    let report = scan(&ws.config).unwrap();
    assert!(report.is_clean(), "{report}");
    assert_eq!(report.to_string(), "No drift detected in implemented files.");
}

#[test]
fn models_are_reported_before_routers() {
    let ws = Workspace::new();
    ws.reference_model("b.py", "class B(BaseModel):\n    x: int\n");
    ws.client_model("b.py", "class B:\n    y: int\n");
    ws.reference_router(
        "a.py",
        "@router.delete(\"/{id}/delete\")\nasync def delete(id: str):\n    ...\n",
    );
    ws.client_router("a.py", "class AClient:\n    pass\n");

    let report = scan(&ws.config).unwrap();
    let kinds: Vec<_> = report.issues.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![IssueKind::MissingFields, IssueKind::MissingEndpoint]);
    assert_eq!(report.count(IssueKind::MissingEndpoint), 1);
}

#[test]
fn into_result_carries_the_report() {
    let ws = Workspace::new();
    ws.reference_model("auths.py", AUTHS_REFERENCE);
    ws.client_model("auths.py", "class Token(BaseModel):\n    token: str\n");

    match scan(&ws.config).unwrap().into_result() {
        Err(DriftError::Drift(report)) => {
            assert_eq!(report.len(), 1);
            assert!(report.to_string().starts_with("Found 1 drift issues:"));
        }
        other => panic!("expected drift, got {other:?}"),
    }
}
