//! `AnchorClient` tests against an in-memory transport.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use serde::{Deserialize, Serialize};
use webanchor::{
    AnchorClient, ApiGroup, ClientConfig, Endpoint, Error, FormContentSerializer, HttpClient,
    InvocationDescriptor, ListTag, Method, ParamDecl, ParamTag, Request, RequestFactory, Response,
    Result, Value, args,
};

/// Replays queued responses and records every request.
#[derive(Debug, Default)]
struct RecordingTransport {
    responses: Mutex<VecDeque<Result<Response>>>,
    requests: Mutex<Vec<Request>>,
}

impl RecordingTransport {
    fn respond(self, status: u16, body: &'static str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        self.responses
            .lock()
            .expect("lock")
            .push_back(Ok(Response::new(status, headers, body)));
        self
    }

    fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .expect("lock")
            .push_back(Err(Error::transport(message)));
        self
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("lock").clone()
    }
}

impl HttpClient for RecordingTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.requests.lock().expect("lock").push(request);
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport("no response queued")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Customer {
    id: u64,
    name: String,
}

fn customers() -> Arc<ApiGroup> {
    Arc::new(
        ApiGroup::new()
            .base_path("/api")
            .tag(ListTag::type_name_as_route("type")),
    )
}

#[tokio::test]
async fn get_decodes_json_body() {
    let transport = Arc::new(RecordingTransport::default().respond(200, r#"{"id":42,"name":"Ada"}"#));
    let client = AnchorClient::new(Arc::clone(&transport), "https://crm.example.com/").expect("client");

    let get = Arc::new(
        Endpoint::get("/customers/{id}")
            .param(ParamDecl::typed::<u64>("id"))
            .param(ParamDecl::new("expand")),
    );
    let invocation = InvocationDescriptor::new(&customers(), &get, args![42_u64, vec!["orders", "notes"]])
        .expect("invocation");

    let customer: Customer = client.call(&invocation).await.expect("call");
    check!(customer == Customer { id: 42, name: "Ada".to_string() });

    let requests = transport.requests();
    let_assert!([request] = requests.as_slice());
    check!(request.method() == Method::Get);
    check!(
        request.url().as_str()
            == "https://crm.example.com/api/customers/42?expand=orders&expand=notes"
    );
    check!(request.header_value("Accept") == Some("application/json"));
    check!(request.header_value("User-Agent") == Some(webanchor::DEFAULT_USER_AGENT));
    check!(request.body_bytes().is_none());
}

#[tokio::test]
async fn post_sends_serialized_body_with_content_type() {
    let transport = Arc::new(RecordingTransport::default().respond(201, r#"{"id":7,"name":"Grace"}"#));
    let client = AnchorClient::new(Arc::clone(&transport), "https://crm.example.com").expect("client");

    let create = Arc::new(
        Endpoint::post("/{type}").param(ParamDecl::typed::<Customer>("customer").content()),
    );
    let body = Value::json(&Customer {
        id: 0,
        name: "Grace".to_string(),
    })
    .expect("json");
    let invocation = InvocationDescriptor::new(&customers(), &create, vec![body]).expect("invocation");

    let created: Customer = client.call(&invocation).await.expect("call");
    check!(created.id == 7);

    let requests = transport.requests();
    let_assert!([request] = requests.as_slice());
    check!(request.method() == Method::Post);
    check!(request.url().as_str() == "https://crm.example.com/api/Customer");
    check!(request.header_value("Content-Type") == Some("application/json"));
    let_assert!(Some(sent) = request.body_bytes());
    let sent: serde_json::Value = serde_json::from_slice(sent).expect("json body");
    check!(sent == serde_json::json!({"id": 0, "name": "Grace"}));
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
    let transport = RecordingTransport::default().respond(500, r#"{"error":"boom"}"#);
    let client = AnchorClient::new(transport, "https://crm.example.com").expect("client");

    let ping = Arc::new(Endpoint::get("/ping"));
    let invocation = InvocationDescriptor::new(&customers(), &ping, args![]).expect("invocation");

    let_assert!(Err(err) = client.send(&invocation).await);
    check!(err.status() == Some(500));
    check!(err.to_string() == "HTTP error 500: Internal Server Error");
    check!(err.body().map(|body| body.as_ref()) == Some(br#"{"error":"boom"}"#.as_slice()));
}

#[tokio::test]
async fn not_found_as_none() {
    let get = Arc::new(Endpoint::get("/customers/{id}").param(ParamDecl::new("id")));
    let invocation = InvocationDescriptor::new(&customers(), &get, args![404]).expect("invocation");

    let client = AnchorClient::new(
        RecordingTransport::default().respond(404, ""),
        "https://crm.example.com",
    )
    .expect("client");
    let missing: Option<Customer> = client.call_optional(&invocation).await.expect("optional");
    check!(missing.is_none());

    let client = AnchorClient::new(
        RecordingTransport::default().respond(404, ""),
        "https://crm.example.com",
    )
    .expect("client")
    .with_config(ClientConfig::builder().not_found_as_none(false).build());
    let result: Result<Option<Customer>> = client.call_optional(&invocation).await;
    let_assert!(Err(err) = result);
    check!(err.is_not_found());
}

#[tokio::test]
async fn configured_headers_are_sent() {
    let transport = Arc::new(RecordingTransport::default().respond(204, ""));
    let config = ClientConfig::builder()
        .user_agent("crm-sync/1.0")
        .default_header("X-Tenant", "acme")
        .build();
    let client = AnchorClient::new(Arc::clone(&transport), "https://crm.example.com/v2/")
        .expect("client")
        .with_config(config);

    let delete = Arc::new(Endpoint::delete("/customers/{id}").param(ParamDecl::new("id")));
    let invocation = InvocationDescriptor::new(&customers(), &delete, args![9]).expect("invocation");

    let () = client.call(&invocation).await.expect("no content");

    let requests = transport.requests();
    let_assert!([request] = requests.as_slice());
    check!(request.url().as_str() == "https://crm.example.com/v2/api/customers/9");
    check!(request.header_value("user-agent") == Some("crm-sync/1.0"));
    check!(request.header_value("x-tenant") == Some("acme"));
}

#[test]
fn default_headers_override_builtin_headers_in_any_case() {
    let config = ClientConfig::builder()
        .default_header("accept", "text/xml")
        .default_header("user-agent", "me/1")
        .build();
    let client = AnchorClient::new(RecordingTransport::default(), "https://crm.example.com")
        .expect("client")
        .with_config(config);

    let get = Arc::new(Endpoint::get("/customers"));
    let invocation = InvocationDescriptor::new(&customers(), &get, args![]).expect("invocation");
    let request = client.build_request(&invocation).expect("request");

    check!(request.header_map().len() == 2);
    check!(request.header_value("Accept") == Some("text/xml"));
    check!(request.header_value("User-Agent") == Some("me/1"));
}

#[tokio::test]
async fn custom_factory_serializes_forms() {
    #[derive(Serialize)]
    struct Login<'a> {
        user: &'a str,
    }

    let transport = Arc::new(RecordingTransport::default().respond(200, "true"));
    let client = AnchorClient::new(Arc::clone(&transport), "https://auth.example.com")
        .expect("client")
        .with_factory(RequestFactory::new(FormContentSerializer));

    let login = Arc::new(
        Endpoint::post("/login")
            .param(ParamDecl::new("form").content())
            .param(ParamDecl::new("redirect").tag(ParamTag::rename("next"))),
    );
    let form = Value::json(&Login { user: "ada l" }).expect("json");
    let invocation = InvocationDescriptor::new(&Arc::new(ApiGroup::new()), &login, vec![form, Value::from("/home")])
        .expect("invocation");

    let accepted: bool = client.call(&invocation).await.expect("call");
    check!(accepted);

    let requests = transport.requests();
    let_assert!([request] = requests.as_slice());
    check!(request.url().as_str() == "https://auth.example.com/login?next=%2Fhome");
    check!(request.header_value("Content-Type") == Some("application/x-www-form-urlencoded"));
    check!(request.body_bytes().map(|body| body.as_ref()) == Some(b"user=ada+l".as_slice()));
}

#[tokio::test]
async fn synthesis_errors_never_reach_the_transport() {
    let transport = Arc::new(RecordingTransport::default());
    let client = AnchorClient::new(Arc::clone(&transport), "https://crm.example.com").expect("client");

    let get = Arc::new(Endpoint::get("/customers/{id}").param(ParamDecl::new("id")));
    let invocation =
        InvocationDescriptor::new(&customers(), &get, args![None::<u64>]).expect("invocation");

    let result: Result<Customer> = client.call(&invocation).await;
    let_assert!(Err(Error::MissingRouteParameter { name, .. }) = result);
    check!(name == "id");
    check!(transport.requests().is_empty());
}

#[tokio::test]
async fn transport_and_decoding_errors_propagate() {
    let get = Arc::new(Endpoint::get("/customers"));
    let invocation = InvocationDescriptor::new(&customers(), &get, args![]).expect("invocation");

    let client = AnchorClient::new(
        RecordingTransport::default().fail("connection reset"),
        "https://crm.example.com",
    )
    .expect("client");
    let result: Result<Vec<Customer>> = client.call(&invocation).await;
    let_assert!(Err(Error::Transport(message)) = result);
    check!(message == "connection reset");

    let client = AnchorClient::new(
        RecordingTransport::default().respond(200, r#"[{"id":"x","name":"Ada"}]"#),
        "https://crm.example.com",
    )
    .expect("client");
    let result: Result<Vec<Customer>> = client.call(&invocation).await;
    let_assert!(Err(Error::JsonDeserialization { path, .. }) = result);
    check!(path == "[0].id");
}

#[test]
fn build_request_is_pure() {
    let client = AnchorClient::new(RecordingTransport::default(), "https://crm.example.com")
        .expect("client");
    let search = Arc::new(
        Endpoint::get("/customers")
            .param(ParamDecl::new("name"))
            .param(ParamDecl::new("page")),
    );
    let invocation =
        InvocationDescriptor::new(&customers(), &search, args!["a b", 2]).expect("invocation");

    let first = client.build_request(&invocation).expect("request");
    let second = client.build_request(&invocation).expect("request");
    check!(first == second);
    insta::assert_snapshot!(first.url().as_str(), @"https://crm.example.com/api/customers?name=a%20b&page=2");
    check!(client.inner().requests().is_empty());
}
