//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use regru_dns::{
    DnsProvider, HttpRequest, HttpResponse, ListDnsRecordsParams, RegruClient, RegruError,
    Result, Transport,
};
use serde_json::Value;

/// Base URL the mock client is built with.
pub const MOCK_BASE_URL: &str = "https://mock.regru.test/api/regru2";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ Mock transport ============

enum Reply {
    Response(HttpResponse),
    Hang,
}

/// Transport double: records every request and replays queued replies in
/// order. An exhausted queue answers with a `NetworkError`.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a response with `status` and `body`.
    pub fn reply(&self, status: u16, body: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(HttpResponse::new(status, body)));
        self
    }

    /// Queues a 200 response whose body is `json`.
    pub fn reply_json(&self, json: &Value) -> &Self {
        self.reply(200, json.to_string())
    }

    /// Queues a reply that never arrives.
    pub fn hang(&self) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Hang);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Method paths of the recorded requests, in order.
    pub fn paths(&self) -> Vec<String> {
        self.requests().iter().map(path_of).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(RegruError::NetworkError {
                detail: "no mock reply queued".to_string(),
            }),
        }
    }
}

/// Client wired to `transport`.
pub fn mock_client(transport: &Arc<MockTransport>) -> RegruClient {
    RegruClient::builder("test", "test")
        .base_url(MOCK_BASE_URL)
        .timeout(Duration::from_secs(5))
        .transport(transport.clone())
        .build()
        .unwrap()
}

// ============ Request inspection ============

/// Method path of `request`, relative to the base URL.
pub fn path_of(request: &HttpRequest) -> String {
    request
        .url
        .strip_prefix(MOCK_BASE_URL)
        .unwrap_or(&request.url)
        .trim_start_matches('/')
        .to_string()
}

/// Decoded form fields of `request`.
pub fn form_fields(request: &HttpRequest) -> Vec<(String, String)> {
    request
        .body
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            (
                urlencoding::decode(k).unwrap().into_owned(),
                urlencoding::decode(v).unwrap().into_owned(),
            )
        })
        .collect()
}

/// Value of form field `key`.
pub fn form_field(request: &HttpRequest, key: &str) -> Option<String> {
    form_fields(request)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Parsed `input_data` JSON of `request`.
pub fn input_data(request: &HttpRequest) -> Value {
    let raw = form_field(request, "input_data").unwrap();
    serde_json::from_str(&raw).unwrap()
}

// ============ Live context ============

/// 测试上下文 - 封装 Client 和测试域名
pub struct TestContext {
    pub client: RegruClient,
    pub domain: String,
}

impl TestContext {
    /// 从环境变量创建测试上下文
    pub fn from_env() -> Option<Self> {
        let domain = env::var("TEST_DOMAIN").ok()?;
        let client = RegruClient::from_env().ok()?;
        Some(Self { client, domain })
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self) {
        let params = ListDnsRecordsParams::for_zone(&self.domain);
        if let Ok(records) = self.client.list_records(&params).await {
            for record in records {
                if record.name.starts_with("_test-") {
                    let _ = self.client.delete_record(&self.domain, &record).await;
                }
            }
        }
    }
}
