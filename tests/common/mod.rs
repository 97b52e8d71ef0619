//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use firewall_sync::gateway::{
    FirewallGateway, GatewayError, GatewayResult, RemoteRule, RuleAction,
};

/// Start a canned HTTP API on an ephemeral port.
///
/// The responder receives the request head (request line plus headers)
/// and returns a status code and JSON body for it.
#[allow(dead_code)]
pub async fn start_canned_api<F>(respond: F) -> SocketAddr
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let respond = respond.clone();
                    tokio::spawn(async move {
                        let head = read_request(&mut socket).await;
                        let (status, body) = respond(&head);
                        let reason = match status {
                            200 => "OK",
                            400 => "Bad Request",
                            401 => "Unauthorized",
                            403 => "Forbidden",
                            _ => "Error",
                        };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read the request head, draining any declared body so the client can
/// finish writing before we respond.
#[allow(dead_code)]
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();

    let content_length = head
        .lines()
        .filter_map(|line| {
            line.to_ascii_lowercase()
                .strip_prefix("content-length:")
                .and_then(|v| v.trim().parse::<usize>().ok())
        })
        .next()
        .unwrap_or(0);

    let mut remaining = content_length.saturating_sub(buf.len() - header_end);
    while remaining > 0 {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        remaining = remaining.saturating_sub(n);
    }

    head
}

/// One recorded mutation issued through the mock gateway.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create {
        expression: String,
        action: RuleAction,
        description: String,
        priority: u32,
    },
    Update {
        rule_id: String,
        filter_id: String,
        expression: String,
        action: RuleAction,
        description: String,
        priority: u32,
    },
}

/// In-process gateway double: serves a rule list, records mutations, and
/// can be told to reject the nth mutation the way the remote would.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MockGateway {
    rules: Mutex<Vec<RemoteRule>>,
    calls: Mutex<Vec<Call>>,
    fail_on_mutation: Option<usize>,
}

#[allow(dead_code)]
impl MockGateway {
    pub fn with_rules(rules: Vec<RemoteRule>) -> Self {
        Self {
            rules: Mutex::new(rules),
            ..Self::default()
        }
    }

    /// Make the zero-based nth mutation fail with a validation rejection.
    pub fn failing_on(mut self, nth: usize) -> Self {
        self.fail_on_mutation = Some(nth);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn rules(&self) -> Vec<RemoteRule> {
        self.rules.lock().unwrap().clone()
    }

    fn check_failure(&self, nth: usize) -> GatewayResult<()> {
        if self.fail_on_mutation == Some(nth) {
            return Err(GatewayError::Validation(
                r#"{"success":false,"errors":[{"code":10014,"message":"filter expression is invalid"}]}"#
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl FirewallGateway for MockGateway {
    async fn list(&self, _zone_id: &str) -> GatewayResult<Vec<RemoteRule>> {
        Ok(self.rules())
    }

    async fn create(
        &self,
        _zone_id: &str,
        expression: &str,
        action: RuleAction,
        description: &str,
        priority: u32,
    ) -> GatewayResult<RemoteRule> {
        let nth = self.calls.lock().unwrap().len();
        self.calls.lock().unwrap().push(Call::Create {
            expression: expression.to_string(),
            action,
            description: description.to_string(),
            priority,
        });
        self.check_failure(nth)?;

        let rule = RemoteRule {
            id: format!("rule-{}", nth),
            filter_id: format!("filter-{}", nth),
            description: description.to_string(),
            expression: expression.to_string(),
        };
        self.rules.lock().unwrap().push(rule.clone());
        Ok(rule)
    }

    async fn update(
        &self,
        _zone_id: &str,
        rule_id: &str,
        filter_id: &str,
        expression: &str,
        action: RuleAction,
        description: &str,
        priority: u32,
    ) -> GatewayResult<RemoteRule> {
        let nth = self.calls.lock().unwrap().len();
        self.calls.lock().unwrap().push(Call::Update {
            rule_id: rule_id.to_string(),
            filter_id: filter_id.to_string(),
            expression: expression.to_string(),
            action,
            description: description.to_string(),
            priority,
        });
        self.check_failure(nth)?;

        let updated = RemoteRule {
            id: rule_id.to_string(),
            filter_id: filter_id.to_string(),
            description: description.to_string(),
            expression: expression.to_string(),
        };
        let mut rules = self.rules.lock().unwrap();
        if let Some(slot) = rules.iter_mut().find(|r| r.id == rule_id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }
}
