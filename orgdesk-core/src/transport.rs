//! Transport to the event backend.
//!
//! Commands are sent as a JSON `Request` envelope over HTTP POST and the
//! typed response is recovered from the tagged `Response` envelope.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use url::Url;

use crate::config::OrgDeskConfig;
use crate::error::{OrgDeskError, OrgDeskResult};
use crate::protocol::{BackendCommand, Command, Request, Response};

/// Anything that can carry a typed backend command and return its response.
pub trait Transport {
    /// The response type is inferred from the command's associated type,
    /// so callers never deserialize by hand.
    fn call<C: BackendCommand>(&self, cmd: C) -> impl Future<Output = OrgDeskResult<C::Response>>;
}

/// Talks to the backend's `/api` endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &OrgDeskConfig) -> OrgDeskResult<Self> {
        let base = Url::parse(&config.server_url).map_err(|e| {
            OrgDeskError::Config(format!("Invalid server_url '{}': {}", config.server_url, e))
        })?;
        let endpoint = base
            .join("api")
            .map_err(|e| OrgDeskError::Config(e.to_string()))?;

        Ok(HttpTransport {
            http: reqwest::Client::new(),
            endpoint,
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Low-level call that posts a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> OrgDeskResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| OrgDeskError::Serialization(e.to_string()))?;
        let request = Request { command, params };

        tracing::debug!(?command, endpoint = %self.endpoint, "sending backend request");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| OrgDeskError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| OrgDeskError::Network(e.to_string()))?;

        // Error envelopes may come back with a non-2xx status; prefer their message.
        match serde_json::from_str::<Response<R>>(&body) {
            Ok(Response::Success { data }) if status.is_success() => Ok(data),
            Ok(Response::Success { .. }) => Err(OrgDeskError::Network(format!(
                "Backend answered {status} with a success envelope"
            ))),
            Ok(Response::Error { error }) => Err(OrgDeskError::Backend(error)),
            Err(_) if !status.is_success() => {
                Err(OrgDeskError::Network(format!("Backend answered {status}")))
            }
            Err(e) => Err(OrgDeskError::Serialization(format!(
                "Failed to parse response: {e}"
            ))),
        }
    }
}

impl Transport for HttpTransport {
    async fn call<C: BackendCommand>(&self, cmd: C) -> OrgDeskResult<C::Response> {
        timeout(self.timeout, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| OrgDeskError::Timeout(self.timeout.as_secs()))?
    }
}


#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;
    use crate::protocol::EventsByBranchRep;

    fn config_for(addr: std::net::SocketAddr) -> OrgDeskConfig {
        OrgDeskConfig {
            server_url: format!("http://{addr}/"),
            request_timeout_secs: 1,
            ..OrgDeskConfig::default()
        }
    }

    fn events_query() -> EventsByBranchRep {
        EventsByBranchRep {
            branch_rep_id: "42".into(),
        }
    }

    /// Read one HTTP request and return its body.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(split) = text.find("\r\n\r\n") {
                let length = text[..split]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= split + 4 + length {
                    return String::from_utf8_lossy(&buf[split + 4..split + 4 + length]).into_owned();
                }
            }
        }
        String::new()
    }

    /// Answer a single request with `status` and `body`, returning what was posted.
    async fn serve_once(status: &'static str, body: &'static str) -> (OrgDeskConfig, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = config_for(listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (config, server)
    }

    #[tokio::test]
    async fn success_envelope_yields_data() {
        let (config, server) = serve_once("200 OK", r#"{"status":"success","data":[]}"#).await;
        let transport = HttpTransport::new(&config).unwrap();

        let events = transport.call(events_query()).await.unwrap();
        assert!(events.is_empty());

        let posted: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(posted["command"], "events_by_branch_rep");
        assert_eq!(posted["params"]["branch_rep_id"], "42");
    }

    #[tokio::test]
    async fn error_envelope_is_a_backend_error_even_on_5xx() {
        let (config, _server) =
            serve_once("500 Internal Server Error", r#"{"status":"error","error":"branch rep unknown"}"#)
                .await;
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport.call(events_query()).await.unwrap_err();
        assert!(matches!(err, OrgDeskError::Backend(ref m) if m == "branch rep unknown"));
    }

    #[tokio::test]
    async fn unparsable_non_2xx_is_a_network_error() {
        let (config, _server) = serve_once("502 Bad Gateway", "<html>upstream down</html>").await;
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport.call(events_query()).await.unwrap_err();
        assert!(matches!(err, OrgDeskError::Network(ref m) if m.contains("502")));
    }

    #[tokio::test]
    async fn unparsable_2xx_is_a_serialization_error() {
        let (config, _server) = serve_once("200 OK", "not json").await;
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport.call(events_query()).await.unwrap_err();
        assert!(matches!(err, OrgDeskError::Serialization(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = config_for(listener.local_addr().unwrap());
        drop(listener);
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport.call(events_query()).await.unwrap_err();
        assert!(matches!(err, OrgDeskError::Network(_)));
    }

    #[tokio::test]
    async fn silent_backend_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = config_for(listener.local_addr().unwrap());

        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport.call(events_query()).await.unwrap_err();
        assert!(matches!(err, OrgDeskError::Timeout(1)));
    }

    #[test]
    fn endpoint_is_joined_onto_server_url() {
        let config = OrgDeskConfig {
            server_url: "https://events.example.org/".into(),
            ..OrgDeskConfig::default()
        };

        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.endpoint().as_str(), "https://events.example.org/api");
    }

    #[test]
    fn invalid_server_url_is_a_config_error() {
        let config = OrgDeskConfig {
            server_url: "not a url".into(),
            ..OrgDeskConfig::default()
        };

        assert!(matches!(
            HttpTransport::new(&config),
            Err(OrgDeskError::Config(_))
        ));
    }
}
