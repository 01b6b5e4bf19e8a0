use clap::Parser;

/// How the server talks to its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// HTTP: unary JSON-RPC plus SSE sessions.
    Sse,
    /// Newline-delimited JSON-RPC over stdin/stdout.
    Stdio,
}

impl Transport {
    /// Anything other than `stdio` selects the HTTP transport.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "stdio" => Self::Stdio,
            "sse" => Self::Sse,
            other => {
                tracing::warn!("Unknown transport '{other}', using sse");
                Self::Sse
            }
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "foundry-server", about = "MCP server for semiconductor foundry knowledge tools")]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "FOUNDRY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP listener.
    #[arg(long, env = "FOUNDRY_PORT", default_value_t = 8000)]
    pub port: u16,

    /// `sse` or `stdio`.
    #[arg(long, env = "MCP_TRANSPORT", default_value = "sse")]
    pub transport: String,

    /// Outbound queue depth per streaming session.
    #[arg(long, env = "FOUNDRY_SESSION_BUFFER", default_value_t = 64)]
    pub session_buffer: usize,
}

impl ServerConfig {
    #[must_use]
    pub fn transport(&self) -> Transport {
        Transport::from_name(&self.transport)
    }

    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "foundry-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--transport",
            "stdio",
            "--session-buffer",
            "4",
        ])
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.transport(), Transport::Stdio);
        assert_eq!(config.session_buffer, 4);
    }

    #[test]
    fn transport_names() {
        assert_eq!(Transport::from_name("stdio"), Transport::Stdio);
        assert_eq!(Transport::from_name(" STDIO "), Transport::Stdio);
        assert_eq!(Transport::from_name("sse"), Transport::Sse);
        assert_eq!(Transport::from_name("websocket"), Transport::Sse);
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(ServerConfig::try_parse_from(["foundry-server", "--port", "http"]).is_err());
    }
}
