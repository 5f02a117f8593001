//! Server configuration.

/// Default number of envelopes buffered per connection before sends fail.
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 64;

/// Runtime configuration of the relay server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to (0 picks an ephemeral port)
    pub port: u16,
    /// Capacity of each connection's outbound queue (at least 1)
    pub outbound_capacity: usize,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, outbound_capacity: usize) -> Self {
        Self {
            host: host.into(),
            port,
            outbound_capacity: outbound_capacity.max(1),
        }
    }

    /// `host:port` string passed to the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080, DEFAULT_OUTBOUND_CAPACITY)
    }
}
