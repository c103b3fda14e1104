use serde::{Deserialize, Serialize};

/// ```rust,ignore
/// // Connect to a controller by hostname or IP address
/// let config = TnyDriverConfig::new("tny360.local".to_string(), 5621, 1000);
/// let config = TnyDriverConfig::new("192.168.4.1".to_string(), 5621, 1000);
///
/// if let Err(e) = config.validate() {
///     println!("Configuration error: {}", e);
///     return;
/// }
///
/// let driver = TnyDriver::connect(config).await?;
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TnyDriverConfig {
    pub addr: String,
    pub port: u16,
    /// How long a sent command may wait for its response before the driver
    /// gives up on it. The protocol itself has no timeout; a request whose
    /// reply never comes would otherwise stay pending forever.
    pub timeout_ms: u64,
}

impl TnyDriverConfig {
    pub fn new(addr: String, port: u16, timeout_ms: u64) -> Self {
        Self {
            addr,
            port,
            timeout_ms,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.addr.is_empty() {
            return Err("Address cannot be empty.".to_string());
        }
        if self.port == 0 {
            return Err("Port number must be greater than 0.".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Response timeout must be greater than 0.".to_string());
        }
        Ok(())
    }

    /// WebSocket URL of the controller's command endpoint. The protocol uses
    /// no path, query or sub-protocol.
    pub fn connection_url(&self) -> String {
        format!("ws://{}:{}", self.addr, self.port)
    }
}

impl Default for TnyDriverConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1".to_string(),
            // Fixed control port of the TNY360 firmware.
            port: 5621,
            timeout_ms: 1_000,
        }
    }
}
