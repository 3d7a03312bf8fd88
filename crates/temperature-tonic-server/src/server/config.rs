use anyhow::{Context, bail};
use clap::Parser;
use core::time::Duration;
use std::path::PathBuf;
use tonic::transport::{Identity, ServerTlsConfig};

/// Runtime configuration for the `temperature-tonic-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "temperature-tonic-server",
    version,
    about = "A gRPC service converting temperatures between Fahrenheit and Celsius"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix
    /// socket).
    ///
    /// Example: "localhost:50051", "0.0.0.0:50051" or "/tmp/temperature.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("localhost:50051"))]
    pub server_addr: String,

    /// Listen on all interfaces at this port. Overrides `--server-addr`.
    ///
    /// Environment variable: `PORT`
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a
    /// file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// PEM encoded certificate chain. Enables TLS together with `--tls-key`.
    ///
    /// Environment variable: `TLS_CERT`
    #[arg(long, env = "TLS_CERT")]
    pub tls_cert: Option<PathBuf>,

    /// PEM encoded private key matching `--tls-cert`.
    ///
    /// Environment variable: `TLS_KEY`
    #[arg(long, env = "TLS_KEY")]
    pub tls_key: Option<PathBuf>,

    /// Milliseconds to keep accepting calls after a shutdown signal while the
    /// health check already reports `NOT_SERVING`. Gives load balancers time
    /// to stop routing traffic before connections close.
    ///
    /// Environment variable: `SHUTDOWN_GRACE_MS`
    #[arg(long, env = "SHUTDOWN_GRACE_MS", default_value_t = 0)]
    pub shutdown_grace_ms: u64,
}

/// Certificate and key locations for serving over TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl TlsFiles {
    /// Reads both PEM files and builds the tonic TLS configuration.
    pub async fn load(&self) -> anyhow::Result<ServerTlsConfig> {
        let cert = tokio::fs::read(&self.cert)
            .await
            .with_context(|| format!("failed to read TLS certificate {}", self.cert.display()))?;
        let key = tokio::fs::read(&self.key)
            .await
            .with_context(|| format!("failed to read TLS key {}", self.key.display()))?;
        Ok(ServerTlsConfig::new().identity(Identity::from_pem(cert, key)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub tls: Option<TlsFiles>,
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_addr: String::from("localhost:50051"),
            uds: false,
            tls: None,
            shutdown_grace: Duration::ZERO,
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let server_addr = match args.port {
            Some(_) if args.uds => bail!("--port cannot be combined with --uds"),
            Some(port) => format!("0.0.0.0:{port}"),
            None => args.server_addr,
        };

        if server_addr.trim().is_empty() {
            bail!("server address must not be empty");
        }

        let tls = match (args.tls_cert, args.tls_key) {
            (Some(cert), Some(key)) => Some(TlsFiles { cert, key }),
            (None, None) => None,
            _ => bail!("--tls-cert and --tls-key must be provided together"),
        };

        Ok(Self {
            server_addr,
            uds: args.uds,
            tls,
            shutdown_grace: Duration::from_millis(args.shutdown_grace_ms),
        })
    }
}
