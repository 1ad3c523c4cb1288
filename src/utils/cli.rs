use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Listening host
    #[arg(long, env = "SENTINEL_HOST", default_value = "0.0.0.0")]
    pub(crate) host: String,

    /// Listening port
    #[arg(short, long, env = "SENTINEL_PORT", default_value_t = 8000)]
    pub(crate) port: u16,

    /// Directory the uploaded images are stored in
    #[arg(
        short,
        long,
        env = "SENTINEL_STORAGE_DIR",
        default_value = "/tmp/sentinel_images"
    )]
    pub(crate) storage_dir: String,

    /// Shared secret the capture agent presents in X-Auth-Token
    #[arg(long, env = "SENTINEL_TOKEN", default_value = "dev-token-change-me")]
    pub(crate) auth_token: String,

    /// Accept uploads without a token (trusted-network deployments)
    #[arg(long, env = "SENTINEL_DISABLE_AUTH", default_value_t = false)]
    pub(crate) disable_auth: bool,

    /// TLS certificate chain, PEM; terminates TLS in-process when set
    #[arg(long, env = "SENTINEL_TLS_CERT")]
    pub(crate) tls_cert: Option<PathBuf>,

    /// TLS private key, PEM; required together with --tls-cert
    #[arg(long, env = "SENTINEL_TLS_KEY")]
    pub(crate) tls_key: Option<PathBuf>,
}
