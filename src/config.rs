use std::path::PathBuf;

/// Runtime configuration, validated at startup and injected into the
/// service state. The auth token lives here rather than in a module
/// global so tests and deployments can swap it freely.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_dir: String,
    pub auth_token: String,
    pub auth_enabled: bool,
    pub tls: Option<TlsConfig>,
}

/// Certificate/key pair for in-process TLS termination. Provisioning
/// and rotation of the material itself is out of scope; the paths are
/// only consumed at startup.
#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}
