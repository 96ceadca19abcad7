//! Process configuration.
//!
//! The service's two knobs: where to listen and which backend to run.
//! Values come from the environment (`PORT`, `DATA_DIR`) with command line
//! flags (`--port`, `--data-dir`) taking precedence; the binary seeds the
//! environment from a `.env` file before reading it. No data directory
//! means the transient in-memory backend.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Port used when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Directory for the durable backend; `None` selects the in-memory one.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Resolves configuration from process arguments layered over the
    /// environment.
    pub fn load(args: &[String]) -> Result<Self> {
        let env_port = std::env::var("PORT").ok();
        let env_data_dir = std::env::var("DATA_DIR").ok();
        Self::resolve(args, env_port.as_deref(), env_data_dir.as_deref())
    }

    fn resolve(
        args: &[String],
        env_port: Option<&str>,
        env_data_dir: Option<&str>,
    ) -> Result<Self> {
        let mut port = match env_port {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value {:?}", raw))?,
            None => DEFAULT_PORT,
        };
        let mut data_dir = env_data_dir.map(PathBuf::from);

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--port" => {
                    let raw = args.get(i + 1).context("--port requires a value")?;
                    port = raw
                        .parse::<u16>()
                        .with_context(|| format!("invalid port {:?}", raw))?;
                    i += 2;
                }
                "--data-dir" => {
                    let raw = args.get(i + 1).context("--data-dir requires a value")?;
                    data_dir = Some(PathBuf::from(raw));
                    i += 2;
                }
                other => bail!("unknown argument: {}", other),
            }
        }

        Ok(Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            data_dir,
        })
    }
}
