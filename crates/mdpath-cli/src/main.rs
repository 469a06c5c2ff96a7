use anyhow::Context;
use clap::Parser;
use mdpath::{Config, Resolver};
use std::time::Duration;

#[derive(Clone, Debug, Parser)]
#[command(name = "mdpath", version = env!("CARGO_PKG_VERSION"), about = "Print the path to the mongod executable", long_about = None)]
struct App {
    /// Desired MongoDB version, dotted-numeric (e.g. 3.6.4).
    /// Falls back to $MONGO_DATABASE_VERSION, then to whatever is found.
    #[arg(value_name = "VERSION")]
    version: Option<String>,

    /// Resolve on the current thread instead of the async runtime.
    #[arg(long)]
    blocking: bool,

    /// Per-subprocess timeout in seconds (async mode only).
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();

    let mut config = Config::from_env();
    if let Some(secs) = app.timeout {
        config = config.timeout(Duration::from_secs(secs));
    }
    let resolver = Resolver::new(config);
    let version = app.version.as_deref();

    let path = if app.blocking {
        resolver.resolve_blocking(version)
    } else {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("cannot start async runtime")?
            .block_on(resolver.resolve(version))
    }?;

    println!("{}", path.display());
    Ok(())
}
