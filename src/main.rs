//! Particle backdrop in a native window.
//!
//! Run with: `cargo run --release [config.json]`
//!
//! Set `RUST_LOG=plexus=debug` to see periodic frame stats.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), plexus::SimulationError> {
    use plexus::{FieldConfig, Simulation};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "loading config");
            FieldConfig::load(path)?
        }
        None => FieldConfig::default(),
    };

    Simulation::new().with_config(config).run()
}

// The web build is driven from JavaScript through `plexus::web::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
