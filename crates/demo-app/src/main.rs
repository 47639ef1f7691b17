use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod scenes;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Scene selection via DEMO_SCENE or --scene=<name>
    let scene_env = std::env::var("DEMO_SCENE").ok();
    let picked = |name: &str| {
        scene_env.as_deref() == Some(name)
            || std::env::args().any(|a| a == format!("--scene={name}"))
    };

    if picked("stagger") {
        scenes::stagger::run()
    } else if picked("spec") {
        scenes::spec_driven::run()
    } else {
        scenes::entrance::run()
    }
}
