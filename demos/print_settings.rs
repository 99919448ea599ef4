use craft_config::{AppContext, Config, ProcessEnv};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), craft_config::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let ctx = AppContext::builder()
        .with_settings(
            Config::builder()
                .with_environment(ProcessEnv)
                .with_file("demos/general.toml", false)
                .build()?,
        )
        .build()?;

    for (name, value) in ctx.settings().to_map() {
        println!("{name} = {value}");
    }

    Ok(())
}
