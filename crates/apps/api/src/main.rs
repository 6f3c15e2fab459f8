use app_state::load_app_settings;
use color_eyre::Result;
use gallery_api::serve;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = load_app_settings()?;

    let level = &settings.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "gallery_api={level},common_services={level},app_state={level},tower_http=debug"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        data_root = %settings.storage.data_root.display(),
        address = %settings.api.address,
        "Loaded settings"
    );

    serve(settings).await?;

    Ok(())
}
