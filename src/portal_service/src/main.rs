use color_eyre::eyre::Result;
use portal_adapters::{
    HttpIdentityProvider, HttpRegistrationEndpoint, PortalContext, config::PortalSettings,
};
use portal_service::{PortalService, tracing::init_tracing};
use reqwest::Client as HttpClient;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = PortalSettings::load()?;

    let identity_client = HttpClient::builder()
        .timeout(settings.identity_provider.timeout())
        .build()?;
    let provider = HttpIdentityProvider::new(
        settings.identity_provider.base_url.clone(),
        settings.identity_provider.api_key.clone(),
        settings.identity_provider.provider.clone(),
        settings.identity_provider.redirect_url.clone(),
        settings.identity_provider.poll_interval(),
        identity_client,
    );

    let registration_client = HttpClient::builder()
        .timeout(settings.registration.timeout())
        .build()?;
    let endpoint =
        HttpRegistrationEndpoint::new(settings.registration.url.clone(), registration_client);

    let context = PortalContext::new(provider, endpoint, &settings);
    let service = PortalService::new(context, settings.app.assets_dir.clone());

    let listener = TcpListener::bind(settings.app.address.as_str()).await?;
    tracing::info!(
        domain = %settings.gate.institutional_domain.suffix(),
        "Starting student portal..."
    );

    service.run_standalone(listener).await?;

    Ok(())
}
