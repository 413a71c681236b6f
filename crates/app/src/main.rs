use anyhow::Context;
use myfit_app::config::AppConfig;
use myfit_app::shell::Shell;
use myfit_auth::Session;
use myfit_client::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    myfit_observability::init(config.log_format);

    tracing::info!(base_url = %config.client.base_url, "starting");

    let session = Session::in_memory();
    let client = ApiClient::new(&config.client, session.clone()).context("building http client")?;

    Shell::new(client, session).run().await
}
