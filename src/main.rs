use makersbnb::configuration::get_config;
use makersbnb::startup::Application;
use makersbnb::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("makersbnb".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_config()?;
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await
}
