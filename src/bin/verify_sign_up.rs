use makersbnb::configuration::get_config;
use makersbnb::telemetry::{get_subscriber, init_subscriber};
use makersbnb::verifier::SignUpFlowVerifier;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("verify-sign-up".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_config()?;
    let verifier = SignUpFlowVerifier::from_settings(&configuration.verifier)?;

    match verifier.verify().await {
        Ok(page) => {
            tracing::info!(title = %page.title, "The sign up flow behaves as expected");
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "The sign up flow verification failed"
            );
            Err(e.into())
        }
    }
}
