use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use platform_services::{config, gateway, handler, logging, notifier};
use std::io::{self, Read};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = config::HandlerConfig::from_env()?;
    tracing::info!(table = %config.table_name, "starting");

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = Client::new(&sdk_config);
    let handler = handler::Handler::new(
        gateway::DynamoGateway::new(client, config.table_name),
        notifier::TracingNotifier,
        config.admin_users,
        config.updatable_fields,
    );

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let outcome = match serde_json::from_str::<handler::Request>(&input) {
        Ok(request) => handler.handle(request).await,
        Err(err) => {
            tracing::error!(%err, "request could not be decoded");
            Err(handler::Failure {
                kind: handler::ErrorKind::BadRequest,
                message: "request could not be decoded".to_string(),
                cause: None,
            })
        }
    };
    println!("{}", handler::render(&outcome)?);
    Ok(())
}
