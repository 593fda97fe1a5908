use std::sync::Arc;
use std::time::Duration;

use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    database_interface::DatabaseInterface, http::create_app, local_bookings::LocalBookings,
    notification::LogNotifier,
};
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod configuration;
mod configuration_handler;
mod database_interface;
mod error;
mod http;
mod local_bookings;
mod notification;
mod pricing;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#######################");
    println!("# Detailing Scheduler #");
    println!("#######################");

    let configuration = ConfigurationHandler::parse_arguments();
    let notifier = Arc::new(LogNotifier);

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Listening on:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(database_url) = configuration.database_url() {
        let backend = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(backend) => {
                    info!("Successfully connected to database");
                    break backend;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart it with database disabled (impersistent bookings).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(backend, configuration, notifier)
    } else {
        let backend = LocalBookings::default();
        backend.insert_example_catalog();
        create_app(backend, configuration, notifier)
    };

    axum::serve(listener, app).await.unwrap();
}
