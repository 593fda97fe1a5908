use crate::configuration::Configuration;
use chrono::NaiveTime;
use clap::Parser;

fn parse_hhmm(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, crate::types::hhmm::FORMAT)
        .map_err(|err| format!("expected HH:MM, got {value:?}: {err}"))
}

#[derive(Debug, Clone, Parser)]
#[command(about = "Appointment scheduling service for a car detailing business")]
pub struct ConfigurationHandler {
    #[arg(long, default_value = "3000")]
    port: String,

    /// Shared secret admins send in the x-admin-password header.
    /// Falls back to the ADMIN_PASSWORD environment variable.
    #[arg(long)]
    password: Option<String>,

    /// PostgreSQL connection URL. Without it the service keeps all
    /// bookings in memory (falls back to the DATABASE_URL environment
    /// variable).
    #[arg(long)]
    database_url: Option<String>,

    #[arg(long, default_value = "09:00", value_parser = parse_hhmm)]
    opening_time: NaiveTime,

    #[arg(long, default_value = "17:00", value_parser = parse_hhmm)]
    closing_time: NaiveTime,

    #[arg(long, default_value = "30")]
    slot_minutes: u32,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn password(&self) -> String {
        self.password
            .clone()
            .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
            .unwrap_or_else(|| "123".into())
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }

    fn opening_time(&self) -> NaiveTime {
        self.opening_time
    }

    fn closing_time(&self) -> NaiveTime {
        self.closing_time
    }

    fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }
}
