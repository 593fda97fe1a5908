use chrono::NaiveTime;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn password(&self) -> String;
    fn port(&self) -> String;
    fn database_url(&self) -> Option<String>;
    fn opening_time(&self) -> NaiveTime;
    fn closing_time(&self) -> NaiveTime;
    fn slot_minutes(&self) -> u32;
}
