use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub sheet: SheetSettings,
    pub poller: PollerSettings,
    pub preferences_path: String,
    pub accounts: Vec<AccountSettings>,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct SheetSettings {
    /// Public export url of the shared sheet. When absent the service
    /// serves the built-in mock prospect set.
    pub export_url: Option<String>,
    /// The header-inclusive export variant carries column names in row 0.
    pub skip_header: bool,
}

#[derive(serde::Deserialize, Clone)]
pub struct PollerSettings {
    pub mode: PollerMode,
    /// Expected latency of the external automation before the first fetch.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub initial_delay_ms: u64,
    /// When set, a single background refresh fires this long after the
    /// initial fetch started.
    pub refresh_delay_ms: Option<u64>,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PollerMode {
    Replace,
    Accumulate,
}

/// One entry per account: who may log in, which automation webhook their
/// outreach requests go to and which sheet the automation fills for them.
#[derive(serde::Deserialize, Clone)]
pub struct AccountSettings {
    pub email: String,
    pub password: String,
    pub webhook_url: String,
    pub sheet_name: String,
}

impl Settings {
    pub fn account(&self, email: &str) -> Option<&AccountSettings> {
        self.accounts.iter().find(|a| a.email == email)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
