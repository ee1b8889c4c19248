use clap::Subcommand;

use offhours_core::Settings;

use super::CliError;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings
    Show,
    /// Update endpoint settings
    Set {
        /// Base URL of the management endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// API version sent with every request
        #[arg(long)]
        api_version: Option<String>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load_or_default()?;
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        ConfigAction::Set { endpoint, api_version } => {
            if endpoint.is_none() && api_version.is_none() {
                return Err("nothing to set; pass --endpoint and/or --api-version".into());
            }
            let mut settings = Settings::load_or_default()?;
            if let Some(endpoint) = endpoint {
                settings.endpoint = endpoint;
                settings.endpoint_url()?; // reject unparseable urls before saving
            }
            if let Some(api_version) = api_version {
                settings.api_version = api_version;
            }
            settings.save()?;
            println!("settings updated");
        }
    }
    Ok(())
}
