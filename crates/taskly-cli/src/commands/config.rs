use clap::Subcommand;
use taskly_core::config::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML
    Show,
    /// Set the recurrence interval in seconds
    SetFrequency { secs: u64 },
    /// Set the reminder notification title
    SetTitle { title: String },
    /// Print the config file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetFrequency { secs } => {
            let mut config = Config::load()?;
            config.countdown.frequency_secs = secs;
            config.save()?;
            println!("frequency_secs = {secs}");
        }
        ConfigAction::SetTitle { title } => {
            let mut config = Config::load()?;
            config.countdown.title = title.clone();
            config.save()?;
            println!("title = {title:?}");
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
