use anyhow::Result;
use huddle_core::constants::{EVENTS_KEY, SETTINGS_KEY};

use crate::app::App;
use crate::config::HuddleConfig;

pub fn run(app: &App) -> Result<()> {
    let theme = app.theme();
    let config_path = HuddleConfig::config_path()?;
    let storage = app.events.storage();

    println!("{}", theme.heading("Paths"));
    println!("  Config:    {}", config_path.display());
    println!("  Events:    {}", storage.path_for(EVENTS_KEY).display());
    println!("  Settings:  {}", storage.path_for(SETTINGS_KEY).display());

    println!();
    println!("{}", theme.heading("Effective config"));
    for line in toml::to_string_pretty(&app.config)?.lines() {
        println!("  {}", line);
    }
    println!("  {} {}", theme.muted("# time zone in use:"), app.session.tz.name());

    Ok(())
}
