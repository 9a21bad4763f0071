use anyhow::Result;
use huddle_core::constants::REMINDER_CHOICES;
use huddle_core::settings::DefaultView;

use crate::app::App;
use crate::render::pluralize;

#[derive(Default)]
pub struct SettingsChanges {
    pub dark_mode: Option<bool>,
    pub default_view: Option<String>,
    pub toggle_reminders: Vec<u32>,
    pub notifications: Option<bool>,
}

impl SettingsChanges {
    /// Check every change up front so a bad value saves nothing.
    /// Returns the parsed default view, if one was given.
    fn validate(&self) -> Result<Option<DefaultView>> {
        if self.toggle_reminders.contains(&0) {
            anyhow::bail!("Reminders must be at least 1 day before the event");
        }
        let view = self
            .default_view
            .as_deref()
            .map(str::parse::<DefaultView>)
            .transpose()?;
        Ok(view)
    }
}

pub fn run(app: &mut App, changes: SettingsChanges) -> Result<()> {
    let view = changes.validate()?;

    if let Some(enabled) = changes.dark_mode {
        app.settings.set_dark_mode(enabled);
    }
    if let Some(view) = view {
        app.settings.set_default_view(view);
    }
    for days in changes.toggle_reminders {
        app.settings.toggle_default_reminder(days)?;
    }
    if let Some(enabled) = changes.notifications {
        app.settings.set_notifications_enabled(enabled);
    }

    print_settings(app);
    Ok(())
}

fn print_settings(app: &App) {
    let theme = app.theme();
    let settings = app.settings.settings();
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };

    println!("{}", theme.heading("Settings"));
    println!("  Dark mode:          {}", on_off(settings.dark_mode));
    println!("  Default view:       {}", settings.default_view);
    println!("  Notifications:      {}", on_off(settings.notifications_enabled));

    let reminders: Vec<String> = REMINDER_CHOICES
        .iter()
        .map(|days| {
            let label = format!("{} {}", days, pluralize("day", *days as usize));
            if settings.default_reminder_days.contains(days) {
                theme.accent(&format!("[x] {}", label))
            } else {
                theme.muted(&format!("[ ] {}", label))
            }
        })
        .collect();
    println!("  Default reminders:  {}", reminders.join("  "));

    // Offsets set outside the presets
    let custom: Vec<String> = settings
        .default_reminder_days
        .iter()
        .filter(|d| !REMINDER_CHOICES.contains(*d))
        .map(|d| d.to_string())
        .collect();
    if !custom.is_empty() {
        println!("  {}", theme.muted(&format!("also: {} days", custom.join(", "))));
    }
}
