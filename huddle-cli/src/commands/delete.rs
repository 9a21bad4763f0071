use anyhow::Result;
use dialoguer::Confirm;

use crate::app::App;

pub fn run(app: &mut App, id: &str, yes: bool) -> Result<()> {
    let theme = app.theme();
    let event = app.find_event(id)?;
    let (id, title) = (event.id.clone(), event.title.clone());

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete \"{}\"?", title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", theme.muted("Kept the event"));
            return Ok(());
        }
    }

    app.events.delete(&id)?;
    println!("{}", theme.accent("Event deleted successfully"));

    Ok(())
}
