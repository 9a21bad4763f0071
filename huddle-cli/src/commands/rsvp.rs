use anyhow::Result;

use crate::app::App;

pub fn run(app: &mut App, id: &str) -> Result<()> {
    let theme = app.theme();
    let id = app.find_event(id)?.id.clone();
    let user = app.session.user.clone();

    let event = app.events.toggle_attendance(&id, &user)?;

    if event.is_attending(&user) {
        println!("{}", theme.accent("You're attending the event!"));
    } else {
        println!("{}", theme.info("You've left the event"));
    }

    Ok(())
}
