use anyhow::Result;

use crate::app::App;

pub fn run(app: &App) -> Result<()> {
    let theme = app.theme();

    for user in app.roster.users() {
        let line = format!("  {:<6} {}", user.id, user.name);
        if user.id == app.session.user {
            println!("{} {}", theme.accent(&line), theme.muted("(current)"));
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}
