use anyhow::Result;

use crate::session::Session;

pub fn run(session: &mut Session) -> Result<()> {
    let username = session.credential().username.clone();
    session.store.clear()?;

    if username.is_empty() {
        println!("Not logged in.");
    } else {
        println!("Logged out {username}.");
    }

    Ok(())
}
