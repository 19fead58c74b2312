use anyhow::Result;

use super::display;
use crate::channel::Flatpak;
use crate::distribution::Distribution;
use crate::prompt::Prompter;

/// Install from the only remote, or let the user pick until Back
pub fn choose(dist: &mut Distribution, app: &Flatpak, prompter: &mut dyn Prompter) -> Result<()> {
    match app.remotes.as_slice() {
        [] => {
            tracing::warn!("{} lists no remotes", app.id);
            return Ok(());
        }
        [remote] => return dist.install_flatpak(app, *remote),
        _ => {}
    }

    let mut labels: Vec<String> = app.remotes.iter().map(display::remote_label).collect();
    labels.push(display::BACK.to_string());

    loop {
        let idx = prompter.select("Choose a Flatpak Remote", &labels)?;
        match app.remotes.get(idx) {
            Some(remote) => dist.install_flatpak(app, *remote)?,
            None => return Ok(()),
        }
    }
}
