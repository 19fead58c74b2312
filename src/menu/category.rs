use anyhow::Result;

use super::{display, package};
use crate::catalog::Catalog;
use crate::distribution::Distribution;
use crate::prompt::Prompter;

pub fn choose(dist: &mut Distribution, catalog: &Catalog, prompter: &mut dyn Prompter) -> Result<()> {
    let mut labels: Vec<String> = catalog.categories.iter().map(|c| c.name.clone()).collect();
    labels.push(display::BACK.to_string());

    loop {
        let idx = prompter.select("Choose a Package Category", &labels)?;
        match catalog.categories.get(idx) {
            Some(category) => package::choose(dist, category, prompter)?,
            None => return Ok(()),
        }
    }
}
