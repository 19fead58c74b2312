use anyhow::Result;

use super::{display, install_method};
use crate::catalog::{Category, Package};
use crate::distribution::Distribution;
use crate::prompt::Prompter;

/// Packages of one category that this host can install, plus Back
pub fn choose(dist: &mut Distribution, category: &Category, prompter: &mut dyn Prompter) -> Result<()> {
    let packages: Vec<&Package> = category
        .packages
        .iter()
        .filter(|package| dist.is_package_available(package))
        .collect();

    loop {
        let mut labels: Vec<String> = packages
            .iter()
            .map(|package| display::package_label(package, dist))
            .collect();
        labels.push(display::BACK.to_string());

        let idx = prompter.select("Choose a Package", &labels)?;
        match packages.get(idx) {
            Some(package) => install_method::choose(dist, package, prompter)?,
            None => return Ok(()),
        }
    }
}
