//! Purge command - remove every scratch file, retained or not.

use gosnip_driver::Session;

use crate::args::ConfigArgs;

pub(crate) fn run(config: &ConfigArgs) -> miette::Result<()> {
    let mut session = Session::with_config(config.config());
    session.purge_scratch();

    let dir = session.scratch_dir();
    if dir.exists() {
        return Err(miette::miette!(
            "Failed to remove scratch directory {}",
            dir.display()
        ));
    }

    println!("Removed {}", dir.display());
    Ok(())
}
