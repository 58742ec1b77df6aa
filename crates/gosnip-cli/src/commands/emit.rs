//! Emit command - print the generated program without running it.

use gosnip_driver::{EvalConfig, Session};

use crate::args::SourceArgs;

pub(crate) fn run(source: &SourceArgs) -> miette::Result<()> {
    let snippet = source.snippet()?;

    let mut session = Session::with_config(EvalConfig::from_env());
    session.add_libraries(source.libraries());

    let program = session.materialize(source.mode_for(&snippet), &snippet)?;
    println!("{}", program);
    Ok(())
}
