//! Eval command - run a snippet and print what it printed.

use gosnip_driver::{Invocation, Session};
use tracing::debug;

use crate::args::EvalArgs;

pub(crate) fn run(args: &EvalArgs) -> miette::Result<()> {
    let snippet = args.source.snippet()?;
    let mode = args.source.mode_for(&snippet);
    debug!("evaluating {} bytes in {} mode", snippet.len(), mode);

    let mut session = Session::with_config(args.config.config());
    session.add_libraries(args.source.libraries());

    let result = session.execute(mode, &snippet);

    if args.json {
        let invocation = Invocation::from(result);
        let json = serde_json::to_string(&invocation)
            .map_err(|e| miette::miette!("Failed to serialize result: {}", e))?;
        println!("{}", json);

        if !invocation.is_success() {
            return Err(miette::miette!("evaluation failed"));
        }
        return Ok(());
    }

    println!("{}", result?);
    Ok(())
}
