use std::path::Path;
use std::process;

use crate::{build_factory, read_document, report_error, OutputFormat, RuleArgs};

pub(crate) fn cmd_render(document: &Path, rules: &RuleArgs, output: OutputFormat, quiet: bool) {
    let doc = read_document(document, output, quiet);
    let factory = build_factory(rules, output, quiet);

    let component = match factory.make_component(&doc) {
        Ok(component) => component,
        Err(e) => {
            let msg = format!("error compiling '{}': {}", document.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let node = match component.and_then(|c| c.realize()) {
        Some(node) => node,
        None => {
            match output {
                OutputFormat::Json => println!("null"),
                OutputFormat::Text => {
                    if !quiet {
                        println!("document '{}' rendered nothing", document.display());
                    }
                }
            }
            return;
        }
    };

    match output {
        OutputFormat::Text => print!("{}", node.to_outline()),
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&node)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}
