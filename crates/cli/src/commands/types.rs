use composer_render::default_factory;

use crate::OutputFormat;

pub(crate) fn cmd_types(output: OutputFormat) {
    let factory = default_factory();
    let types = factory.registered_types();
    match output {
        OutputFormat::Text => {
            for tag in types {
                println!("{}", tag);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::json!({ "types": types })),
    }
}
