//! `composer inspect`: show what a document compiles to.
//!
//! Nothing is realized, so rules are not evaluated. Gated nodes show
//! the shape of their rule instead.

use std::fmt::Write as _;
use std::path::Path;
use std::process;

use composer_core::{AsAny, Component, ComponentKind, ComponentMeta, MapMeta};
use composer_render::ViewNode;
use serde_json::{json, Value};

use crate::{build_factory, read_document, report_error, OutputFormat, RuleArgs};

pub(crate) fn cmd_inspect(document: &Path, rules: &RuleArgs, output: OutputFormat, quiet: bool) {
    let doc = read_document(document, output, quiet);
    let factory = build_factory(rules, output, quiet);

    let component = match factory.make_component(&doc) {
        Ok(Some(component)) => component,
        Ok(None) => {
            match output {
                OutputFormat::Json => println!("null"),
                OutputFormat::Text => {
                    if !quiet {
                        println!("document '{}' compiled to nothing", document.display());
                    }
                }
            }
            return;
        }
        Err(e) => {
            let msg = format!("error compiling '{}': {}", document.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => {
            let mut out = String::new();
            write_outline(&component, 0, &mut out);
            print!("{}", out);
        }
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&describe(&component))
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}

fn meta_value(meta: &dyn ComponentMeta) -> Value {
    match meta.as_any().downcast_ref::<MapMeta>() {
        Some(map) => Value::Object(map.as_map().clone()),
        None => Value::String(format!("{:?}", meta)),
    }
}

/// JSON description of a compiled component tree.
pub(crate) fn describe(component: &Component<ViewNode>) -> Value {
    let mut entry = json!({ "kind": component.kind().as_str() });
    match component.rule() {
        Some(rule) => {
            entry["rule"] = Value::String(format!("{:?}", rule));
        }
        None => {
            if let Some(meta) = component.meta() {
                entry["meta"] = meta_value(meta);
            }
        }
    }
    let children: Vec<Value> = match component.gated_component() {
        Some(gated) => vec![describe(gated)],
        None => component.children().iter().map(describe).collect(),
    };
    if !children.is_empty() {
        entry["children"] = Value::Array(children);
    }
    entry
}

fn write_outline(component: &Component<ViewNode>, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(component.kind().as_str());
    match component.kind() {
        ComponentKind::Rule => {
            if let Some(rule) = component.rule() {
                let _ = write!(out, " {:?}", rule);
            }
        }
        _ => {
            if let Some(meta) = component.meta() {
                let _ = write!(out, " {}", meta_value(meta));
            }
        }
    }
    out.push('\n');
    match component.gated_component() {
        Some(gated) => write_outline(gated, depth + 1, out),
        None => {
            for child in component.children() {
                write_outline(child, depth + 1, out);
            }
        }
    }
}
