//! GitHub-flavored markdown renderer.

use crate::model::{Annotated, Annotation, Described, DocSet, Owner, Reflectable};
use crate::render::{RenderOptions, Renderer};
use crate::toc;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, docs: &DocSet, opts: &RenderOptions) -> Result<String> {
        let mut output = String::new();

        if !docs.is_empty() {
            output.push_str("## Index\n\n");
            for owner in docs {
                output.push_str(&toc::render_index_item(owner.name()));
                output.push('\n');
            }
            output.push('\n');
        }

        for owner in docs {
            output.push_str(&render_owner(owner, opts));
            output.push('\n');
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_owner(owner: &Owner, opts: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", owner.name()));

    if let Some(at) = owner.reflection() {
        match at.file {
            Some(ref file) => lines.push(format!("_Defined in `{}` line {}_\n", file, at.line)),
            None => lines.push(format!("_Defined at line {}_\n", at.line)),
        }
    }

    let description = owner.description().trim_end();
    if !description.is_empty() {
        lines.push(description.to_string());
        lines.push(String::new());
    }

    let annotations = owner.get_annotations(opts.annotations.clone());
    if !annotations.is_empty() {
        lines.push("#### Annotations\n".to_string());
        for annotation in annotations {
            lines.push(render_annotation(annotation));
        }
        lines.push(String::new());
    }

    if owner.is_empty() {
        lines.push("_Undocumented._".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// One list item per annotation; multi-line values are indented under it.
fn render_annotation(annotation: &Annotation) -> String {
    let text = if annotation.bare_name() == "see" {
        annotation
            .values()
            .iter()
            .map(|v| toc::render_see_target(v))
            .collect::<Vec<_>>()
    } else {
        annotation.values().to_vec()
    };

    let joined = text.join(" ");
    let mut item = format!("* `{}`", annotation.name());
    let mut lines = joined.lines();
    if let Some(first) = lines.next() {
        if !first.is_empty() {
            item.push(' ');
            item.push_str(first);
        }
    }
    for line in lines {
        item.push_str("\n  ");
        item.push_str(line);
    }
    item
}
