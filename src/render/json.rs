//! JSON renderer — structured output for tooling integration.

use crate::model::{Annotated, Annotation, Described, DocSet, MemberRef, Owner, Reflectable};
use crate::render::{RenderOptions, Renderer};
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct OwnerJson<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SourceJson<'a>>,
    annotations: Vec<AnnotationJson<'a>>,
}

#[derive(Serialize)]
struct SourceJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    line: usize,
}

#[derive(Serialize)]
struct AnnotationJson<'a> {
    name: &'a str,
    values: &'a [String],
}

impl<'a> From<&'a MemberRef> for SourceJson<'a> {
    fn from(at: &'a MemberRef) -> Self {
        Self {
            file: at.file.as_deref(),
            line: at.line,
        }
    }
}

impl<'a> From<&'a Annotation> for AnnotationJson<'a> {
    fn from(a: &'a Annotation) -> Self {
        Self {
            name: a.name(),
            values: a.values(),
        }
    }
}

fn owner_json<'a>(owner: &'a Owner, opts: &RenderOptions) -> OwnerJson<'a> {
    OwnerJson {
        name: owner.name(),
        description: owner.description(),
        source: owner.reflection().map(SourceJson::from),
        annotations: owner
            .get_annotations(opts.annotations.clone())
            .into_iter()
            .map(AnnotationJson::from)
            .collect(),
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, docs: &DocSet, opts: &RenderOptions) -> Result<String> {
        let owners: Vec<_> = docs.iter().map(|o| owner_json(o, opts)).collect();
        let mut out = serde_json::to_string_pretty(&owners).context("failed to serialize JSON")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
