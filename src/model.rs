//! Element model for parsed doc blocks.
//!
//! One [`Owner`] per analyzed member, each holding its description and the
//! ordered [`Annotation`]s declared in its doc block. Owners are built by the
//! parser and read-only afterwards.

use crate::error::{DocBlockError, Result};
use std::collections::BTreeSet;

/// Where a member was found by the source scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub file: Option<String>,
    pub line: usize,
}

/// The per-member record: description plus annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Owner {
    name: String,
    description: String,
    annotations: Vec<Annotation>,
    reflection: Option<MemberRef>,
}

/// One `@name values...` declaration and its continuation lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    name: String,
    values: Vec<String>,
    /// Name of the owning member. Relation only.
    owner: String,
}

impl Owner {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the member had no description and no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.description.is_empty()
    }

    pub(crate) fn push_description_line(&mut self, text: &str) {
        self.description.push_str(text);
        self.description.push('\n');
    }

    /// Opens a new annotation and returns its index.
    pub(crate) fn open_annotation(&mut self, name: &str, values: Vec<String>) -> usize {
        self.annotations.push(Annotation {
            name: name.to_string(),
            values,
            owner: self.name.clone(),
        });
        self.annotations.len() - 1
    }

    /// Extends the last value of the annotation at `index`.
    /// No-op when that annotation has no values to extend.
    pub(crate) fn continue_annotation(&mut self, index: usize, text: &str) -> bool {
        match self
            .annotations
            .get_mut(index)
            .and_then(|a| a.values.last_mut())
        {
            Some(last) => {
                last.push('\n');
                last.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Mutable views over this owner and each of its annotations.
    pub fn elements_mut(&mut self) -> Vec<ElementMut<'_>> {
        let Owner {
            annotations,
            reflection,
            ..
        } = self;
        let mut out = vec![ElementMut::Owner(reflection)];
        out.extend(annotations.iter_mut().map(ElementMut::Annotation));
        out
    }
}

impl Annotation {
    /// Full name including the marker, e.g. `@param`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with the leading marker removed, e.g. `param`.
    pub fn bare_name(&self) -> &str {
        let mut chars = self.name.chars();
        chars.next();
        chars.as_str()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// First value token, if any.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Name of the member this annotation was declared on.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn matches(&self, names: &BTreeSet<String>) -> bool {
        names.contains(self.name()) || names.contains(self.bare_name())
    }
}

// -- Capabilities -------------------------------------------------------------

/// Elements that carry free-text description.
pub trait Described {
    fn description(&self) -> &str;

    fn has_description(&self) -> bool {
        !self.description().trim().is_empty()
    }
}

/// Elements that carry annotations, with the query API over them.
pub trait Annotated {
    fn annotation_list(&self) -> &[Annotation];

    /// All annotations matching `filter`, in declaration order.
    ///
    /// Each annotation is compared by both its full name and its
    /// marker-stripped name.
    fn get_annotations<'f>(&self, filter: impl Into<Filter<'f>>) -> Vec<&Annotation> {
        let filter = filter.into();
        match filter.names() {
            None => self.annotation_list().iter().collect(),
            Some(names) => self
                .annotation_list()
                .iter()
                .filter(|a| a.matches(&names))
                .collect(),
        }
    }

    /// First annotation matching `filter`.
    fn get_annotation<'f>(&self, filter: impl Into<Filter<'f>>) -> Option<&Annotation> {
        let filter = filter.into();
        match filter.names() {
            None => self.annotation_list().first(),
            Some(names) => self.annotation_list().iter().find(|a| a.matches(&names)),
        }
    }

    fn has_annotation<'f>(&self, filter: impl Into<Filter<'f>>) -> bool {
        self.get_annotation(filter).is_some()
    }

    /// True when every filter matches at least one annotation.
    /// An empty filter list is never satisfied.
    fn has_annotations<'f, I, F>(&self, filters: I) -> bool
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter<'f>>,
    {
        let mut any = false;
        for filter in filters {
            any = true;
            if !self.has_annotation(filter) {
                return false;
            }
        }
        any
    }
}

/// Elements that may hold a handle to the member they were parsed from.
///
/// Implemented by [`Owner`] only. Annotations are pure data.
pub trait Reflectable {
    fn reflection(&self) -> Option<&MemberRef>;
    fn set_reflection(&mut self, reflection: MemberRef);
}

impl Described for Owner {
    /// Description lines before the first annotation, each followed by `\n`.
    fn description(&self) -> &str {
        &self.description
    }
}

impl Annotated for Owner {
    fn annotation_list(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Reflectable for Owner {
    fn reflection(&self) -> Option<&MemberRef> {
        self.reflection.as_ref()
    }

    fn set_reflection(&mut self, reflection: MemberRef) {
        self.reflection = Some(reflection);
    }
}

/// Mutable view over either kind of element, for callers that walk
/// owners and annotations uniformly.
pub enum ElementMut<'a> {
    Owner(&'a mut Option<MemberRef>),
    Annotation(&'a mut Annotation),
}

impl ElementMut<'_> {
    pub fn attach_reflection(&mut self, reflection: MemberRef) -> Result<()> {
        match self {
            ElementMut::Owner(slot) => {
                **slot = Some(reflection);
                Ok(())
            }
            ElementMut::Annotation(_) => Err(DocBlockError::Unsupported {
                operation: "reflection attachment",
                element: "annotation",
            }),
        }
    }
}

// -- Filter -------------------------------------------------------------------

/// Annotation name filter, resolved once at the query boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter<'a> {
    #[default]
    None,
    Single(&'a str),
    Many(Vec<&'a str>),
}

impl<'a> Filter<'a> {
    /// The name set to match against, or `None` for "match everything".
    /// Empty names are ignored, and a filter left with no names is no filter.
    fn names(&self) -> Option<BTreeSet<String>> {
        let names: BTreeSet<String> = match self {
            Filter::None => return None,
            Filter::Single(name) => BTreeSet::from([name.to_string()]),
            Filter::Many(names) => names.iter().map(|n| n.to_string()).collect(),
        };
        let names: BTreeSet<String> = names.into_iter().filter(|n| !n.is_empty()).collect();
        (!names.is_empty()).then_some(names)
    }
}

impl<'a> From<&'a str> for Filter<'a> {
    fn from(name: &'a str) -> Self {
        Filter::Single(name)
    }
}

impl<'a> From<&'a String> for Filter<'a> {
    fn from(name: &'a String) -> Self {
        Filter::Single(name.as_str())
    }
}

impl<'a> From<Vec<&'a str>> for Filter<'a> {
    fn from(names: Vec<&'a str>) -> Self {
        Filter::Many(names)
    }
}

impl<'a> From<&'a [&'a str]> for Filter<'a> {
    fn from(names: &'a [&'a str]) -> Self {
        Filter::Many(names.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Filter<'a> {
    fn from(names: [&'a str; N]) -> Self {
        Filter::Many(names.to_vec())
    }
}

impl<'a> From<&'a [String]> for Filter<'a> {
    fn from(names: &'a [String]) -> Self {
        Filter::Many(names.iter().map(String::as_str).collect())
    }
}

impl<'a, T: Into<Filter<'a>>> From<Option<T>> for Filter<'a> {
    fn from(filter: Option<T>) -> Self {
        filter.map(Into::into).unwrap_or_default()
    }
}

// -- DocSet -------------------------------------------------------------------

/// Owners produced by one analysis run, in input order.
#[derive(Debug, Clone, Default)]
pub struct DocSet {
    owners: Vec<Owner>,
}

impl DocSet {
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Owner> {
        self.owners.iter()
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn owners_mut(&mut self) -> &mut [Owner] {
        &mut self.owners
    }

    /// First owner with the given member name.
    pub fn owner(&self, name: &str) -> Option<&Owner> {
        self.owners.iter().find(|o| o.name == name)
    }

    /// Matching annotations across all owners, paired with their owner.
    pub fn annotations<'f>(&self, filter: impl Into<Filter<'f>>) -> Vec<(&Owner, &Annotation)> {
        let filter = filter.into();
        self.owners
            .iter()
            .flat_map(|owner| {
                owner
                    .get_annotations(filter.clone())
                    .into_iter()
                    .map(move |a| (owner, a))
            })
            .collect()
    }

    /// Keeps only owners for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Owner) -> bool) {
        self.owners.retain(keep);
    }
}

impl From<Vec<Owner>> for DocSet {
    fn from(owners: Vec<Owner>) -> Self {
        Self { owners }
    }
}

impl FromIterator<Owner> for DocSet {
    fn from_iter<I: IntoIterator<Item = Owner>>(iter: I) -> Self {
        Self {
            owners: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DocSet {
    type Item = Owner;
    type IntoIter = std::vec::IntoIter<Owner>;

    fn into_iter(self) -> Self::IntoIter {
        self.owners.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocSet {
    type Item = &'a Owner;
    type IntoIter = std::slice::Iter<'a, Owner>;

    fn into_iter(self) -> Self::IntoIter {
        self.owners.iter()
    }
}
