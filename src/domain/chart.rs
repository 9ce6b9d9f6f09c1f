//! The organisation chart: a CEO at the root, managers owning their reports.
//!
//! [`OrgChart`] owns every [`Person`] through a [`PersonArena`]. Callers hold
//! [`PersonId`] handles, which are bound to the chart that issued them, and
//! read through [`PersonRef`] views. The only way to grow the chart is
//! [`OrgChart::add_child`], so a person can never be re-attached or become
//! its own descendant.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::Index;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::arena::{Person, PersonArena};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::render::{self, RenderOptions};

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a person, valid only for the chart that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId {
    chart: u64,
    index: Index,
}

#[derive(Debug)]
pub struct OrgChart {
    id: u64,
    people: PersonArena,
}

fn validate_name(name: String) -> DomainResult<String> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName);
    }
    Ok(name)
}

impl OrgChart {
    /// Creates a chart holding only its CEO.
    pub fn new(ceo: impl Into<String>) -> DomainResult<Self> {
        let ceo = validate_name(ceo.into())?;
        let id = NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed);
        debug!(chart = id, ceo = %ceo, "created org chart");
        Ok(Self {
            id,
            people: PersonArena::with_root(ceo),
        })
    }

    /// Adds a direct report below `manager` and returns its handle.
    #[instrument(level = "trace", skip(self, name))]
    pub fn add_child(
        &mut self,
        manager: PersonId,
        name: impl Into<String>,
    ) -> DomainResult<PersonId> {
        let name = validate_name(name.into())?;
        let parent = self.resolve(manager)?;
        self.people
            .insert_child(parent, name)
            .map(|index| self.handle(index))
            .ok_or(DomainError::ForeignPerson)
    }

    pub fn root_id(&self) -> PersonId {
        self.handle(self.people.root())
    }

    pub fn root(&self) -> PersonRef<'_> {
        // The root is inserted on construction and never removed
        self.view(self.people.root())
            .unwrap_or_else(|| unreachable!("org chart without a root"))
    }

    pub fn person(&self, id: PersonId) -> DomainResult<PersonRef<'_>> {
        let index = self.resolve(id)?;
        self.view(index).ok_or(DomainError::ForeignPerson)
    }

    /// Prints everyone, one line per person, to stdout.
    pub fn print(&self) -> io::Result<()> {
        self.root().print(0)
    }

    /// Writes the default outline of the whole chart to `out`.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.root().write_to(out, 0, &RenderOptions::default())
    }

    /// Renders the whole chart with the given options.
    pub fn render(&self, opts: &RenderOptions) -> String {
        render::render(&self.people, self.people.root(), opts)
    }

    /// Box-drawing rendering; fails with [`DomainError::TooDeep`] for very tall charts.
    pub fn to_tree(&self) -> DomainResult<Tree<String>> {
        self.root().to_tree()
    }

    /// True if someone in the organisation is called `name`.
    #[instrument(level = "debug", skip(self))]
    pub fn contains(&self, name: &str) -> bool {
        self.root().contains(name)
    }

    /// Number of people in the organisation.
    #[instrument(level = "debug", skip(self))]
    pub fn size(&self) -> usize {
        self.root().size()
    }

    /// Number of levels in the chart; a chart with only a CEO has one level.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.root().height() + 1
    }

    /// First person called `name`, in pre-order.
    pub fn find(&self, name: &str) -> Option<PersonId> {
        self.root().find(name).map(|p| p.id())
    }

    /// Level of the first person called `name`.
    pub fn level_of(&self, name: &str) -> DomainResult<usize> {
        self.root()
            .find(name)
            .map(|p| p.level())
            .ok_or_else(|| DomainError::PersonNotFound(name.to_string()))
    }

    /// Names of everyone without reports, in pre-order.
    pub fn leaves(&self) -> Vec<&str> {
        self.root().leaves()
    }

    /// Pre-order walk over the whole chart.
    pub fn iter(&self) -> impl Iterator<Item = PersonRef<'_>> + '_ {
        self.root().iter()
    }

    /// Post-order walk: every report before their manager.
    pub fn iter_postorder(&self) -> impl Iterator<Item = PersonRef<'_>> + '_ {
        self.people
            .iter_postorder()
            .map(move |(index, person)| PersonRef::new(self, index, person))
    }

    fn handle(&self, index: Index) -> PersonId {
        PersonId {
            chart: self.id,
            index,
        }
    }

    fn resolve(&self, id: PersonId) -> DomainResult<Index> {
        if id.chart != self.id || !self.people.contains(id.index) {
            return Err(DomainError::ForeignPerson);
        }
        Ok(id.index)
    }

    fn view(&self, index: Index) -> Option<PersonRef<'_>> {
        self.people
            .get(index)
            .map(|person| PersonRef::new(self, index, person))
    }
}

impl fmt::Display for OrgChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

/// Borrowed view of one person, carrying the node-level operations.
#[derive(Clone, Copy)]
pub struct PersonRef<'a> {
    chart: &'a OrgChart,
    index: Index,
    person: &'a Person,
}

impl fmt::Debug for PersonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonRef")
            .field("index", &self.index)
            .field("name", &self.person.name())
            .finish()
    }
}

impl<'a> PersonRef<'a> {
    fn new(chart: &'a OrgChart, index: Index, person: &'a Person) -> Self {
        Self {
            chart,
            index,
            person,
        }
    }

    pub fn id(&self) -> PersonId {
        self.chart.handle(self.index)
    }

    pub fn name(&self) -> &'a str {
        self.person.name()
    }

    /// The manager, None for the CEO.
    pub fn parent(&self) -> Option<PersonRef<'a>> {
        self.person
            .parent()
            .and_then(|index| self.chart.view(index))
    }

    /// Direct reports in the order they were added.
    pub fn children(&self) -> impl Iterator<Item = PersonRef<'a>> + 'a {
        let chart = self.chart;
        self.person
            .children()
            .iter()
            .filter_map(move |&index| chart.view(index))
    }

    pub fn is_root(&self) -> bool {
        self.person.parent().is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.person.children().is_empty()
    }

    /// 1 for the CEO, otherwise one more than the manager's level.
    pub fn level(&self) -> usize {
        self.chart.people.level(self.index)
    }

    /// People in this subtree, this person included.
    pub fn size(&self) -> usize {
        self.chart.people.subtree_size(self.index)
    }

    /// Edges on the longest path down to a leaf; 0 for a leaf.
    pub fn height(&self) -> usize {
        self.chart.people.subtree_height(self.index)
    }

    /// True if this person or anyone below is called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// First person called `name` in this subtree, pre-order.
    pub fn find(&self, name: &str) -> Option<PersonRef<'a>> {
        self.chart
            .people
            .find_from(self.index, name)
            .and_then(|index| self.chart.view(index))
    }

    pub fn leaves(&self) -> Vec<&'a str> {
        self.chart.people.leaf_nodes(self.index)
    }

    /// Pre-order walk of this subtree, starting with this person.
    pub fn iter(&self) -> impl Iterator<Item = PersonRef<'a>> + 'a {
        let chart = self.chart;
        chart
            .people
            .iter_from(self.index)
            .map(move |(index, person)| PersonRef::new(chart, index, person))
    }

    /// Prints this subtree to stdout with this person indented `depth` units.
    pub fn print(&self, depth: usize) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out, depth, &RenderOptions::default())
    }

    pub fn write_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        depth: usize,
        opts: &RenderOptions,
    ) -> io::Result<()> {
        render::write_outline(&self.chart.people, self.index, depth, opts, out)
    }

    pub fn to_tree(&self) -> DomainResult<Tree<String>> {
        render::to_termtree(&self.chart.people, self.index)
    }
}
