//! Source Tree Visitors
//!
//! Traversal strategies over a [`SourceNode`](super::SourceNode) tree,
//! dispatched by [`SourceNode::accept`](super::SourceNode::accept):
//!
//! | Visitor | Result |
//! |---|---|
//! | [`CompilerStringCounter`] | number of compiler-string entries |
//! | [`CompilerStringFlattener`] | the entries themselves, in order |
//! | [`LineCounter`] | lines in the compilation unit |
//! | [`LineLocalizer`] | file and local line of one global line |
//!
//! All of them share the include-once rule: a group already visited is
//! skipped. Counting and flattening therefore always agree, and a cyclic
//! tree cannot recurse forever.

use std::ops::ControlFlow;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::node::{FragmentText, SourceFragment, SourceGroup};

/// Identity set of groups already visited.
#[derive(Debug, Default)]
pub struct VisitedGroups(FxHashSet<usize>);

impl VisitedGroups {
    /// Returns `false` if `group` was already present.
    pub fn insert(&mut self, group: &SourceGroup) -> bool {
        self.0.insert(std::ptr::from_ref(group) as usize)
    }

    #[must_use]
    pub fn contains(&self, group: &SourceGroup) -> bool {
        self.0.contains(&(std::ptr::from_ref(group) as usize))
    }
}

pub trait SourceVisitor<'a> {
    fn visited_groups(&mut self) -> &mut VisitedGroups;

    fn visit_fragment(&mut self, fragment: &'a SourceFragment) -> ControlFlow<()>;

    fn enter_group(&mut self, _group: &'a SourceGroup) {}

    fn exit_group(&mut self, _group: &'a SourceGroup) {}
}

// ============================================================================
// Counting
// ============================================================================

#[derive(Debug, Default)]
pub struct CompilerStringCounter {
    visited: VisitedGroups,
    count: usize,
}

impl CompilerStringCounter {
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<'a> SourceVisitor<'a> for CompilerStringCounter {
    fn visited_groups(&mut self) -> &mut VisitedGroups {
        &mut self.visited
    }

    fn visit_fragment(&mut self, fragment: &'a SourceFragment) -> ControlFlow<()> {
        self.count += fragment.compiler_string_count();
        ControlFlow::Continue(())
    }
}

#[derive(Debug, Default)]
pub struct LineCounter {
    visited: VisitedGroups,
    count: usize,
}

impl LineCounter {
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<'a> SourceVisitor<'a> for LineCounter {
    fn visited_groups(&mut self) -> &mut VisitedGroups {
        &mut self.visited
    }

    fn visit_fragment(&mut self, fragment: &'a SourceFragment) -> ControlFlow<()> {
        self.count += fragment.line_count();
        ControlFlow::Continue(())
    }
}

// ============================================================================
// Flattening
// ============================================================================

/// Collects borrowed compiler strings. Size it with the counter's result.
#[derive(Debug, Default)]
pub struct CompilerStringFlattener<'a> {
    visited: VisitedGroups,
    strings: Vec<&'a str>,
}

impl<'a> CompilerStringFlattener<'a> {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            visited: VisitedGroups::default(),
            strings: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn strings(&self) -> &[&'a str] {
        &self.strings
    }

    #[must_use]
    pub fn into_strings(self) -> Vec<&'a str> {
        self.strings
    }
}

impl<'a> SourceVisitor<'a> for CompilerStringFlattener<'a> {
    fn visited_groups(&mut self) -> &mut VisitedGroups {
        &mut self.visited
    }

    fn visit_fragment(&mut self, fragment: &'a SourceFragment) -> ControlFlow<()> {
        match fragment.text() {
            FragmentText::Joined(text) => self.strings.push(text),
            FragmentText::Lines(lines) => self.strings.extend(lines.iter().map(String::as_str)),
        }
        ControlFlow::Continue(())
    }
}

// ============================================================================
// Line localization
// ============================================================================

/// A line attributed to the file that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedLine {
    pub file: Arc<str>,
    /// 1-based line within `file`.
    pub line: usize,
}

/// Finds the fragment holding one 1-based global line.
///
/// Each group pushes an offset on entry; on exit its lines are folded into
/// the parent's offset.
#[derive(Debug)]
pub struct LineLocalizer {
    visited: VisitedGroups,
    target: usize,
    offsets: SmallVec<[usize; 8]>,
    result: Option<LocalizedLine>,
}

impl LineLocalizer {
    #[must_use]
    pub fn new(global_line: usize) -> Self {
        let mut offsets = SmallVec::new();
        offsets.push(0);
        Self {
            visited: VisitedGroups::default(),
            target: global_line,
            offsets,
            result: None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&LocalizedLine> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn into_result(self) -> Option<LocalizedLine> {
        self.result
    }

    fn base(&self) -> usize {
        self.offsets.iter().sum()
    }
}

impl<'a> SourceVisitor<'a> for LineLocalizer {
    fn visited_groups(&mut self) -> &mut VisitedGroups {
        &mut self.visited
    }

    fn visit_fragment(&mut self, fragment: &'a SourceFragment) -> ControlFlow<()> {
        let base = self.base();
        if self.target > base && self.target <= base + fragment.line_count() {
            self.result = Some(LocalizedLine {
                file: fragment.file().clone(),
                line: fragment.first_line() + (self.target - base - 1),
            });
            return ControlFlow::Break(());
        }
        if let Some(top) = self.offsets.last_mut() {
            *top += fragment.line_count();
        }
        ControlFlow::Continue(())
    }

    fn enter_group(&mut self, _group: &'a SourceGroup) {
        self.offsets.push(0);
    }

    fn exit_group(&mut self, _group: &'a SourceGroup) {
        let lines = self.offsets.pop().unwrap_or(0);
        if let Some(top) = self.offsets.last_mut() {
            *top += lines;
        }
    }
}
