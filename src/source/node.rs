use std::ops::ControlFlow;
use std::sync::Arc;

use super::visitor::{
    CompilerStringCounter, CompilerStringFlattener, LineCounter, LineLocalizer, LocalizedLine,
    SourceVisitor,
};

/// Name given to preamble fragments in diagnostics.
pub const PREAMBLE_NAME: &str = "preamble";

/// Text of a fragment, held either as one compiler string or one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentText {
    Joined(String),
    Lines(Vec<String>),
}

/// A contiguous run of lines from one file, with no include directives.
///
/// Every line ends with `'\n'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFragment {
    file: Arc<str>,
    first_line: usize,
    line_count: usize,
    text: FragmentText,
}

impl SourceFragment {
    /// Builds a fragment from lines that already end in `'\n'`.
    ///
    /// `first_line` is the 1-based line of the first entry in `file`.
    #[must_use]
    pub fn from_lines(file: Arc<str>, first_line: usize, lines: Vec<String>, discrete: bool) -> Self {
        let line_count = lines.len();
        let text = if discrete {
            FragmentText::Lines(lines)
        } else {
            FragmentText::Joined(lines.concat())
        };
        Self {
            file,
            first_line,
            line_count,
            text,
        }
    }

    /// Builds a single-string fragment from arbitrary text, terminating the
    /// last line if needed.
    #[must_use]
    pub fn from_text(file: Arc<str>, first_line: usize, text: &str) -> Self {
        let lines = text.split_inclusive('\n').map(terminate_line).collect();
        Self::from_lines(file, first_line, lines, false)
    }

    #[inline]
    #[must_use]
    pub fn file(&self) -> &Arc<str> {
        &self.file
    }

    #[inline]
    #[must_use]
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &FragmentText {
        &self.text
    }

    /// Entries this fragment contributes to a compiler-string array.
    #[must_use]
    pub fn compiler_string_count(&self) -> usize {
        match &self.text {
            FragmentText::Joined(_) => 1,
            FragmentText::Lines(lines) => lines.len(),
        }
    }
}

/// An ordered list of children: the fragments of one file interleaved with
/// the trees of the files it includes.
#[derive(Debug, Clone)]
pub struct SourceGroup {
    name: Arc<str>,
    children: Vec<Arc<SourceNode>>,
}

impl SourceGroup {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Arc<SourceNode>] {
        &self.children
    }
}

/// Node of a modular source tree.
///
/// Trees are immutable once built. An included file appears as the same
/// shared subtree everywhere it is included.
#[derive(Debug, Clone)]
pub enum SourceNode {
    Leaf(SourceFragment),
    Group(SourceGroup),
}

impl SourceNode {
    #[must_use]
    pub fn leaf(fragment: SourceFragment) -> Self {
        Self::Leaf(fragment)
    }

    #[must_use]
    pub fn group(name: impl Into<Arc<str>>, children: Vec<Arc<SourceNode>>) -> Self {
        Self::Group(SourceGroup {
            name: name.into(),
            children,
        })
    }

    /// Preamble fragment prepended to a shader body.
    #[must_use]
    pub fn preamble(text: &str) -> Self {
        Self::Leaf(SourceFragment::from_text(Arc::from(PREAMBLE_NAME), 1, text))
    }

    /// File or fragment name of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(fragment) => &fragment.file,
            Self::Group(group) => &group.name,
        }
    }

    /// Dispatches `visitor` over the tree in child order.
    ///
    /// A group already visited by this visitor is skipped, so a file
    /// included twice contributes once. Returns `Break` as soon as the
    /// visitor asks to stop.
    pub fn accept<'a, V>(&'a self, visitor: &mut V) -> ControlFlow<()>
    where
        V: SourceVisitor<'a> + ?Sized,
    {
        match self {
            Self::Leaf(fragment) => visitor.visit_fragment(fragment),
            Self::Group(group) => {
                if !visitor.visited_groups().insert(group) {
                    return ControlFlow::Continue(());
                }
                visitor.enter_group(group);
                for child in &group.children {
                    child.accept(visitor)?;
                }
                visitor.exit_group(group);
                ControlFlow::Continue(())
            }
        }
    }

    #[must_use]
    pub fn compiler_string_count(&self) -> usize {
        let mut counter = CompilerStringCounter::default();
        let _ = self.accept(&mut counter);
        counter.count()
    }

    /// Compiler strings in submission order.
    #[must_use]
    pub fn compiler_strings(&self) -> Vec<&str> {
        let mut flattener = CompilerStringFlattener::with_capacity(self.compiler_string_count());
        let _ = self.accept(&mut flattener);
        flattener.into_strings()
    }

    /// Effective text after include substitution.
    #[must_use]
    pub fn flatten_to_string(&self) -> String {
        self.compiler_strings().concat()
    }

    /// Lines contributed to the compilation unit.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let mut counter = LineCounter::default();
        let _ = self.accept(&mut counter);
        counter.count()
    }

    /// Maps a 1-based line of the flattened text to the file and line that
    /// produced it.
    #[must_use]
    pub fn localize_line(&self, global_line: usize) -> Option<LocalizedLine> {
        let mut localizer = LineLocalizer::new(global_line);
        let _ = self.accept(&mut localizer);
        localizer.into_result()
    }
}

/// Ensures a line carries its terminator.
pub(crate) fn terminate_line(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{line}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(file: &str, first_line: usize, text: &str) -> Arc<SourceNode> {
        Arc::new(SourceNode::leaf(SourceFragment::from_text(Arc::from(file), first_line, text)))
    }

    #[test]
    fn test_from_text_terminates_last_line() {
        let fragment = SourceFragment::from_text(Arc::from("a"), 1, "x;\ny;");
        assert_eq!(fragment.line_count(), 2);
        assert_eq!(fragment.text(), &FragmentText::Joined("x;\ny;\n".to_string()));
    }

    #[test]
    fn test_discrete_lines_count_per_line() {
        let lines = vec!["a\n".to_string(), "b\n".to_string(), "c\n".to_string()];
        let node = SourceNode::leaf(SourceFragment::from_lines(Arc::from("f"), 1, lines, true));
        assert_eq!(node.compiler_string_count(), 3);
        assert_eq!(node.flatten_to_string(), "a\nb\nc\n");
    }

    #[test]
    fn test_shared_subtree_contributes_once() {
        let shared = Arc::new(SourceNode::group("common", vec![fragment("common", 1, "c\n")]));
        let root = SourceNode::group(
            "main",
            vec![shared.clone(), fragment("main", 2, "m\n"), shared],
        );
        assert_eq!(root.flatten_to_string(), "c\nm\n");
        assert_eq!(root.compiler_string_count(), 2);
        assert_eq!(root.line_count(), 2);
    }
}
