use std::sync::Arc;

use super::include::parse_include_directive;
use super::loader::{SourceLoader, load_required};
use super::node::{SourceFragment, SourceNode, terminate_line};
use crate::cache::NamedCache;
use crate::errors::{GlintError, Result};

/// Registry of parsed source trees, keyed by name exactly as requested or
/// written in an include directive.
///
/// A file included from several places is parsed once; every includer
/// holds the same subtree.
pub struct SourceCache {
    trees: NamedCache<SourceNode>,
    keep_discrete_lines: bool,
}

impl SourceCache {
    #[must_use]
    pub fn new(preloading: bool, keep_discrete_lines: bool) -> Self {
        Self {
            trees: NamedCache::new("SourceCache", preloading),
            keep_discrete_lines,
        }
    }

    /// The underlying name-keyed registry, for cache management.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &NamedCache<SourceNode> {
        &self.trees
    }

    /// Returns the tree for `name`, loading and parsing it (and everything
    /// it includes) on a miss.
    pub fn get_or_load(&self, name: &str, loader: &dyn SourceLoader) -> Result<Arc<SourceNode>> {
        let mut stack = Vec::new();
        self.resolve(name, loader, &mut stack)
    }

    /// Parses inline `text` as a root named `name`.
    ///
    /// The root itself is not registered, so `name` never answers an include
    /// directive and each call parses `text` afresh. Files it includes are
    /// loaded and cached as usual.
    pub fn parse_inline(
        &self,
        name: &str,
        text: &str,
        loader: &dyn SourceLoader,
    ) -> Result<Arc<SourceNode>> {
        let mut stack = vec![name.to_string()];
        self.parse(name, text, loader, &mut stack).map(Arc::new)
    }

    fn resolve(
        &self,
        name: &str,
        loader: &dyn SourceLoader,
        stack: &mut Vec<String>,
    ) -> Result<Arc<SourceNode>> {
        if let Some(tree) = self.trees.get(name) {
            return Ok(tree);
        }
        if stack.iter().any(|open| open == name) {
            return Err(GlintError::IncludeCycle {
                name: name.to_string(),
            });
        }

        stack.push(name.to_string());
        let parsed = load_required(loader, name).and_then(|text| self.parse(name, &text, loader, stack));
        stack.pop();

        Ok(self.trees.insert_or_get(name, Arc::new(parsed?)))
    }

    /// Splits `text` into fragments at include directives. Directive lines
    /// are elided; line numbering of the following fragment resumes after
    /// them.
    fn parse(
        &self,
        name: &str,
        text: &str,
        loader: &dyn SourceLoader,
        stack: &mut Vec<String>,
    ) -> Result<SourceNode> {
        let file: Arc<str> = Arc::from(name);
        let mut children = Vec::new();
        let mut lines = Vec::new();
        let mut first_line = 1;

        for (index, line) in text.split_inclusive('\n').enumerate() {
            let Some(included) = parse_include_directive(line) else {
                lines.push(terminate_line(line));
                continue;
            };

            if !lines.is_empty() {
                children.push(Arc::new(self.fragment(&file, first_line, std::mem::take(&mut lines))));
            }
            children.push(self.resolve(included, loader, stack)?);
            first_line = index + 2;
        }
        if !lines.is_empty() {
            children.push(Arc::new(self.fragment(&file, first_line, lines)));
        }

        Ok(SourceNode::group(file, children))
    }

    fn fragment(&self, file: &Arc<str>, first_line: usize, lines: Vec<String>) -> SourceNode {
        SourceNode::leaf(SourceFragment::from_lines(
            file.clone(),
            first_line,
            lines,
            self.keep_discrete_lines,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySourceLoader;

    #[test]
    fn test_include_is_substituted() {
        let loader = MemorySourceLoader::new()
            .with("main.vsh", "a\n#include \"lib.glsl\"\nb\n")
            .with("lib.glsl", "l1\nl2\n");
        let cache = SourceCache::new(true, false);

        let tree = cache.get_or_load("main.vsh", &loader).unwrap();
        assert_eq!(tree.flatten_to_string(), "a\nl1\nl2\nb\n");
        assert!(cache.entries().get("lib.glsl").is_some());
    }

    #[test]
    fn test_cycle_is_rejected() {
        let loader = MemorySourceLoader::new()
            .with("a.glsl", "#include \"b.glsl\"\n")
            .with("b.glsl", "#import <a.glsl>\n");
        let cache = SourceCache::new(true, false);

        let err = cache.get_or_load("a.glsl", &loader).unwrap_err();
        assert!(matches!(err, GlintError::IncludeCycle { name } if name == "a.glsl"));
        assert!(cache.entries().is_empty());
    }

    #[test]
    fn test_missing_include_is_reported() {
        let loader = MemorySourceLoader::new().with("a.glsl", "#include \"gone.glsl\"\n");
        let cache = SourceCache::new(false, false);
        let err = cache.get_or_load("a.glsl", &loader).unwrap_err();
        assert!(matches!(err, GlintError::SourceNotFound { name } if name == "gone.glsl"));
    }

    #[test]
    fn test_inline_root_is_not_includable() {
        let loader = MemorySourceLoader::new()
            .with("common.glsl", "from_file\n")
            .with("main.vsh", "#include \"common.glsl\"\nmain\n");
        let cache = SourceCache::new(true, false);

        let inline = cache.parse_inline("common.glsl", "from_inline\n", &loader).unwrap();
        assert_eq!(inline.flatten_to_string(), "from_inline\n");
        assert!(cache.entries().get("common.glsl").is_none());

        let tree = cache.get_or_load("main.vsh", &loader).unwrap();
        assert_eq!(tree.flatten_to_string(), "from_file\nmain\n");

        let reparsed = cache.parse_inline("common.glsl", "changed\n", &loader).unwrap();
        assert_eq!(reparsed.flatten_to_string(), "changed\n");
    }

    #[test]
    fn test_discrete_lines() {
        let loader = MemorySourceLoader::new().with("a.glsl", "x\ny\nz");
        let cache = SourceCache::new(true, true);
        let tree = cache.get_or_load("a.glsl", &loader).unwrap();
        assert_eq!(tree.compiler_string_count(), 3);
        assert_eq!(tree.flatten_to_string(), "x\ny\nz\n");
    }
}
