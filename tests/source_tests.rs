//! Source Tree Integration Tests
//!
//! Tests for:
//! - Include substitution, shared subtrees and include-once traversal
//! - Compiler-string counting vs. flattening, single and per-line leaves
//! - Line localization through nested includes
//! - Compile-error localization through the shader library

mod common;

use std::sync::Arc;

use glint::source::{MemorySourceLoader, SourceCache, SourceNode};
use glint::{GlintError, HeadlessBackend, ShaderStage, ShadingContext, ShadingSettings};

fn two_file_loader() -> MemorySourceLoader {
    // A: 5 lines, includes B on line 2. B: 3 lines.
    MemorySourceLoader::new()
        .with("A", "a1\n#include \"B\"\na3\na4\na5\n")
        .with("B", "b1\nb2\nb3\n")
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn flatten_substitutes_nested_includes() {
    let loader = MemorySourceLoader::new()
        .with("main.vsh", "top\n#import \"mid.glsl\"\nbottom\n")
        .with("mid.glsl", "m1\n#include <leaf.glsl>\nm2\n")
        .with("leaf.glsl", "leaf\n");
    let cache = SourceCache::new(false, false);

    let tree = cache.get_or_load("main.vsh", &loader).unwrap();
    assert_eq!(tree.flatten_to_string(), "top\nm1\nleaf\nm2\nbottom\n");
}

#[test]
fn counter_agrees_with_flattener() {
    let loader = two_file_loader();
    for discrete in [false, true] {
        let cache = SourceCache::new(false, discrete);
        let tree = cache.get_or_load("A", &loader).unwrap();
        assert_eq!(tree.compiler_string_count(), tree.compiler_strings().len());
        assert_eq!(tree.flatten_to_string(), "a1\nb1\nb2\nb3\na3\na4\na5\n");
    }

    let cache = SourceCache::new(false, true);
    let tree = cache.get_or_load("A", &loader).unwrap();
    assert_eq!(tree.compiler_string_count(), 7);
}

#[test]
fn file_without_trailing_newline_is_terminated() {
    let loader = MemorySourceLoader::new()
        .with("main", "#include \"lib\"\nvoid main() {}")
        .with("lib", "float f() { return 1.0; }");
    let cache = SourceCache::new(false, false);

    let tree = cache.get_or_load("main", &loader).unwrap();
    assert_eq!(tree.flatten_to_string(), "float f() { return 1.0; }\nvoid main() {}\n");
    assert_eq!(tree.line_count(), 2);
}

// ============================================================================
// Include Resolution
// ============================================================================

#[test]
fn shared_include_is_one_subtree() {
    let loader = MemorySourceLoader::new()
        .with("a.vsh", "#include \"common.glsl\"\na\n")
        .with("b.fsh", "#include \"common.glsl\"\nb\n")
        .with("common.glsl", "c\n");
    let cache = SourceCache::new(true, false);

    let a = cache.get_or_load("a.vsh", &loader).unwrap();
    let b = cache.get_or_load("b.fsh", &loader).unwrap();
    let first_child = |node: &SourceNode| match node {
        SourceNode::Group(group) => group.children()[0].clone(),
        SourceNode::Leaf(_) => panic!("expected a group"),
    };
    assert!(Arc::ptr_eq(&first_child(&*a), &first_child(&*b)));
    assert_eq!(cache.entries().len(), 3);
}

#[test]
fn repeated_include_is_emitted_once() {
    let loader = MemorySourceLoader::new()
        .with("main", "#include \"lib\"\nx\n#include \"lib\"\ny\n")
        .with("lib", "l\n");
    let cache = SourceCache::new(false, false);

    let tree = cache.get_or_load("main", &loader).unwrap();
    assert_eq!(tree.flatten_to_string(), "l\nx\ny\n");
    assert_eq!(tree.compiler_string_count(), tree.compiler_strings().len());
    assert_eq!(tree.line_count(), 3);
}

#[test]
fn include_names_are_exact() {
    let loader = MemorySourceLoader::new()
        .with("main", "#include \"a/common.glsl\"\n#include \"b/common.glsl\"\n")
        .with("a/common.glsl", "from_a\n")
        .with("b/common.glsl", "from_b\n");
    let cache = SourceCache::new(true, false);

    let tree = cache.get_or_load("main", &loader).unwrap();
    assert_eq!(tree.flatten_to_string(), "from_a\nfrom_b\n");
    assert_eq!(
        cache.entries().names(),
        vec!["a/common.glsl", "b/common.glsl", "main"]
    );
}

#[test]
fn missing_include_is_reported() {
    let loader = MemorySourceLoader::new().with("main", "#include \"nowhere.glsl\"\n");
    let cache = SourceCache::new(false, false);

    let err = cache.get_or_load("main", &loader).unwrap_err();
    assert!(matches!(err, GlintError::SourceNotFound { ref name } if name == "nowhere.glsl"));
}

#[test]
fn include_cycle_is_rejected() {
    let loader = MemorySourceLoader::new()
        .with("x", "#include \"y\"\n")
        .with("y", "#include \"x\"\n");
    let cache = SourceCache::new(false, false);

    let err = cache.get_or_load("x", &loader).unwrap_err();
    assert!(matches!(err, GlintError::IncludeCycle { ref name } if name == "x"));
}

#[test]
fn inline_shader_does_not_shadow_include() -> anyhow::Result<()> {
    let loader = MemorySourceLoader::new()
        .with("common.glsl", "float from_file();\n")
        .with("main.vsh", "#include \"common.glsl\"\nvoid main() {}\n");
    let (backend, ctx) = common::context_with(loader, common::no_prewarm());

    let _inline = ctx.shader_from_source(ShaderStage::Fragment, "common.glsl", "float from_inline();\n")?;
    let main = ctx.shader_from_file(ShaderStage::Vertex, "main.vsh")?;

    let submitted = backend.submitted_sources(main.id()).unwrap().concat();
    assert!(submitted.contains("from_file"));
    assert!(!submitted.contains("from_inline"));
    Ok(())
}

#[test]
fn inline_shader_recompiles_new_text_after_release() -> anyhow::Result<()> {
    let settings = ShadingSettings {
        preload_sources: true,
        prewarm_programs: false,
        ..Default::default()
    };
    let (backend, ctx) = common::context_with(MemorySourceLoader::new(), settings);

    drop(ctx.shader_from_source(ShaderStage::Fragment, "tint.fsh", "float first();\n")?);
    let second = ctx.shader_from_source(ShaderStage::Fragment, "tint.fsh", "float second();\n")?;

    let submitted = backend.submitted_sources(second.id()).unwrap().concat();
    assert!(submitted.contains("second"));
    Ok(())
}

// ============================================================================
// Line Localization
// ============================================================================

#[test]
fn localize_two_file_include() {
    let cache = SourceCache::new(false, false);
    let tree = cache.get_or_load("A", &two_file_loader()).unwrap();

    let at = |line| {
        let loc = tree.localize_line(line).unwrap();
        (loc.file.to_string(), loc.line)
    };
    assert_eq!(at(1), ("A".to_string(), 1));
    assert_eq!(at(2), ("B".to_string(), 1));
    assert_eq!(at(4), ("B".to_string(), 3));
    assert_eq!(at(5), ("A".to_string(), 3));
    assert_eq!(at(6), ("A".to_string(), 4));
    assert!(tree.localize_line(8).is_none());
    assert!(tree.localize_line(0).is_none());
}

#[test]
fn localize_skips_preamble() {
    let cache = SourceCache::new(false, false);
    let body = cache.get_or_load("A", &two_file_loader()).unwrap();
    let unit = SourceNode::group(
        "unit",
        vec![Arc::new(SourceNode::preamble("#version 100\nprecision highp float;\n")), body],
    );

    let loc = unit.localize_line(2).unwrap();
    assert_eq!((&*loc.file, loc.line), ("preamble", 2));
    let loc = unit.localize_line(4).unwrap();
    assert_eq!((&*loc.file, loc.line), ("B", 1));
}

// ============================================================================
// Compile Diagnostics
// ============================================================================

fn failing_loader() -> MemorySourceLoader {
    MemorySourceLoader::new()
        .with("broken.vsh", "void a();\n#include \"lib.glsl\"\nvoid main() {}\n")
        .with("lib.glsl", "float f();\n#error lib is broken\n")
}

fn localized_error(backend: HeadlessBackend) -> (String, usize) {
    common::init_logger();
    let ctx = ShadingContext::new(Arc::new(backend), Arc::new(failing_loader()), common::no_prewarm());
    match ctx.shader_from_file(ShaderStage::Vertex, "broken.vsh") {
        Err(GlintError::ShaderCompile { file, line, .. }) => (file, line),
        other => panic!("expected a compile error, got {other:?}"),
    }
}

#[test]
fn compile_error_localized_with_global_lines() {
    assert_eq!(localized_error(HeadlessBackend::new()), ("lib.glsl".to_string(), 2));
}

#[test]
fn compile_error_localized_with_string_relative_lines() {
    let backend = HeadlessBackend::new().with_string_relative_lines(true);
    assert_eq!(localized_error(backend), ("lib.glsl".to_string(), 2));
}

#[test]
fn compile_error_localized_with_joined_submission() {
    let backend = HeadlessBackend::new().with_multi_string_source(false);
    assert_eq!(localized_error(backend), ("lib.glsl".to_string(), 2));
}

#[test]
fn failed_compile_is_not_cached() {
    let (backend, ctx) = common::context_with(failing_loader(), common::no_prewarm());

    assert!(ctx.shader_from_file(ShaderStage::Vertex, "broken.vsh").is_err());
    assert!(ctx.library().shaders().get("broken.vsh").is_none());
    assert_eq!(backend.live_shader_count(), 0);
}

#[test]
fn multi_string_submission_keeps_fragments_apart() {
    let (backend, ctx) = common::context_with(common::basic_loader(), common::no_prewarm());

    let shader = ctx.shader_from_file(ShaderStage::Vertex, "basic.vsh").unwrap();
    let submitted = backend.submitted_sources(shader.id()).unwrap();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0], ctx.settings().vertex_preamble);
    assert_eq!(submitted[1], common::BASIC_VSH);
    assert!(shader.was_loaded_from_file());
}
