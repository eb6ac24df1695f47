//! Cache Integration Tests
//!
//! Tests for:
//! - Idempotent shader and program factories
//! - Weak (observed) vs. pinned (preloading) retention
//! - Explicit add / remove / remove_all
//! - Scene-begin broadcast to live programs

mod common;

use std::sync::Arc;

use glint::{GlintError, Program, ShaderStage, ShadingSettings};

fn preloading() -> ShadingSettings {
    ShadingSettings {
        preload_sources: true,
        preload_shaders: true,
        preload_programs: true,
        prewarm_programs: false,
        ..Default::default()
    }
}

// ============================================================================
// Idempotent Factories
// ============================================================================

#[test]
fn shader_factory_returns_cached_instance() {
    let (backend, ctx) = common::context_with(common::basic_loader(), common::no_prewarm());

    let first = ctx.shader_from_file(ShaderStage::Vertex, "basic.vsh").unwrap();
    let second = ctx.shader_from_file(ShaderStage::Vertex, "basic.vsh").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(backend.stats().shaders_compiled, 1);
}

#[test]
fn program_factory_returns_cached_instance() {
    let (backend, ctx) = common::context_with(common::basic_loader(), common::no_prewarm());

    let first = ctx.program_from_files("basic.vsh", "basic.fsh").unwrap();
    let second = ctx.program_from_files("basic.vsh", "basic.fsh").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.name(), "basic.vsh-basic.fsh");

    let stats = backend.stats();
    assert_eq!(stats.shaders_compiled, 2);
    assert_eq!(stats.programs_linked, 1);
}

#[test]
fn inline_source_shares_cache_by_name() {
    let (backend, ctx) = common::context_with(common::basic_loader(), common::no_prewarm());

    let a = ctx
        .shader_from_source(ShaderStage::Fragment, "inline.fsh", common::BASIC_FSH)
        .unwrap();
    let b = ctx
        .shader_from_source(ShaderStage::Fragment, "inline.fsh", "ignored on a hit\n")
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!a.was_loaded_from_file());
    assert_eq!(backend.stats().shaders_compiled, 1);
}

#[test]
fn hyphenated_names_key_distinct_programs() -> anyhow::Result<()> {
    let loader = glint::source::MemorySourceLoader::new()
        .with("x", common::BASIC_VSH)
        .with("x-y", common::BASIC_VSH)
        .with("y-z", common::BASIC_FSH)
        .with("z", common::BASIC_FSH);
    let (backend, ctx) = common::context_with(loader, common::no_prewarm());

    let first = ctx.program_from_files("x", "y-z")?;
    let second = ctx.program_from_files("x-y", "z")?;
    assert!(!Arc::ptr_eq(&first, &second));
    assert_ne!(first.name(), second.name());
    assert_eq!(second.vertex_shader().name(), "x-y");
    assert_eq!(second.fragment_shader().name(), "z");
    assert_eq!(backend.stats().programs_linked, 2);

    assert_eq!(Program::name_for("a.vsh", "b.fsh"), "a.vsh-b.fsh");
    assert_ne!(Program::name_for("a\\", "b"), Program::name_for("a", "\\b"));
    Ok(())
}

#[test]
fn cached_program_with_other_shaders_is_rejected() -> anyhow::Result<()> {
    let loader = common::basic_loader().with("other.fsh", "uniform vec4 u_cc3FogColor;\nvoid main() {}\n");
    let (_, ctx) = common::context_with(loader, common::no_prewarm());

    let vertex = ctx.shader_from_file(ShaderStage::Vertex, "basic.vsh")?;
    let fragment = ctx.shader_from_file(ShaderStage::Fragment, "basic.fsh")?;
    let misnamed = Arc::new(Program::link(
        &Program::name_for("basic.vsh", "other.fsh"),
        vertex,
        fragment,
        &ctx.link_context(),
    )?);
    ctx.programs().add(&misnamed)?;

    let err = ctx.program_from_files("basic.vsh", "other.fsh").unwrap_err();
    assert!(matches!(
        err,
        GlintError::ProgramShaderMismatch { ref cached_fragment, .. } if cached_fragment == "basic.fsh"
    ));
    Ok(())
}

// ============================================================================
// Retention
// ============================================================================

#[test]
fn observed_entries_expire_with_their_owners() {
    let (backend, ctx) = common::context_with(common::basic_loader(), common::no_prewarm());

    let program = ctx.program_from_files("basic.vsh", "basic.fsh").unwrap();
    assert_eq!(ctx.programs().entries().len(), 1);
    assert_eq!(ctx.library().shaders().entries().len(), 2);

    drop(program);
    assert!(ctx.programs().get("basic.vsh-basic.fsh").is_none());
    assert!(ctx.library().shaders().get("basic.vsh").is_none());
    assert_eq!(backend.live_program_count(), 0);
    assert_eq!(backend.live_shader_count(), 0);

    ctx.program_from_files("basic.vsh", "basic.fsh").unwrap();
    assert_eq!(backend.stats().programs_linked, 2);
}

#[test]
fn preloaded_entries_survive_until_unpinned() {
    let (backend, ctx) = common::context_with(common::basic_loader(), preloading());

    drop(ctx.program_from_files("basic.vsh", "basic.fsh").unwrap());
    assert!(ctx.programs().get("basic.vsh-basic.fsh").is_some());
    assert!(ctx.library().sources().entries().get("basic.vsh").is_some());

    ctx.unpin_all();
    assert!(ctx.programs().get("basic.vsh-basic.fsh").is_none());
    assert_eq!(backend.live_program_count(), 0);
    assert_eq!(backend.live_shader_count(), 0);
}

#[test]
fn preloading_switch_affects_later_entries_only() {
    let (_, ctx) = common::context_with(common::basic_loader(), preloading());

    drop(ctx.shader_from_file(ShaderStage::Vertex, "basic.vsh").unwrap());
    ctx.set_preloading(false);
    drop(ctx.shader_from_file(ShaderStage::Fragment, "basic.fsh").unwrap());

    let shaders = ctx.library().shaders();
    assert!(shaders.entries().is_pinned("basic.vsh"));
    assert!(shaders.get("basic.vsh").is_some());
    assert!(shaders.get("basic.fsh").is_none());
}

// ============================================================================
// Explicit Management
// ============================================================================

#[test]
fn duplicate_add_is_rejected() {
    let (_, ctx) = common::context_with(common::basic_loader(), common::no_prewarm());
    let program = ctx.program_from_files("basic.vsh", "basic.fsh").unwrap();

    let err = ctx.programs().add(&program).unwrap_err();
    assert!(matches!(
        err,
        GlintError::DuplicateCacheEntry { cache: "ProgramCache", ref name } if name == "basic.vsh-basic.fsh"
    ));
}

#[test]
fn removed_program_is_relinked() {
    let (backend, ctx) = common::context_with(common::basic_loader(), preloading());

    let first = ctx.program_from_files("basic.vsh", "basic.fsh").unwrap();
    assert!(ctx.programs().remove("basic.vsh-basic.fsh").is_some());

    let second = ctx.program_from_files("basic.vsh", "basic.fsh").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(backend.stats().programs_linked, 2);
    // Shaders stayed cached.
    assert_eq!(backend.stats().shaders_compiled, 2);

    ctx.programs().remove_all();
    assert!(ctx.programs().entries().is_empty());
    assert_eq!(ctx.library().shaders().entries().len(), 2);
}

#[test]
fn begin_scene_reaches_every_live_program() -> anyhow::Result<()> {
    let loader = common::basic_loader().with(
        "other.fsh",
        "uniform vec4 u_cc3FogColor;\nvoid main() {}\n",
    );
    let (_, ctx) = common::context_with(loader, common::no_prewarm());
    let basic = ctx.program_from_files("basic.vsh", "basic.fsh")?;
    let other = ctx.program_from_files("basic.vsh", "other.fsh")?;
    let scene = common::lit_scene();

    for program in [&basic, &other] {
        program.bind_for_node(&scene)?;
        program.bind_for_node(&scene)?;
        assert_eq!(program.stats().scene_populations, 1);
    }

    ctx.begin_scene();
    for program in [&basic, &other] {
        program.bind_for_node(&scene)?;
        assert_eq!(program.stats().scene_populations, 2);
    }
    Ok(())
}
