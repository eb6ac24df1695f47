//! Program prewarming
//!
//! Many drivers defer the final translation of a program until its first
//! draw, which shows up as a hitch the first time an object using it comes
//! into view. Prewarming forces that work right after linking by drawing one
//! off-screen primitive with every uniform set to a neutral value.

use super::Program;

impl Program {
    /// Binds the program, writes neutral uniform values and issues one
    /// throwaway draw. Samplers receive their own texture units.
    ///
    /// Calling this again on a prewarmed program does nothing.
    pub fn prewarm(&self) {
        if self.is_prewarmed() {
            return;
        }
        self.bind();
        self.write_neutral_values();
        self.backend().draw_prewarm_primitive(self.id());
        self.mark_prewarmed();
        log::debug!("Prewarmed program '{}'", self.name());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::backend::{HeadlessBackend, ShaderStage};
    use crate::program::{BindingState, LinkContext, Program};
    use crate::settings::ShadingSettings;
    use crate::shader::ShaderLibrary;
    use crate::semantics::SemanticRegistry;
    use crate::source::MemorySourceLoader;

    #[test]
    fn test_prewarm_draws_once() {
        let backend = Arc::new(HeadlessBackend::new());
        let settings = ShadingSettings::default();
        let library = ShaderLibrary::new(backend.clone(), Arc::new(MemorySourceLoader::new()), &settings);
        let vertex = library
            .shader_from_source(
                ShaderStage::Vertex,
                "v",
                "attribute vec4 a_cc3Position;\nuniform mat4 u_cc3MatrixModelViewProj;\nvoid main() { gl_Position = u_cc3MatrixModelViewProj * a_cc3Position; }\n",
            )
            .unwrap();
        let fragment = library
            .shader_from_source(
                ShaderStage::Fragment,
                "f",
                "uniform sampler2D s_cc3Textures[2];\nvoid main() { gl_FragColor = vec4(1.0); }\n",
            )
            .unwrap();

        let context = LinkContext {
            backend: backend.clone(),
            delegate: Arc::new(SemanticRegistry::with_default_mappings(&settings)),
            binding: Arc::new(BindingState::new()),
            allow_default_values: false,
        };
        let program = Program::link("v-f", vertex, fragment, &context).unwrap();

        program.prewarm();
        program.prewarm();

        assert!(program.is_prewarmed());
        assert_eq!(backend.stats().prewarm_draws, 1);
        let samplers = program.uniform("s_cc3Textures").unwrap();
        let written = backend.uniform_value(program.id(), samplers.location()).unwrap();
        assert_eq!(written, crate::program::UniformValue::IntArray([0, 1].into_iter().collect()));
    }
}
