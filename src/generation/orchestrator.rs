//! Generation orchestration - coordinates the generation workflow

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::generation::{
    Artifact, Capability, GenerateOptions, GenerationError, GenerationReport, Markers,
    OutputService, Renderer, TemplateLoader, TemplateSource, TemplateSpec, blocks,
};
use crate::registry::{TypeConfig, TypeRegistry};

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    template_loader: Arc<dyn TemplateLoader>,
    output_service: Arc<dyn OutputService>,
    renderer: Renderer,
    markers: Markers,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(
        template_loader: Arc<dyn TemplateLoader>,
        output_service: Arc<dyn OutputService>,
        renderer: Renderer,
        markers: Markers,
    ) -> Self {
        Self {
            template_loader,
            output_service,
            renderer,
            markers,
        }
    }

    /// Read every template named in `specs` from `template_dir`
    pub async fn load_templates(
        &self,
        template_dir: &Path,
        specs: &[TemplateSpec],
        placeholder_name: &str,
    ) -> Result<Vec<TemplateSource>, GenerationError> {
        let mut templates = Vec::with_capacity(specs.len());
        for spec in specs {
            let suffix = spec.resolve_suffix(placeholder_name).ok_or_else(|| {
                GenerationError::MissingSuffix {
                    template: spec.source.clone(),
                }
            })?;
            let template = self.template_loader.load(template_dir, spec, suffix).await?;
            tracing::debug!(
                template = %template.name,
                path = %template.path.display(),
                bytes = template.content.len(),
                "Loaded template"
            );
            templates.push(template);
        }
        Ok(templates)
    }

    /// Remove the sections `config` lacks the capability for
    pub fn specialize(
        &self,
        template: &TemplateSource,
        config: &TypeConfig,
    ) -> Result<String, GenerationError> {
        let mut text = template.content.clone();
        for capability in Capability::all() {
            let marker = self.markers.label(capability);
            text = blocks::strip(&text, marker, capability.enabled_for(config)).map_err(
                |source| GenerationError::MalformedTemplate {
                    template: template.name.clone(),
                    type_name: config.canonical_name.clone(),
                    marker: marker.to_string(),
                    source,
                },
            )?;
        }
        Ok(text)
    }

    /// Specialize and render every (type, template) pair in memory
    pub fn render_all(
        &self,
        registry: &TypeRegistry,
        templates: &[TemplateSource],
    ) -> Result<Vec<Artifact>, GenerationError> {
        let template_paths: HashSet<&PathBuf> = templates.iter().map(|t| &t.path).collect();
        let mut output_paths = HashSet::new();
        let mut artifacts = Vec::with_capacity(registry.len() * templates.len());

        for config in registry {
            for template in templates {
                let path = template.output_path(config);
                if template_paths.contains(&path) {
                    return Err(GenerationError::OutputOverwritesTemplate {
                        type_name: config.canonical_name.clone(),
                        path,
                    });
                }
                if !output_paths.insert(path.clone()) {
                    return Err(GenerationError::DuplicateOutput { path });
                }

                let specialized = self.specialize(template, config)?;
                let content = self
                    .renderer
                    .render(&template.name, &specialized, config)
                    .map_err(|source| GenerationError::Render {
                        template: template.name.clone(),
                        type_name: config.canonical_name.clone(),
                        source,
                    })?;

                tracing::debug!(
                    template = %template.name,
                    type_name = %config.canonical_name,
                    path = %path.display(),
                    "Rendered artifact"
                );
                artifacts.push(Artifact {
                    path,
                    content,
                    template: template.name.clone(),
                    type_name: config.canonical_name.clone(),
                });
            }
        }
        Ok(artifacts)
    }

    /// Execute the generation workflow.
    ///
    /// Nothing is written unless every artifact renders.
    pub async fn generate(
        &self,
        registry: &TypeRegistry,
        template_dir: &Path,
        specs: &[TemplateSpec],
        placeholder_name: &str,
        options: GenerateOptions,
    ) -> Result<GenerationReport, GenerationError> {
        if registry.is_empty() {
            tracing::warn!("Type registry is empty, nothing to generate");
        }

        // 1. Load templates
        let templates = self
            .load_templates(template_dir, specs, placeholder_name)
            .await?;

        // 2. Render everything before touching the filesystem
        let artifacts = self.render_all(registry, &templates)?;

        tracing::debug!(
            "Orchestrator rendered {} artifacts for {} types",
            artifacts.len(),
            registry.len()
        );

        // 3. Write
        if options.dry_run {
            tracing::info!(count = artifacts.len(), "Dry run, skipping writes");
            return Ok(GenerationReport {
                artifacts,
                written: false,
            });
        }
        self.output_service.write_artifacts(&artifacts).await?;

        Ok(GenerationReport {
            artifacts,
            written: true,
        })
    }
}
