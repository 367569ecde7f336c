use serde::Serialize;

use crate::compile::builder::{build_config, built_views};
use crate::compile::options::CompileOptions;
use crate::compile::plan::RendererConfig;
use crate::foundation::error::{GenoError, GenoResult};
use crate::ident::index::IdIndex;
use crate::layout::CompositionLayout;
use crate::layout::solver::compute_layout;
use crate::linking::resolver::{LinkingResult, resolve_links};
use crate::normalize::pass::{DroppedTrack, normalize_spec};
use crate::normalize::template::TemplateRegistry;
use crate::schema::validate::{ValidityReport, validate_spec};
use crate::spec::model::ViewDef;

/// Everything one compile produces.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOutput {
    /// Normalized tree: ids filled, templates expanded, properties inherited.
    pub spec: ViewDef,
    /// Pixel placement of every slot.
    pub layout: CompositionLayout,
    /// Configuration for the rendering runtime.
    pub config: RendererConfig,
    /// Link groups, brush projections and linking diagnostics.
    pub linking: LinkingResult,
    /// Frozen id lookups over `spec` and `layout`.
    pub index: IdIndex,
    /// Non-fatal validity messages for the input spec.
    pub validity: ValidityReport,
    /// Tracks removed during normalization.
    pub dropped: Vec<DroppedTrack>,
}

/// Compile a spec into a renderer configuration.
///
/// Stages run in order: validate, normalize, layout, link, build. Only
/// structural errors fail the compile, unless `options.strict` is set, in
/// which case any validity message does too.
#[tracing::instrument(skip(spec, options))]
pub fn compile(spec: &ViewDef, options: &CompileOptions) -> GenoResult<CompileOutput> {
    let templates = TemplateRegistry::builtin().with_templates(options.templates.iter().cloned());

    let validity = validate_spec(spec, &options.defaults);
    if options.strict && !validity.is_valid() {
        return Err(GenoError::validity(validity.to_string()));
    }
    for issue in validity.iter() {
        tracing::debug!(path = %issue.path, "{}", issue.message);
    }

    let normalized = normalize_spec(spec, &templates, &options.defaults)?;
    let layout = compute_layout(&normalized.root, &options.defaults);
    let views = built_views(&layout);
    let linking = resolve_links(&views);
    let config = build_config(&layout, &linking, options);
    let index = IdIndex::build(&normalized.root, &layout);

    tracing::debug!(
        slots = layout.slots.len(),
        zoom_groups = linking.zoom_groups.len(),
        dropped = normalized.dropped.len(),
        "compiled spec"
    );

    Ok(CompileOutput {
        spec: normalized.root,
        layout,
        config,
        linking,
        index,
        validity,
        dropped: normalized.dropped,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
