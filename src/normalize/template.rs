use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{GenoError, GenoResult};
use crate::spec::channel::{ChannelDef, ChannelKey, FieldType};
use crate::spec::model::{Mark, StyleDef, TrackDef};

/// A named composite-mark preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDef {
    /// Name referenced by `track.template`.
    pub name: String,
    /// Channels a user binds through `track.encoding`.
    #[serde(default)]
    pub channels: Vec<TemplateChannelSpec>,
    /// One entry per drawn layer.
    pub mark: Vec<TemplateLayerDef>,
}

/// A channel a template accepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateChannelSpec {
    /// Binding name, e.g. `startPosition`.
    pub name: String,
    /// Expected field type of the user's binding.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Expansion fails when the user leaves this unbound.
    #[serde(default)]
    pub required: bool,
}

/// One layer of a template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLayerDef {
    /// Mark of this layer.
    pub mark: Mark,
    /// Channel assignments of this layer.
    #[serde(default)]
    pub encoding: BTreeMap<ChannelKey, TemplateChannelDef>,
    /// Extra data transforms for this layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_transform: Option<Vec<serde_json::Value>>,
    /// Layer style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleDef>,
}

/// A layer channel: a user binding (possibly adjusted) or a fixed binding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateChannelDef {
    /// Take the user's binding named `base`, then overwrite the listed properties.
    Base {
        /// Template channel name.
        base: String,
        /// Properties replaced on the user's binding.
        #[serde(flatten)]
        overrides: serde_json::Map<String, serde_json::Value>,
    },
    /// Binding used as-is.
    Fixed(ChannelDef),
}

/// Templates by name.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    by_name: BTreeMap<String, TemplateDef>,
}

impl TemplateRegistry {
    /// Registry holding `gene`, `sequence` and `ideogram`.
    pub fn builtin() -> Self {
        Self::default().with_templates([gene_template(), sequence_template(), ideogram_template()])
    }

    /// Add templates, replacing any with the same name.
    pub fn with_templates(mut self, templates: impl IntoIterator<Item = TemplateDef>) -> Self {
        for t in templates {
            self.by_name.insert(t.name.clone(), t);
        }
        self
    }

    /// Template by name.
    pub fn get(&self, name: &str) -> Option<&TemplateDef> {
        self.by_name.get(name)
    }

    /// Replace a template reference with an overlay group of the template's layers.
    ///
    /// Tracks without `template` are returned unchanged. Unknown templates,
    /// missing required bindings, and bindings of the wrong field type are
    /// [`GenoError::Template`] errors.
    pub fn expand(&self, track: &TrackDef) -> GenoResult<TrackDef> {
        let Some(name) = track.template.as_deref() else {
            return Ok(track.clone());
        };
        let template = self
            .get(name)
            .ok_or_else(|| GenoError::template(format!("unknown template '{name}'")))?;
        let encoding = track.encoding.clone().unwrap_or_default();

        for spec in &template.channels {
            match encoding.get(&spec.name) {
                None if spec.required => {
                    return Err(GenoError::template(format!(
                        "template '{name}' requires channel '{}'",
                        spec.name
                    )));
                }
                Some(ChannelDef::Field(f)) => {
                    if let Some(want) = spec.field_type
                        && f.field_type != want
                    {
                        return Err(GenoError::template(format!(
                            "template '{name}' channel '{}' expects a {want:?} field",
                            spec.name
                        )));
                    }
                }
                _ => {}
            }
        }

        let mut layers = Vec::with_capacity(template.mark.len());
        for layer in &template.mark {
            let mut out = TrackDef {
                mark: Some(layer.mark),
                data_transform: layer.data_transform.clone(),
                style: layer.style.clone(),
                ..TrackDef::default()
            };
            for (&key, def) in &layer.encoding {
                let bound = match def {
                    TemplateChannelDef::Fixed(c) => Some(c.clone()),
                    TemplateChannelDef::Base { base, overrides } => encoding
                        .get(base)
                        .map(|b| apply_overrides(b, overrides))
                        .transpose()?,
                };
                out.set_channel(key, bound);
            }
            layers.push(out);
        }

        let mut group = track.clone();
        group.template = None;
        group.encoding = None;
        group.overlay = Some(layers);
        Ok(group)
    }
}

fn apply_overrides(
    binding: &ChannelDef,
    overrides: &serde_json::Map<String, serde_json::Value>,
) -> GenoResult<ChannelDef> {
    if overrides.is_empty() {
        return Ok(binding.clone());
    }
    let mut v = serde_json::to_value(binding)?;
    if let Some(obj) = v.as_object_mut() {
        for (k, val) in overrides {
            obj.insert(k.clone(), val.clone());
        }
    }
    Ok(serde_json::from_value(v)?)
}

fn channel(name: &str, field_type: Option<FieldType>, required: bool) -> TemplateChannelSpec {
    TemplateChannelSpec {
        name: name.to_owned(),
        field_type,
        required,
    }
}

fn base(name: &str) -> TemplateChannelDef {
    TemplateChannelDef::Base {
        base: name.to_owned(),
        overrides: serde_json::Map::new(),
    }
}

fn layer<const N: usize>(mark: Mark, encoding: [(ChannelKey, TemplateChannelDef); N]) -> TemplateLayerDef {
    TemplateLayerDef {
        mark,
        encoding: encoding.into_iter().collect(),
        data_transform: None,
        style: None,
    }
}

fn gene_template() -> TemplateDef {
    TemplateDef {
        name: "gene".to_owned(),
        channels: vec![
            channel("startPosition", Some(FieldType::Genomic), true),
            channel("endPosition", Some(FieldType::Genomic), true),
            channel("strandColor", Some(FieldType::Nominal), false),
            channel("strandRow", Some(FieldType::Nominal), false),
            channel("geneName", Some(FieldType::Nominal), false),
        ],
        mark: vec![
            layer(
                Mark::Rule,
                [
                    (ChannelKey::X, base("startPosition")),
                    (ChannelKey::Xe, base("endPosition")),
                    (ChannelKey::Row, base("strandRow")),
                    (ChannelKey::Color, base("strandColor")),
                    (ChannelKey::StrokeWidth, TemplateChannelDef::Fixed(ChannelDef::value(1))),
                ],
            ),
            layer(
                Mark::Rect,
                [
                    (ChannelKey::X, base("startPosition")),
                    (ChannelKey::Xe, base("endPosition")),
                    (ChannelKey::Row, base("strandRow")),
                    (ChannelKey::Color, base("strandColor")),
                ],
            ),
            layer(
                Mark::Text,
                [
                    (ChannelKey::X, base("startPosition")),
                    (ChannelKey::Xe, base("endPosition")),
                    (ChannelKey::Row, base("strandRow")),
                    (ChannelKey::Text, base("geneName")),
                ],
            ),
        ],
    }
}

fn sequence_template() -> TemplateDef {
    TemplateDef {
        name: "sequence".to_owned(),
        channels: vec![
            channel("startPosition", Some(FieldType::Genomic), true),
            channel("endPosition", Some(FieldType::Genomic), false),
            channel("barLength", Some(FieldType::Quantitative), true),
            channel("baseColor", Some(FieldType::Nominal), true),
        ],
        mark: vec![
            layer(
                Mark::Bar,
                [
                    (ChannelKey::X, base("startPosition")),
                    (ChannelKey::Xe, base("endPosition")),
                    (ChannelKey::Y, base("barLength")),
                    (ChannelKey::Color, base("baseColor")),
                ],
            ),
            layer(
                Mark::Text,
                [
                    (ChannelKey::X, base("startPosition")),
                    (ChannelKey::Xe, base("endPosition")),
                    (ChannelKey::Text, base("baseColor")),
                    (ChannelKey::Color, TemplateChannelDef::Fixed(ChannelDef::value("white"))),
                ],
            ),
        ],
    }
}

fn ideogram_template() -> TemplateDef {
    TemplateDef {
        name: "ideogram".to_owned(),
        channels: vec![
            channel("startPosition", Some(FieldType::Genomic), true),
            channel("endPosition", Some(FieldType::Genomic), true),
            channel("stainBackgroundColor", Some(FieldType::Nominal), true),
            channel("name", Some(FieldType::Nominal), false),
        ],
        mark: vec![
            layer(
                Mark::Rect,
                [
                    (ChannelKey::X, base("startPosition")),
                    (ChannelKey::Xe, base("endPosition")),
                    (ChannelKey::Color, base("stainBackgroundColor")),
                ],
            ),
            layer(
                Mark::Text,
                [
                    (ChannelKey::X, base("startPosition")),
                    (ChannelKey::Xe, base("endPosition")),
                    (ChannelKey::Text, base("name")),
                    (ChannelKey::Color, TemplateChannelDef::Fixed(ChannelDef::value("black"))),
                ],
            ),
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/template.rs"]
mod tests;
