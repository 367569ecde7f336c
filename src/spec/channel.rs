use serde::{Deserialize, Serialize};

/// Closed set of visual channels a track can bind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ChannelKey {
    /// Primary horizontal position.
    X,
    /// Horizontal end position.
    Xe,
    /// Secondary horizontal start (links).
    X1,
    /// Secondary horizontal end (links).
    X1e,
    /// Primary vertical position.
    Y,
    /// Vertical end position.
    Ye,
    /// Secondary vertical start.
    Y1,
    /// Secondary vertical end.
    Y1e,
    /// Row assignment.
    Row,
    /// Fill color.
    Color,
    /// Mark size.
    Size,
    /// Text content.
    Text,
    /// Stroke color.
    Stroke,
    /// Stroke width.
    StrokeWidth,
    /// Opacity.
    Opacity,
}

impl ChannelKey {
    /// Every channel, in declaration order.
    pub const ALL: [ChannelKey; 15] = [
        Self::X,
        Self::Xe,
        Self::X1,
        Self::X1e,
        Self::Y,
        Self::Ye,
        Self::Y1,
        Self::Y1e,
        Self::Row,
        Self::Color,
        Self::Size,
        Self::Text,
        Self::Stroke,
        Self::StrokeWidth,
        Self::Opacity,
    ];

    /// Position channels that may carry genomic bindings and linking ids.
    pub const GENOMIC: [ChannelKey; 8] = [
        Self::X,
        Self::Xe,
        Self::X1,
        Self::X1e,
        Self::Y,
        Self::Ye,
        Self::Y1,
        Self::Y1e,
    ];

    /// JSON name of the channel.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Xe => "xe",
            Self::X1 => "x1",
            Self::X1e => "x1e",
            Self::Y => "y",
            Self::Ye => "ye",
            Self::Y1 => "y1",
            Self::Y1e => "y1e",
            Self::Row => "row",
            Self::Color => "color",
            Self::Size => "size",
            Self::Text => "text",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "strokeWidth",
            Self::Opacity => "opacity",
        }
    }

    /// `true` for x/y style position channels.
    pub fn is_position(self) -> bool {
        match self {
            Self::X
            | Self::Xe
            | Self::X1
            | Self::X1e
            | Self::Y
            | Self::Ye
            | Self::Y1
            | Self::Y1e => true,
            Self::Row
            | Self::Color
            | Self::Size
            | Self::Text
            | Self::Stroke
            | Self::StrokeWidth
            | Self::Opacity => false,
        }
    }
}

impl std::fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a bound data field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Genome coordinates.
    Genomic,
    /// Continuous numbers.
    Quantitative,
    /// Categories.
    Nominal,
}

/// Side on which an axis is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisPosition {
    /// Axis explicitly hidden.
    None,
    /// Above the track.
    Top,
    /// Below the track.
    Bottom,
    /// Left of the track.
    Left,
    /// Right of the track.
    Right,
}

impl AxisPosition {
    /// Axis side after rotating a horizontal track into vertical orientation.
    pub fn rotated_for_vertical(self) -> Self {
        match self {
            Self::Top => Self::Left,
            Self::Bottom => Self::Right,
            other => other,
        }
    }
}

/// A channel bound to a data field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Data field name.
    pub field: String,
    /// Declared field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Axis placement for position channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisPosition>,
    /// Zoom/pan/brush linking id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linking_id: Option<String>,
    /// Scale domain (opaque to the compiler).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<serde_json::Value>,
    /// Scale range (opaque to the compiler).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<serde_json::Value>,
    /// Show a legend for this channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<bool>,
    /// Aggregation function name (opaque to the compiler).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,
    /// Draw grid lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
}

impl FieldDef {
    /// A field binding with no optional settings.
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: field.into(),
            field_type,
            axis: None,
            linking_id: None,
            domain: None,
            range: None,
            legend: None,
            aggregate: None,
            grid: None,
        }
    }

    /// `true` when bound to genome coordinates.
    pub fn is_genomic(&self) -> bool {
        self.field_type == FieldType::Genomic
    }
}

/// A channel bound to a constant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueDef {
    /// The constant (number, string, ...).
    pub value: serde_json::Value,
}

/// A channel binding: either a data field or a constant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelDef {
    /// Data-field binding.
    Field(FieldDef),
    /// Constant value.
    Value(ValueDef),
}

impl ChannelDef {
    /// Constant channel helper.
    pub fn value(v: impl Into<serde_json::Value>) -> Self {
        Self::Value(ValueDef { value: v.into() })
    }

    /// The field binding, if any.
    pub fn as_field(&self) -> Option<&FieldDef> {
        match self {
            Self::Field(f) => Some(f),
            Self::Value(_) => None,
        }
    }

    /// Mutable field binding, if any.
    pub fn as_field_mut(&mut self) -> Option<&mut FieldDef> {
        match self {
            Self::Field(f) => Some(f),
            Self::Value(_) => None,
        }
    }

    /// The field binding when it is genomic.
    pub fn genomic(&self) -> Option<&FieldDef> {
        self.as_field().filter(|f| f.is_genomic())
    }

    /// Mutable genomic field binding.
    pub fn genomic_mut(&mut self) -> Option<&mut FieldDef> {
        self.as_field_mut().filter(|f| f.is_genomic())
    }

    /// Linking id of a genomic binding.
    pub fn linking_id(&self) -> Option<&str> {
        self.genomic().and_then(|f| f.linking_id.as_deref())
    }
}
