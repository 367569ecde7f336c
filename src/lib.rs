#![forbid(unsafe_code)]

//! Compile declarative genome-visualization specs into renderer configurations.
//!
//! A spec is a tree of views and tracks. [`compile()`] normalizes it, lays it
//! out (linear or circular), resolves linked zoom groups and brushes, and
//! emits one renderer view per layout slot.

pub mod compile;
pub mod foundation;
pub mod ident;
pub mod layout;
pub mod linking;
pub mod normalize;
pub mod schema;
pub mod spec;
pub mod traverse;

pub use compile::builder::{BuiltView, build_config, built_views};
pub use compile::compiler::{CompileOutput, compile};
pub use compile::options::{CompileDefaults, CompileOptions};
pub use compile::plan::{FragmentKind, LockTable, RendererConfig, RendererView, TrackFragment, TrackSlots};
pub use compile::shapes::{RenderedShape, ViewShape, aggregate_view_shapes};
pub use foundation::error::{GenoError, GenoResult};
pub use foundation::geometry::{BoundingBox, PolarPlacement, RelativeBox, Size};
pub use foundation::ids::SlotIdx;
pub use ident::index::IdIndex;
pub use ident::resolver::{collect_track_ids, collect_track_ids_from, collect_view_ids, find_node_by_id};
pub use layout::solver::compute_layout;
pub use layout::{CompositionLayout, LayoutSlot};
pub use linking::resolver::{BrushProjection, LinkIssue, LinkRelation, LinkingResult, ZoomGroup, resolve_links};
pub use normalize::overlay::resolve_overlay;
pub use normalize::pass::{DroppedTrack, NormalizedSpec, normalize_spec};
pub use normalize::template::{TemplateDef, TemplateRegistry};
pub use schema::validate::{ValidityIssue, ValidityReport, validate_spec};
pub use spec::channel::{AxisPosition, ChannelDef, ChannelKey, FieldDef, FieldType};
pub use spec::model::{TrackDef, ViewDef};
pub use traverse::{NodePath, NodeRef, Walk, walk};
