use serde::{Deserialize, Serialize};

/// Token separating the tile server from the tileset uid in a tileset URL.
pub const TILESET_SEPARATOR: &str = "/tileset_info/?d=";

/// Data kinds served by a tile server and addressed by a tileset uid.
const TILE_BASED_KINDS: [&str; 4] = ["vector", "multivec", "matrix", "beddb"];

/// Opaque data-source descriptor; only `type` and `url` are read here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataDef {
    /// Data kind, e.g. `csv`, `multivec`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Source URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Everything else, forwarded untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Server/tileset pair extracted from a tileset URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    /// Server base URL.
    pub server: String,
    /// Tileset uid.
    pub tileset_uid: String,
}

impl DataDef {
    /// Data descriptor of the given kind with no URL.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Same descriptor with `url` set.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// `true` for kinds fetched from a tile server.
    pub fn is_tile_based(&self) -> bool {
        TILE_BASED_KINDS.contains(&self.kind.as_str())
    }

    /// Server/tileset pair, when the URL has the expected shape.
    pub fn tile_source(&self) -> Option<TileSource> {
        self.url.as_deref().and_then(parse_tile_source)
    }
}

/// Split `url` on [`TILESET_SEPARATOR`]; both halves must be non-empty.
pub fn parse_tile_source(url: &str) -> Option<TileSource> {
    let (server, uid) = url.split_once(TILESET_SEPARATOR)?;
    if server.is_empty() || uid.is_empty() {
        return None;
    }
    Some(TileSource {
        server: server.to_owned(),
        tileset_uid: uid.to_owned(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/spec/data.rs"]
mod tests;
