//! Persisted data model of a bento page.
//!
//! Field names serialize in camelCase so snapshots stay interchangeable with
//! JSON exported by the web editor.

use std::fmt;
use std::str::FromStr;

use bento_grid::Rect;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use bento_grid::{Position, Size};

/// Opaque unique block identifier (e.g. `block-1718000000000-k3j9x0a`).
pub type BlockId = String;

/// Current time as an ISO-8601 UTC timestamp with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generates a fresh block id from the current time and a random suffix.
pub fn generate_block_id() -> BlockId {
    let suffix: String = uuid::Uuid::new_v4().simple().to_string().chars().take(7).collect();
    format!("block-{}-{}", Utc::now().timestamp_millis(), suffix)
}

// ---------------------------------------------------------------------------
// Block types
// ---------------------------------------------------------------------------

/// Kind of content a block displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// External link card.
    Link,
    /// Free text.
    Text,
    /// Picture.
    Image,
    /// Section title spanning the grid.
    Title,
    /// Embedded map.
    Map,
}

impl BlockType {
    /// All block types, in menu order.
    pub const ALL: [BlockType; 5] = [
        BlockType::Link,
        BlockType::Text,
        BlockType::Image,
        BlockType::Title,
        BlockType::Map,
    ];

    /// Footprint a new block of this type gets when none is requested.
    pub fn default_size(self) -> Size {
        match self {
            BlockType::Image | BlockType::Map | BlockType::Text => Size::new(2, 4),
            BlockType::Title => Size::new(4, 1),
            BlockType::Link => Size::new(2, 1),
        }
    }

    /// Placeholder content for a new block of this type.
    pub fn default_content(self) -> BlockContent {
        match self {
            BlockType::Link => BlockContent {
                title: Some("Mon Lien".to_string()),
                url: Some("https://example.com".to_string()),
                ..Default::default()
            },
            BlockType::Text => BlockContent {
                text: Some("Votre texte ici...".to_string()),
                ..Default::default()
            },
            BlockType::Title => BlockContent {
                title: Some("Titre".to_string()),
                ..Default::default()
            },
            BlockType::Image => BlockContent {
                src: Some(String::new()),
                alt: Some("Image".to_string()),
                ..Default::default()
            },
            BlockType::Map => BlockContent {
                lat: Some(50.0),
                lng: Some(10.0),
                zoom: Some(4),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BlockType::Link => "link",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Title => "title",
            BlockType::Map => "map",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing BlockType from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBlockTypeError(pub String);

impl fmt::Display for ParseBlockTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid block type: {} (expected link, text, image, title or map)",
            self.0
        )
    }
}

impl std::error::Error for ParseBlockTypeError {}

impl FromStr for BlockType {
    type Err = ParseBlockTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "link" => Ok(BlockType::Link),
            "text" => Ok(BlockType::Text),
            "image" => Ok(BlockType::Image),
            "title" => Ok(BlockType::Title),
            "map" => Ok(BlockType::Map),
            _ => Err(ParseBlockTypeError(s.to_string())),
        }
    }
}

/// Social network a link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// twitter.com / x.com
    Twitter,
    /// instagram.com
    Instagram,
    /// linkedin.com
    Linkedin,
    /// github.com
    Github,
    /// youtube.com
    Youtube,
    /// tiktok.com
    Tiktok,
    /// facebook.com
    Facebook,
    /// Anything else.
    Other,
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// Block payload. The layout engine never looks inside.
///
/// Keys this struct does not know about are kept in `extra` so content
/// written by newer editors survives a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockContent {
    /// Heading for link, title and map blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Secondary line under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Icon name or URL shown next to a link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Body of a text block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Image alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Social network detected from `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Handle on `platform`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Map center latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Map center longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Map zoom level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u32>,
    /// Keys not modelled above, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlockContent {
    /// Overlays every field set in `other` onto `self`.
    pub fn merge(&mut self, other: BlockContent) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        overlay!(title, description, url, icon, text, src, alt, platform, username, lat, lng, zoom);
        self.extra.extend(other.extra);
    }

    /// Returns `self` with `other` overlaid.
    pub fn merged(mut self, other: BlockContent) -> Self {
        self.merge(other);
        self
    }
}

/// Per-block style overrides (CSS values).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    /// Card background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Card text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Corner radius, e.g. `12px`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    /// Border color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Border width, e.g. `1px`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
}

/// A positioned, sized unit of content on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier.
    pub id: BlockId,
    /// Content kind.
    #[serde(rename = "type")]
    pub kind: BlockType,
    /// Top-left cell.
    pub position: Position,
    /// Footprint in cells.
    pub size: Size,
    /// Payload.
    #[serde(default)]
    pub content: BlockContent,
    /// Optional style overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BlockStyle>,
}

impl Block {
    /// Grid rectangle covered by this block.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

// ---------------------------------------------------------------------------
// Page sections
// ---------------------------------------------------------------------------

/// Page-wide colors and typography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    /// Page background.
    pub background_color: String,
    /// Accent for links and buttons.
    pub primary_color: String,
    /// Second accent.
    pub secondary_color: String,
    /// Default text color.
    pub text_color: String,
    /// CSS font stack.
    pub font_family: String,
    /// Default card corner radius.
    pub border_radius: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: "#F9FAFB".to_string(),
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#8b5cf6".to_string(),
            text_color: "#1f2937".to_string(),
            font_family: "Inter, system-ui, sans-serif".to_string(),
            border_radius: "12px".to_string(),
        }
    }
}

/// Grid settings. Only `columns` constrains layout; the rest is presentational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Grid {
    /// Fixed column count.
    pub columns: u32,
    /// Gap between cells in pixels.
    pub gap: u32,
    /// CSS max width of the page.
    pub max_width: String,
    /// Row height in pixels.
    pub row_height: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            columns: 4,
            gap: 32,
            max_width: "900px".to_string(),
            row_height: 68,
        }
    }
}

/// Owner card shown in the fixed left column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Short description under the name.
    pub bio: String,
    /// Image URL or data URI; empty for none.
    pub avatar: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Votre Nom".to_string(),
            bio: "Une courte description de vous...".to_string(),
            avatar: String::new(),
        }
    }
}

/// Document metadata. Timestamps are ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Page author.
    pub author: String,
    /// Set once when the page is created.
    pub created_at: String,
    /// Refreshed by every save.
    pub updated_at: String,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = timestamp_now();
        Self {
            title: "Mon Bento".to_string(),
            description: "Ma page Bento personnalisée".to_string(),
            author: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Whole page configuration, as persisted and exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BentoConfig {
    /// Document metadata.
    pub metadata: Metadata,
    /// Colors and typography.
    pub theme: Theme,
    /// Grid width and spacing.
    pub grid: Grid,
    /// Owner card.
    pub profile: Profile,
    /// Blocks in display order. Ids are unique.
    pub blocks: Vec<Block>,
}

impl BentoConfig {
    /// Looks up a block by id.
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Index of the block with `id` in the block list.
    pub fn block_index(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Partial theme update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeUpdate {
    /// Replaces `Theme::background_color`.
    pub background_color: Option<String>,
    /// Replaces `Theme::primary_color`.
    pub primary_color: Option<String>,
    /// Replaces `Theme::secondary_color`.
    pub secondary_color: Option<String>,
    /// Replaces `Theme::text_color`.
    pub text_color: Option<String>,
    /// Replaces `Theme::font_family`.
    pub font_family: Option<String>,
    /// Replaces `Theme::border_radius`.
    pub border_radius: Option<String>,
}

impl ThemeUpdate {
    /// Applies the set fields to `theme`.
    pub fn apply(self, theme: &mut Theme) {
        if let Some(v) = self.background_color {
            theme.background_color = v;
        }
        if let Some(v) = self.primary_color {
            theme.primary_color = v;
        }
        if let Some(v) = self.secondary_color {
            theme.secondary_color = v;
        }
        if let Some(v) = self.text_color {
            theme.text_color = v;
        }
        if let Some(v) = self.font_family {
            theme.font_family = v;
        }
        if let Some(v) = self.border_radius {
            theme.border_radius = v;
        }
    }
}

/// Partial grid update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridUpdate {
    /// New column count; must be at least 1.
    pub columns: Option<u32>,
    /// Replaces `Grid::gap`.
    pub gap: Option<u32>,
    /// Replaces `Grid::max_width`.
    pub max_width: Option<String>,
    /// Replaces `Grid::row_height`.
    pub row_height: Option<u32>,
}

impl GridUpdate {
    /// Applies the set fields to `grid`.
    pub fn apply(self, grid: &mut Grid) {
        if let Some(v) = self.columns {
            grid.columns = v;
        }
        if let Some(v) = self.gap {
            grid.gap = v;
        }
        if let Some(v) = self.max_width {
            grid.max_width = v;
        }
        if let Some(v) = self.row_height {
            grid.row_height = v;
        }
    }
}

/// Partial profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    /// Replaces `Profile::name`.
    pub name: Option<String>,
    /// Replaces `Profile::bio`.
    pub bio: Option<String>,
    /// Replaces `Profile::avatar`.
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Applies the set fields to `profile`.
    pub fn apply(self, profile: &mut Profile) {
        if let Some(v) = self.name {
            profile.name = v;
        }
        if let Some(v) = self.bio {
            profile.bio = v;
        }
        if let Some(v) = self.avatar {
            profile.avatar = v;
        }
    }
}

/// Partial metadata update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataUpdate {
    /// Replaces `Metadata::title`.
    pub title: Option<String>,
    /// Replaces `Metadata::description`.
    pub description: Option<String>,
    /// Replaces `Metadata::author`.
    pub author: Option<String>,
}

impl MetadataUpdate {
    /// Applies the set fields to `metadata`.
    pub fn apply(self, metadata: &mut Metadata) {
        if let Some(v) = self.title {
            metadata.title = v;
        }
        if let Some(v) = self.description {
            metadata.description = v;
        }
        if let Some(v) = self.author {
            metadata.author = v;
        }
    }
}

/// Partial block update. `content` is merged field by field; everything
/// else replaces the current value when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockUpdate {
    /// New block type.
    #[serde(rename = "type")]
    pub kind: Option<BlockType>,
    /// New top-left cell.
    pub position: Option<Position>,
    /// New footprint.
    pub size: Option<Size>,
    /// Fields merged into the current content.
    pub content: Option<BlockContent>,
    /// Replaces the whole style.
    pub style: Option<BlockStyle>,
}
