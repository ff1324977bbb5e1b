//! Content records and the collections they live in
//!
//! A content record is any row that points at uploaded media through a
//! relative path. The path is only a claim: whether the file is really on
//! disk is what the reconciler finds out.

use serde::{Deserialize, Serialize};

/// Which asset field of a record a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetRole {
    /// The main media file
    Primary,
    /// The preview image
    Thumbnail,
}

impl AssetRole {
    /// Every role, in reporting order
    pub const ALL: [Self; 2] = [Self::Primary, Self::Thumbnail];
}

impl std::fmt::Display for AssetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

impl std::str::FromStr for AssetRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "media" | "media_file" => Ok(Self::Primary),
            "thumbnail" | "thumb" => Ok(Self::Thumbnail),
            _ => Err(format!("Invalid role: {s}. Use: primary, thumbnail")),
        }
    }
}

/// A content table whose rows reference uploaded media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Gallery items (publications and poems with attachments)
    #[default]
    Gallery,
    /// Community poems
    Poems,
    /// Member profile pictures
    Avatars,
}

impl Collection {
    /// Every collection
    pub const ALL: [Self; 3] = [Self::Gallery, Self::Poems, Self::Avatars];

    /// Database table backing this collection
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Gallery => "api_galleryitem",
            Self::Poems => "api_poem",
            Self::Avatars => "api_userprofile",
        }
    }

    /// Column that stores the path for `role`, if this collection has one
    #[must_use]
    pub const fn column(self, role: AssetRole) -> Option<&'static str> {
        match (self, role) {
            (Self::Gallery | Self::Poems, AssetRole::Primary) => Some("media_file"),
            (Self::Gallery, AssetRole::Thumbnail) => Some("thumbnail"),
            (Self::Avatars, AssetRole::Primary) => Some("avatar"),
            (Self::Poems | Self::Avatars, AssetRole::Thumbnail) => None,
        }
    }

    /// Upload directory (relative to the media root) for `role`
    #[must_use]
    pub const fn upload_dir(self, role: AssetRole) -> Option<&'static str> {
        match (self, role) {
            (Self::Gallery, AssetRole::Primary) => Some("gallery_media"),
            (Self::Gallery, AssetRole::Thumbnail) => Some("gallery_thumbnails"),
            (Self::Poems, AssetRole::Primary) => Some("poem_media"),
            (Self::Avatars, AssetRole::Primary) => Some("avatars"),
            (Self::Poems | Self::Avatars, AssetRole::Thumbnail) => None,
        }
    }

    /// Roles this collection stores, in reporting order
    #[must_use]
    pub fn roles(self) -> Vec<AssetRole> {
        AssetRole::ALL.into_iter().filter(|role| self.column(*role).is_some()).collect()
    }

    /// Upload directories this collection writes into
    #[must_use]
    pub fn upload_dirs(self) -> Vec<&'static str> {
        AssetRole::ALL.into_iter().filter_map(|role| self.upload_dir(role)).collect()
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gallery => write!(f, "gallery"),
            Self::Poems => write!(f, "poems"),
            Self::Avatars => write!(f, "avatars"),
        }
    }
}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gallery" | "galleryitem" | "gallery_items" => Ok(Self::Gallery),
            "poems" | "poem" => Ok(Self::Poems),
            "avatars" | "avatar" | "profiles" => Ok(Self::Avatars),
            _ => Err(format!("Unknown collection: {s}. Use: gallery, poems, avatars")),
        }
    }
}

/// A row that references stored media assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Primary key
    pub id: i64,

    /// Human-readable title, when the row has one
    pub title: Option<String>,

    /// Path of the main media file, relative to the media root
    pub primary: Option<String>,

    /// Path of the thumbnail, relative to the media root
    pub thumbnail: Option<String>,

    /// Declared media type (`image`, `video`, `document`, `text`)
    pub media_type: Option<String>,
}

impl ContentRecord {
    /// Create a record with a title and no assets
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            primary: None,
            thumbnail: None,
            media_type: None,
        }
    }

    /// Same record with a primary asset path
    #[must_use]
    pub fn with_primary(mut self, path: impl Into<String>) -> Self {
        self.primary = Some(path.into());
        self
    }

    /// Same record with a thumbnail path
    #[must_use]
    pub fn with_thumbnail(mut self, path: impl Into<String>) -> Self {
        self.thumbnail = Some(path.into());
        self
    }

    /// Same record with a declared media type
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Recorded path for `role`; empty strings count as no reference
    #[must_use]
    pub fn asset(&self, role: AssetRole) -> Option<&str> {
        let path = match role {
            AssetRole::Primary => self.primary.as_deref(),
            AssetRole::Thumbnail => self.thumbnail.as_deref(),
        };
        path.filter(|p| !p.is_empty())
    }

    /// Replace the recorded path for `role`
    pub fn set_asset(&mut self, role: AssetRole, path: impl Into<String>) {
        let path = Some(path.into());
        match role {
            AssetRole::Primary => self.primary = path,
            AssetRole::Thumbnail => self.thumbnail = path,
        }
    }

    /// Title for display, falling back to a placeholder
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("(untitled)")
    }
}
