use serde::{Deserialize, Serialize};

/// Which entity a picture row belongs to. Each kind has its own table;
/// the owning foreign key is the only column that differs between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PictureKind {
    Cartoon,
    Location,
    Character,
}

impl PictureKind {
    pub fn table(&self) -> &'static str {
        match self {
            PictureKind::Cartoon => "cartoon_picture",
            PictureKind::Location => "location_picture",
            PictureKind::Character => "character_picture",
        }
    }

    pub fn owner_column(&self) -> &'static str {
        match self {
            PictureKind::Cartoon => "cartoon_id",
            PictureKind::Location => "location_id",
            PictureKind::Character => "character_id",
        }
    }

    pub const ALL: [PictureKind; 3] = [
        PictureKind::Cartoon,
        PictureKind::Location,
        PictureKind::Character,
    ];
}

impl std::fmt::Display for PictureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PictureKind::Cartoon => write!(f, "Cartoon"),
            PictureKind::Location => write!(f, "Location"),
            PictureKind::Character => write!(f, "Character"),
        }
    }
}

/// An image file reference attached to exactly one cartoon, location or
/// character. `picture_location` is the store-relative path, unique within
/// the owning entity's picture set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    /// Store-assigned surrogate key
    pub picture_id: i64,

    /// Relative image path, e.g. `images/<cartoon title>/<file name>`
    pub picture_location: String,

    pub kind: PictureKind,

    /// Owning entity of `kind`
    pub owner_id: i64,
}
