use serde::{Deserialize, Serialize};

use crate::domain::Gender;

/// Demographic metadata attached one-to-one to a character.
///
/// The villain flag is tri-state: `Some(true)` evil, `Some(false)` good,
/// `None` unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDemographic {
    /// Store-assigned surrogate key
    pub demographic_id: i64,

    pub gender: Gender,

    pub villain: Option<bool>,

    /// Owning character
    pub character_id: i64,
}

/// Demographic values for a character that has not been persisted yet.
/// The owning character id is filled in by the repository once the
/// character row exists.
#[derive(Debug, Clone)]
pub struct NewDemographic {
    pub gender: Gender,
    pub villain: Option<bool>,
}
