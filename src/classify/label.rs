use serde::{Deserialize, Serialize};

/// Activity classified from one detection sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLabel {
    Reading,
    Writing,
    Phone,
    Standing,
    NoFace,
    Uncertain,
}

impl ActivityLabel {
    /// Labels that count as studying.
    pub fn is_active(self) -> bool {
        matches!(self, ActivityLabel::Reading | ActivityLabel::Writing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLabel::Reading => "reading",
            ActivityLabel::Writing => "writing",
            ActivityLabel::Phone => "phone",
            ActivityLabel::Standing => "standing",
            ActivityLabel::NoFace => "no-face",
            ActivityLabel::Uncertain => "uncertain",
        }
    }
}
