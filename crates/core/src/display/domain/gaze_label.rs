use crate::shared::constants::{
    LABEL_POSITION, LOOKING_COLOR, LOOKING_TEXT, NOT_LOOKING_COLOR, NOT_LOOKING_TEXT,
};

/// Text overlay describing one face's gaze decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GazeLabel {
    pub text: &'static str,
    /// RGB.
    pub color: [u8; 3],
    /// Baseline origin in frame pixels.
    pub position: (i32, i32),
}

impl GazeLabel {
    pub fn for_decision(facing: bool) -> Self {
        let (text, color) = if facing {
            (LOOKING_TEXT, LOOKING_COLOR)
        } else {
            (NOT_LOOKING_TEXT, NOT_LOOKING_COLOR)
        };
        Self {
            text,
            color,
            position: LABEL_POSITION,
        }
    }

    pub fn is_facing(&self) -> bool {
        self.text == LOOKING_TEXT
    }
}
