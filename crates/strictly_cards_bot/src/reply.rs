//! Outgoing chat messages, independent of any chat platform.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_cards::CardContent;

/// Reply keyboard: rows of button labels.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Keyboard {
    /// Button labels, row by row.
    rows: Vec<Vec<String>>,
    /// Hide the keyboard after one press.
    #[new(default)]
    #[getter(skip)]
    one_time: bool,
}

impl Keyboard {
    /// Marks the keyboard as one-time.
    pub fn one_time(mut self) -> Self {
        self.one_time = true;
        self
    }

    /// True when the keyboard hides after one press.
    pub fn is_one_time(&self) -> bool {
        self.one_time
    }
}

/// One message the bot sends back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    /// Plain text, optionally replacing the keyboard.
    Text {
        /// Message body.
        text: String,
        /// New reply keyboard.
        keyboard: Option<Keyboard>,
    },
    /// A single card image.
    Photo {
        /// The card.
        content: CardContent,
        /// Caption under the image.
        caption: Option<String>,
    },
    /// Several card images sent as one group.
    Album {
        /// Cards with their captions, in display order.
        items: Vec<(CardContent, String)>,
    },
}

impl Reply {
    /// Text without a keyboard.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    /// Text with a keyboard.
    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self::Text {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Text body, if this is a text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
