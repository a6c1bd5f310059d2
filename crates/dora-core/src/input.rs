//! Input normalizer — sizes the multi-line message input to its content
//! and decides what a line-terminator keystroke does.
//!
//! Presentation only: nothing here touches the session store.

use dora_types::config::InputConfig;

/// Height limits of the input control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub collapsed_height: f32,
    pub max_height: f32,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self::from(&InputConfig::default())
    }
}

impl From<&InputConfig> for InputBounds {
    fn from(config: &InputConfig) -> Self {
        Self {
            collapsed_height: config.collapsed_height,
            max_height: config.max_height.max(config.collapsed_height),
        }
    }
}

impl InputBounds {
    /// Height for content of the given natural height
    pub fn fit(&self, content_height: f32) -> f32 {
        if content_height.is_finite() && content_height > self.collapsed_height {
            content_height.min(self.max_height)
        } else {
            self.collapsed_height
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputNormalizer {
    bounds: InputBounds,
    height: f32,
}

impl InputNormalizer {
    pub fn new(bounds: InputBounds) -> Self {
        Self {
            bounds,
            height: bounds.collapsed_height,
        }
    }

    /// Re-measure after a content change: collapse, then grow to the content
    /// height if it overflows, capped at the maximum.
    pub fn on_change(&mut self, content_height: f32) -> f32 {
        self.height = self.bounds.collapsed_height;
        self.height = self.bounds.fit(content_height);
        self.height
    }

    /// Back to one line, e.g. after the input is cleared on submit
    pub fn collapse(&mut self) {
        self.height = self.bounds.collapsed_height;
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> InputBounds {
        self.bounds
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new(InputBounds::default())
    }
}

/// What a keystroke in the input should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    Ignore,
}

/// Enter submits; Shift+Enter inserts a literal line break.
pub fn classify_key(is_line_terminator: bool, continuation_modifier: bool) -> KeyAction {
    match (is_line_terminator, continuation_modifier) {
        (true, false) => KeyAction::Submit,
        (true, true) => KeyAction::InsertNewline,
        (false, _) => KeyAction::Ignore,
    }
}
