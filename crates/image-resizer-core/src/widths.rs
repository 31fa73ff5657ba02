use serde::{Deserialize, Serialize};

/// The four fixed target widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Preset {
    W64,
    W128,
    W256,
    W512,
}

impl Preset {
    /// All presets in processing order
    pub const ALL: [Preset; 4] = [Preset::W64, Preset::W128, Preset::W256, Preset::W512];

    pub fn width(self) -> u32 {
        match self {
            Self::W64 => 64,
            Self::W128 => 128,
            Self::W256 => 256,
            Self::W512 => 512,
        }
    }

    pub fn from_width(width: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.width() == width)
    }
}

/// Target widths requested for a run.
///
/// Mirrors the checkbox panel: one switch per preset plus a custom switch
/// with a free-text width field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthSelection {
    presets: [bool; 4],
    custom_enabled: bool,
    custom_text: String,
}

impl WidthSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.set_preset(preset, true);
        self
    }

    pub fn with_custom(mut self, text: impl Into<String>) -> Self {
        self.set_custom(true, text);
        self
    }

    pub fn set_preset(&mut self, preset: Preset, selected: bool) {
        self.presets[preset as usize] = selected;
    }

    pub fn is_selected(&self, preset: Preset) -> bool {
        self.presets[preset as usize]
    }

    pub fn set_custom(&mut self, enabled: bool, text: impl Into<String>) {
        self.custom_enabled = enabled;
        self.custom_text = text.into();
    }

    /// The custom width, if it is switched on and parses to a positive integer
    pub fn custom_width(&self) -> Option<u32> {
        if !self.custom_enabled {
            return None;
        }
        self.custom_text
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|width| *width > 0)
    }

    /// Widths to produce, in processing order: 64, 128, 256, 512, then custom.
    ///
    /// A custom width equal to a selected preset is listed twice.
    pub fn effective_widths(&self) -> Vec<u32> {
        Preset::ALL
            .into_iter()
            .filter(|preset| self.is_selected(*preset))
            .map(Preset::width)
            .chain(self.custom_width())
            .collect()
    }
}
