use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::constants::{MAX_RESULTS, MIN_RESULTS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    #[default]
    Automatic,
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Age {
    #[default]
    Automatic,
    Child,
    #[serde(rename = "Young Adult")]
    #[strum(to_string = "Young Adult", serialize = "young-adult", serialize = "YoungAdult")]
    YoungAdult,
    Adult,
    Senior,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Smile {
    #[default]
    Automatic,
    #[serde(rename = "Add Smile")]
    #[strum(to_string = "Add Smile", serialize = "add-smile", serialize = "AddSmile")]
    AddSmile,
    Neutral,
}

/// Toggles and hints that shape the restore prompt.
///
/// `Default` is the blank value: every toggle off, every hint `Automatic`.
/// The application starts from [`RestoreSettings::recommended`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestoreSettings {
    pub colorize: bool,
    pub high_quality: bool,
    pub redraw_hair: bool,
    pub sharpen_background: bool,
    pub stick_to_face_details: bool,
    pub sharpen_wrinkles: bool,
    pub is_vietnamese: bool,
    pub redraw_clothing: bool,
    pub sharpen: bool,
    pub gender: Gender,
    pub age: Age,
    pub smile: Smile,
    pub advanced_prompt: String,
    pub num_results: u8,
}

impl Default for RestoreSettings {
    fn default() -> Self {
        Self {
            colorize: false,
            high_quality: false,
            redraw_hair: false,
            sharpen_background: false,
            stick_to_face_details: false,
            sharpen_wrinkles: false,
            is_vietnamese: false,
            redraw_clothing: false,
            sharpen: false,
            gender: Gender::Automatic,
            age: Age::Automatic,
            smile: Smile::Automatic,
            advanced_prompt: String::new(),
            num_results: MIN_RESULTS,
        }
    }
}

impl RestoreSettings {
    pub fn recommended() -> Self {
        Self {
            colorize: true,
            high_quality: true,
            stick_to_face_details: true,
            is_vietnamese: true,
            ..Self::default()
        }
    }

    pub fn with_num_results(mut self, num_results: u8) -> Self {
        self.num_results = num_results.clamp(MIN_RESULTS, MAX_RESULTS);
        self
    }

    /// Result count clamped to the supported range, for values that came
    /// from deserialization rather than [`Self::with_num_results`].
    pub fn result_count(&self) -> u8 {
        self.num_results.clamp(MIN_RESULTS, MAX_RESULTS)
    }

    pub fn apply_preset(self, preset: Preset) -> Self {
        preset.apply(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    HighQuality,
    RestoreAndColorize,
    RosyRecreate,
    RemoveYellowing,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::HighQuality,
        Preset::RestoreAndColorize,
        Preset::RosyRecreate,
        Preset::RemoveYellowing,
    ];

    pub fn apply(self, settings: RestoreSettings) -> RestoreSettings {
        match self {
            Preset::HighQuality => RestoreSettings {
                high_quality: true,
                colorize: false,
                ..settings
            },
            Preset::RestoreAndColorize => RestoreSettings {
                high_quality: true,
                colorize: true,
                ..settings
            },
            Preset::RosyRecreate => RestoreSettings {
                advanced_prompt: "Recreate with a rosy, vibrant, and slightly nostalgic feel."
                    .to_string(),
                ..settings
            },
            Preset::RemoveYellowing => RestoreSettings {
                advanced_prompt:
                    "Focus on removing yellow stains and faded colors, restoring original tones."
                        .to_string(),
                ..settings
            },
        }
    }
}
