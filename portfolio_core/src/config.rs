use std::collections::BTreeMap;

use serde::Deserialize;

use crate::effects::tilt::TiltProfile;
use crate::error::ConfigError;
use crate::theme::ThemeMode;

pub const DEFAULT_THEME_KEY: &str = "theme";
pub const DEFAULT_RELAY_BASE: &str = "https://formsubmit.co/ajax/";
pub const DEFAULT_RECIPIENT: &str = "hello@example.com";

/// Everything the page behavior can be tuned with.
///
/// Every section falls back to its defaults, so a page only has to spell out
/// what it changes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub contact: ContactConfig,
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub tilt: TiltConfig,
    pub ids: ElementIds,
    pub classes: ClassNames,
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub default_mode: ThemeMode,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_THEME_KEY.to_string(),
            default_mode: ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint_base: String,
    pub recipient: String,
    /// Extra parts sent with every message, e.g. `_subject` or `_template`.
    pub extra_fields: BTreeMap<String, String>,
}

impl ContactConfig {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.endpoint_base, self.recipient)
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint_base: DEFAULT_RELAY_BASE.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
            extra_fields: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub hold_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Crafting Clean, Scalable Web Solutions".to_string(),
                "Turning Code into Real-World Impact".to_string(),
                "Designing Interactive, Modern Experiences".to_string(),
            ],
            type_delay_ms: 80,
            delete_delay_ms: 50,
            hold_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible before it is revealed.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.15 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TiltOverrides")]
pub struct TiltConfig {
    pub stats: TiltProfile,
    pub service: TiltProfile,
    pub service_icon_transform: String,
}

/// What a page may spell out for one tilt profile. Missing fields keep that
/// profile's own default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProfileOverrides {
    max_deg: Option<f64>,
    lift_px: Option<f64>,
    perspective_px: Option<f64>,
}

impl ProfileOverrides {
    fn over(self, base: TiltProfile) -> TiltProfile {
        TiltProfile {
            max_deg: self.max_deg.unwrap_or(base.max_deg),
            lift_px: self.lift_px.unwrap_or(base.lift_px),
            perspective_px: self.perspective_px.or(base.perspective_px),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TiltOverrides {
    stats: ProfileOverrides,
    service: ProfileOverrides,
    service_icon_transform: Option<String>,
}

impl From<TiltOverrides> for TiltConfig {
    fn from(overrides: TiltOverrides) -> Self {
        let base = TiltConfig::default();
        Self {
            stats: overrides.stats.over(base.stats),
            service: overrides.service.over(base.service),
            service_icon_transform: overrides
                .service_icon_transform
                .unwrap_or(base.service_icon_transform),
        }
    }
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            stats: TiltProfile {
                max_deg: 5.0,
                lift_px: 6.0,
                perspective_px: None,
            },
            service: TiltProfile {
                max_deg: 8.0,
                lift_px: 6.0,
                perspective_px: Some(900.0),
            },
            service_icon_transform: "translateZ(24px) scale(1.08)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub theme_toggle: String,
    pub dark_icon: String,
    pub light_icon: String,
    pub contact_form: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub name_error: String,
    pub email_error: String,
    pub message_error: String,
    pub success_banner: String,
    pub failure_banner: String,
    pub loader: String,
    pub submit: String,
    pub typing_text: String,
    pub stats_wrap: String,
    pub stats_card: String,
    pub year: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            theme_toggle: "themeToggle".to_string(),
            dark_icon: "moonIcon".to_string(),
            light_icon: "sunIcon".to_string(),
            contact_form: "contactForm".to_string(),
            name: "name".to_string(),
            email: "email".to_string(),
            message: "message".to_string(),
            name_error: "nameError".to_string(),
            email_error: "emailError".to_string(),
            message_error: "messageError".to_string(),
            success_banner: "successMsg".to_string(),
            failure_banner: "errorMsg".to_string(),
            loader: "loader".to_string(),
            submit: "submitBtn".to_string(),
            typing_text: "typingText".to_string(),
            stats_wrap: "statsWrap".to_string(),
            stats_card: "expCard".to_string(),
            year: "year".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub dark: String,
    pub hidden: String,
    pub invalid: String,
    pub reveal: String,
    pub revealed: String,
    pub service_card: String,
    pub icon: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            dark: "dark".to_string(),
            hidden: "hidden".to_string(),
            invalid: "border-red-500".to_string(),
            reveal: "reveal".to_string(),
            revealed: "revealed".to_string(),
            service_card: "service-card".to_string(),
            icon: "icon".to_string(),
        }
    }
}
