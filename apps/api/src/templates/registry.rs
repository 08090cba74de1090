//! Template Registry: the closed set of visual templates.
//!
//! A template id resolves to a descriptor: orientation (which decides section
//! placement), theme tokens, and catalog metadata for the template browser.
//! Nothing here reads or writes document data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    #[default]
    VerticalModern,
    VerticalElegant,
    VerticalCreative,
    HorizontalClassic,
    HorizontalModern,
    HorizontalMinimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown template '{0}'")]
pub struct UnknownTemplate(pub String);

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::VerticalModern,
        TemplateId::VerticalElegant,
        TemplateId::VerticalCreative,
        TemplateId::HorizontalClassic,
        TemplateId::HorizontalModern,
        TemplateId::HorizontalMinimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::VerticalModern => "vertical-modern",
            TemplateId::VerticalElegant => "vertical-elegant",
            TemplateId::VerticalCreative => "vertical-creative",
            TemplateId::HorizontalClassic => "horizontal-classic",
            TemplateId::HorizontalModern => "horizontal-modern",
            TemplateId::HorizontalMinimal => "horizontal-minimal",
        }
    }

    pub fn orientation(&self) -> Orientation {
        match self {
            TemplateId::VerticalModern
            | TemplateId::VerticalElegant
            | TemplateId::VerticalCreative => Orientation::Vertical,
            TemplateId::HorizontalClassic
            | TemplateId::HorizontalModern
            | TemplateId::HorizontalMinimal => Orientation::Horizontal,
        }
    }

    pub fn descriptor(&self) -> TemplateDescriptor {
        let (name, premium, popular, description): (&'static str, bool, bool, &'static str) =
            match self {
                TemplateId::VerticalModern => (
                    "Vertical Modern",
                    false,
                    true,
                    "Clean vertical layout with blue accent header",
                ),
                TemplateId::VerticalElegant => (
                    "Vertical Elegant",
                    true,
                    false,
                    "Sophisticated vertical design with dark theme",
                ),
                TemplateId::VerticalCreative => (
                    "Vertical Creative",
                    false,
                    false,
                    "Creative vertical layout with teal accents",
                ),
                TemplateId::HorizontalClassic => (
                    "Horizontal Classic",
                    false,
                    true,
                    "Traditional horizontal layout with clean typography",
                ),
                TemplateId::HorizontalModern => (
                    "Horizontal Modern",
                    true,
                    false,
                    "Modern horizontal design with sidebar accent",
                ),
                TemplateId::HorizontalMinimal => (
                    "Horizontal Minimal",
                    false,
                    false,
                    "Ultra-clean horizontal layout focusing on content",
                ),
            };
        TemplateDescriptor {
            id: *self,
            name,
            category: self.orientation(),
            premium,
            popular,
            description,
            features: self.features(),
            theme: self.theme(),
        }
    }

    fn features(&self) -> &'static [&'static str] {
        match self {
            TemplateId::VerticalModern => &["ATS-Friendly", "Vertical Layout", "Professional Header"],
            TemplateId::VerticalElegant => &["Dark Theme", "Elegant Typography", "Executive Style"],
            TemplateId::VerticalCreative => &["Creative Design", "Teal Accent", "Portfolio Friendly"],
            TemplateId::HorizontalClassic => &["Classic Layout", "Horizontal Format", "Traditional Style"],
            TemplateId::HorizontalModern => &["Modern Design", "Sidebar Accent", "Professional Layout"],
            TemplateId::HorizontalMinimal => &["Minimal Design", "Content Focus", "Clean Typography"],
        }
    }

    pub fn theme(&self) -> ThemeTokens {
        match self {
            TemplateId::VerticalModern => ThemeTokens {
                header_background: "linear-gradient(to right, #2563eb, #1d4ed8)",
                header_text: "#ffffff",
                accent: "#2563eb",
                section_title: SectionTitleStyle::AccentUnderline,
                container_border: None,
            },
            TemplateId::VerticalElegant => ThemeTokens {
                header_background: "linear-gradient(to right, #1e293b, #0f172a)",
                header_text: "#ffffff",
                accent: "#334155",
                section_title: SectionTitleStyle::AccentUnderline,
                container_border: None,
            },
            TemplateId::VerticalCreative => ThemeTokens {
                header_background: "linear-gradient(to right, #0d9488, #0f766e)",
                header_text: "#ffffff",
                accent: "#0d9488",
                section_title: SectionTitleStyle::AccentUnderline,
                container_border: None,
            },
            TemplateId::HorizontalClassic => ThemeTokens {
                header_background: "#f9fafb",
                header_text: "#111827",
                accent: "#2563eb",
                section_title: SectionTitleStyle::AccentText,
                container_border: Some("border-left: 4px solid #2563eb"),
            },
            TemplateId::HorizontalModern => ThemeTokens {
                header_background: "linear-gradient(to right, #f9fafb, #ffffff)",
                header_text: "#111827",
                accent: "#16a34a",
                section_title: SectionTitleStyle::AccentText,
                container_border: Some("border-left: 4px solid #16a34a"),
            },
            TemplateId::HorizontalMinimal => ThemeTokens {
                header_background: "#ffffff",
                header_text: "#111827",
                accent: "#374151",
                section_title: SectionTitleStyle::Plain,
                container_border: Some("border: 1px solid #e5e7eb"),
            },
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Single column, every section in reading order.
    Vertical,
    /// Two columns: a narrow left rail and a wide right body.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionTitleStyle {
    AccentUnderline,
    AccentText,
    Plain,
}

/// Presentation-only tokens. Never consulted when deciding what to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeTokens {
    pub header_background: &'static str,
    pub header_text: &'static str,
    pub accent: &'static str,
    pub section_title: SectionTitleStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_border: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: &'static str,
    pub category: Orientation,
    pub premium: bool,
    pub popular: bool,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub theme: ThemeTokens,
}

/// Every template in display order.
pub fn catalog() -> Vec<TemplateDescriptor> {
    TemplateId::ALL.iter().map(TemplateId::descriptor).collect()
}
