//! Content Provider - the static portfolio document.
//!
//! Pure data, no behavior: project records, social links, the ordered
//! navigation registry, and the hero/about copy. Everything here is
//! immutable after startup.
//!
//! Content ships compiled in ([`Portfolio::builtin`]) and can be replaced
//! wholesale by a TOML document (`--content site.toml`). Loading validates
//! the document; an invalid file is an error, never a panic.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// Section identity
// =============================================================================

/// The fixed, ordered registry of sections.
///
/// Declaration order is display order, and display order is the tie-break
/// for nearest-section computation in scroll mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    About,
    Projects,
    Resume,
}

impl SectionId {
    /// All sections in display order.
    pub const ALL: [SectionId; 3] = [SectionId::About, SectionId::Projects, SectionId::Resume];

    /// Position in display order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            SectionId::About => 0,
            SectionId::Projects => 1,
            SectionId::Resume => 2,
        }
    }

    /// Section from a display-order position, clamped to the registry.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

// =============================================================================
// Records
// =============================================================================

/// A single project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Ordered; rendered in exactly this order.
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// An outbound profile link (mailto or URL) with a terminal glyph
/// standing in for the original icon asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    /// Opaque visual reference; one or two display cells wide.
    pub icon: String,
}

/// One entry in the navigation registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    pub name: String,
    pub target: SectionId,
}

/// The resume panel: an embedding frame around an opaque document path.
/// The file itself is never read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Resume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Shown inside the frame when no document is configured.
    #[serde(default)]
    pub placeholder: Vec<String>,
}

// =============================================================================
// Portfolio document
// =============================================================================

/// The whole portfolio: everything the views render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    /// Hero name, revealed with the typing effect.
    pub name: String,
    /// One-line bio typed below the name.
    pub tagline: String,
    /// About paragraphs, revealed with the group stagger.
    pub about: Vec<String>,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
    pub nav: Vec<NavEntry>,
    #[serde(default)]
    pub resume: Resume,
}

impl Portfolio {
    /// The compiled-in portfolio document.
    pub fn builtin() -> Self {
        Self {
            name: "Saunak Roy".to_string(),
            tagline: "CS & math undergraduate exploring machine learning, \
                      computer vision, and their intersection with healthcare."
                .to_string(),
            about: vec![
                "Hi! My name is Saunak Roy, and I'm a sophomore computer science and \
                 mathematics student at the University of Maryland, College Park. This site \
                 showcases several projects, research, and other experiences I've engaged in \
                 during my time as a student, where I've primarily explored my interests in \
                 the fields of machine learning and computer vision and their intersection \
                 with healthcare/medicine."
                    .to_string(),
                "During my undergraduate years, I've been fascinated by the fields of machine \
                 learning, computer vision, and data science, and most of my work revolves \
                 around these fields. My goal is to enroll in a graduate program where I hope \
                 to further my exploration of these fields in depth by conducting cutting-edge \
                 research. Press [2] or select Projects to view several artifacts showcasing \
                 my technical skill set."
                    .to_string(),
            ],
            projects: vec![
                Project {
                    title: "Machine Learning Healthcare Project".to_string(),
                    description: "Developed a deep learning model for medical image analysis \
                                  using PyTorch and TensorFlow."
                        .to_string(),
                    technologies: vec![
                        "Python".to_string(),
                        "PyTorch".to_string(),
                        "TensorFlow".to_string(),
                        "OpenCV".to_string(),
                    ],
                    link: None,
                },
                Project {
                    title: "Computer Vision Research".to_string(),
                    description: "Conducted research on advanced object detection algorithms \
                                  for medical applications."
                        .to_string(),
                    technologies: vec![
                        "Python".to_string(),
                        "OpenCV".to_string(),
                        "YOLO".to_string(),
                        "Keras".to_string(),
                    ],
                    link: None,
                },
            ],
            social_links: vec![
                SocialLink {
                    name: "Email".to_string(),
                    href: "mailto:saunakr@umd.edu".to_string(),
                    icon: "\u{2709}".to_string(),
                },
                SocialLink {
                    name: "LinkedIn".to_string(),
                    href: "https://www.linkedin.com/in/saunak-roy/".to_string(),
                    icon: "in".to_string(),
                },
                SocialLink {
                    name: "GitHub".to_string(),
                    href: "https://github.com/saunakroy".to_string(),
                    icon: "\u{2387}".to_string(),
                },
            ],
            nav: vec![
                NavEntry {
                    name: "About".to_string(),
                    target: SectionId::About,
                },
                NavEntry {
                    name: "Projects".to_string(),
                    target: SectionId::Projects,
                },
                NavEntry {
                    name: "Resume".to_string(),
                    target: SectionId::Resume,
                },
            ],
            resume: Resume {
                path: None,
                placeholder: vec![
                    "Resume coming soon!".to_string(),
                    "This section will be updated with my detailed professional \
                     experience and educational background."
                        .to_string(),
                ],
            },
        }
    }

    /// Parse a portfolio from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(text)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Load a portfolio document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the structural invariants the views rely on.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidContent("name must not be empty".to_string()));
        }
        if self.nav.is_empty() {
            return Err(Error::InvalidContent(
                "nav must contain at least one entry".to_string(),
            ));
        }
        for (i, entry) in self.nav.iter().enumerate() {
            if self.nav[..i].iter().any(|e| e.target == entry.target) {
                return Err(Error::InvalidContent(format!(
                    "duplicate nav target: {:?}",
                    entry.target
                )));
            }
        }
        if self.projects.is_empty() {
            return Err(Error::InvalidContent(
                "at least one project is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let p = Portfolio::builtin();
        assert!(p.validate().is_ok());
        assert_eq!(p.projects.len(), 2);
        assert_eq!(p.social_links.len(), 3);
        assert_eq!(p.nav.len(), 3);
    }

    #[test]
    fn test_section_order() {
        assert_eq!(SectionId::About.index(), 0);
        assert_eq!(SectionId::Projects.index(), 1);
        assert_eq!(SectionId::Resume.index(), 2);
        assert_eq!(SectionId::from_index(1), SectionId::Projects);
        // Clamped, not panicking
        assert_eq!(SectionId::from_index(99), SectionId::Resume);
    }

    #[test]
    fn test_builtin_roundtrips_through_toml() {
        let p = Portfolio::builtin();
        let text = toml::to_string(&p).unwrap();
        let back = Portfolio::from_toml_str(&text).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn test_duplicate_nav_target_rejected() {
        let mut p = Portfolio::builtin();
        p.nav.push(NavEntry {
            name: "About again".to_string(),
            target: SectionId::About,
        });
        assert!(matches!(p.validate(), Err(Error::InvalidContent(_))));
    }

    #[test]
    fn test_empty_nav_rejected() {
        let mut p = Portfolio::builtin();
        p.nav.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_empty_projects_rejected() {
        let mut p = Portfolio::builtin();
        p.projects.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let mut text = toml::to_string(&Portfolio::builtin()).unwrap();
        text.push_str("\nmystery = true\n");
        assert!(Portfolio::from_toml_str(&text).is_err());
    }
}
