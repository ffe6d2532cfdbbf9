use serde::{Deserialize, Serialize};
use std::fmt;

/// Page sections, top to bottom
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Hero,
    Skills,
    Projects,
    Experience,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Hero,
        Section::Skills,
        Section::Projects,
        Section::Experience,
        Section::About,
        Section::Contact,
    ];

    /// Sections linked from the navigation bar
    pub const NAV: [Section; 4] = [
        Section::Hero,
        Section::Projects,
        Section::About,
        Section::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Experience => "Experience",
            Section::About => "About",
            Section::Contact => "Contact",
        }
    }

    pub fn index(&self) -> usize {
        Section::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Section::Hero => "hero",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Experience => "experience",
            Section::About => "about",
            Section::Contact => "contact",
        };
        f.write_str(id)
    }
}

/// Which section is showing and whether the mobile nav is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioState {
    current_section: Section,
    nav_open: bool,
}

impl PortfolioState {
    pub fn new() -> Self {
        Self {
            current_section: Section::Hero,
            nav_open: false,
        }
    }

    pub fn current_section(&self) -> Section {
        self.current_section
    }

    pub fn set_current_section(&mut self, section: Section) {
        if section != self.current_section {
            log::debug!("section: {} -> {}", self.current_section, section);
        }
        self.current_section = section;
    }

    pub fn is_nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn toggle_nav(&mut self) {
        self.nav_open = !self.nav_open;
    }

    pub fn close_nav(&mut self) {
        self.nav_open = false;
    }
}

impl Default for PortfolioState {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertical extent of each section in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub heights: Vec<(Section, f32)>,
}

impl PageLayout {
    pub fn new(heights: Vec<(Section, f32)>) -> Self {
        Self { heights }
    }

    /// Every section the same height
    pub fn uniform(height: f32) -> Self {
        Self::new(Section::ALL.iter().map(|&s| (s, height)).collect())
    }

    pub fn total_height(&self) -> f32 {
        self.heights.iter().map(|(_, h)| h.max(0.0)).sum()
    }

    /// Top edge of `section`, or None if the layout does not include it
    pub fn anchor(&self, section: Section) -> Option<f32> {
        let mut top = 0.0;
        for &(s, h) in &self.heights {
            if s == section {
                return Some(top);
            }
            top += h.max(0.0);
        }
        None
    }

    /// Section whose extent contains `offset`; past the end reads as the last section
    pub fn section_at(&self, offset: f32) -> Section {
        let mut top = 0.0;
        for &(s, h) in &self.heights {
            top += h.max(0.0);
            if offset < top {
                return s;
            }
        }
        self.heights.last().map(|(s, _)| *s).unwrap_or(Section::Hero)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(vec![
            (Section::Hero, 900.0),
            (Section::Skills, 800.0),
            (Section::Projects, 1400.0),
            (Section::Experience, 1000.0),
            (Section::About, 800.0),
            (Section::Contact, 900.0),
        ])
    }
}
