//! The journey's content sections, as data.

use super::motion::EntranceStyle;

/// One horizontally scrolling content section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub id: &'static str,
    /// Chapter label shown in the timeline nav.
    pub label: &'static str,
    pub short_label: &'static str,
    /// Width as a multiple of the viewport width.
    pub width_factor: f64,
    pub entrance: EntranceStyle,
    /// Lines of copy rendered inside the section, one animated element each.
    pub copy: &'static [&'static str],
}

impl SectionSpec {
    pub fn elements(&self) -> usize {
        self.copy.len()
    }
}

/// The three-chapter journey: first week, weeks two to four, and the
/// fullscreen "what's next" transition.
pub fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec {
            id: "first-7-days",
            label: "First 7 Days",
            short_label: "01",
            width_factor: 1.0,
            entrance: EntranceStyle::Timeline,
            copy: &[
                "During Your",
                "First 7 Days",
                "Your gut started to adjust and bloating eased.",
            ],
        },
        SectionSpec {
            id: "weeks-2-4",
            label: "Weeks 2~4",
            short_label: "02",
            width_factor: 1.5,
            entrance: EntranceStyle::Scroll,
            copy: &[
                "During Weeks 02 & 04",
                "[ Health Regularity ]  [ Smoother, Clearer Skin ]",
                "You improved your health regularity and skin.",
            ],
        },
        SectionSpec {
            id: "whats-next",
            label: "What's Next",
            short_label: "03",
            width_factor: 3.0,
            entrance: EntranceStyle::None,
            copy: &[],
        },
    ]
}

/// Measured widths for `sections` at `viewport` width.
pub fn measure(sections: &[SectionSpec], viewport: f64) -> Vec<f64> {
    sections.iter().map(|s| s.width_factor.max(0.0) * viewport).collect()
}
