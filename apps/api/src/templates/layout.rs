//! Section placement per orientation.

use serde::{Deserialize, Serialize};

use crate::templates::registry::Orientation;

/// Every renderable section, in vertical reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Summary,
    Skills,
    Experience,
    Education,
    Internships,
    Projects,
    Publications,
    Achievements,
    Interests,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        SectionId::Summary,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Internships,
        SectionId::Projects,
        SectionId::Publications,
        SectionId::Achievements,
        SectionId::Interests,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Summary => "Professional Summary",
            SectionId::Skills => "Skills",
            SectionId::Experience => "Professional Experience",
            SectionId::Education => "Education",
            SectionId::Internships => "Internships",
            SectionId::Projects => "Projects",
            SectionId::Publications => "Publications",
            SectionId::Achievements => "Achievements",
            SectionId::Interests => "Interests",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSlot {
    Main,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPlan {
    pub slot: ColumnSlot,
    pub sections: &'static [SectionId],
}

const VERTICAL_PLAN: &[ColumnPlan] = &[ColumnPlan {
    slot: ColumnSlot::Main,
    sections: &SectionId::ALL,
}];

// Internships and Achievements have no column in the two-column layout.
const HORIZONTAL_PLAN: &[ColumnPlan] = &[
    ColumnPlan {
        slot: ColumnSlot::Left,
        sections: &[SectionId::Skills, SectionId::Education, SectionId::Interests],
    },
    ColumnPlan {
        slot: ColumnSlot::Right,
        sections: &[
            SectionId::Summary,
            SectionId::Experience,
            SectionId::Projects,
            SectionId::Publications,
        ],
    },
];

pub fn column_plan(orientation: Orientation) -> &'static [ColumnPlan] {
    match orientation {
        Orientation::Vertical => VERTICAL_PLAN,
        Orientation::Horizontal => HORIZONTAL_PLAN,
    }
}

pub fn is_placed(orientation: Orientation, section: SectionId) -> bool {
    column_plan(orientation)
        .iter()
        .any(|column| column.sections.contains(&section))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_places_every_section_once() {
        let plan = column_plan(Orientation::Vertical);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].sections, &SectionId::ALL);
    }

    #[test]
    fn test_horizontal_leaves_out_internships_and_achievements() {
        let unplaced: Vec<_> = SectionId::ALL
            .into_iter()
            .filter(|s| !is_placed(Orientation::Horizontal, *s))
            .collect();
        assert_eq!(
            unplaced,
            vec![SectionId::Internships, SectionId::Achievements]
        );
    }

    #[test]
    fn test_horizontal_columns_do_not_overlap() {
        let plan = column_plan(Orientation::Horizontal);
        for section in plan[0].sections {
            assert!(!plan[1].sections.contains(section));
        }
    }
}
