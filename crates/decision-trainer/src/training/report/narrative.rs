use super::super::domain::SkillCategory;
use super::views::PerformanceBand;

pub(crate) fn category_summary(category: SkillCategory, band: PerformanceBand) -> &'static str {
    match (category, band) {
        (SkillCategory::TimeManagement, PerformanceBand::NeedsImprovement) => {
            "You’ve struggled with managing your time efficiently, resulting in missed opportunities. Focus on prioritization and setting clear goals."
        }
        (SkillCategory::TimeManagement, PerformanceBand::Proficient) => {
            "You've effectively managed your time and priorities, demonstrating solid organizational skills throughout the tasks."
        }
        (SkillCategory::Communication, PerformanceBand::NeedsImprovement) => {
            "There were some challenges in communicating with key stakeholders. Work on conveying ideas clearly and actively listening to others."
        }
        (SkillCategory::Communication, PerformanceBand::Proficient) => {
            "You've excelled at communicating with stakeholders and making informed decisions, demonstrating excellent listening and speaking skills."
        }
        (SkillCategory::Teamwork, PerformanceBand::NeedsImprovement) => {
            "You faced difficulties collaborating with your team, leading to a lack of cohesion. Greater openness to others' ideas could strengthen your teamwork."
        }
        (SkillCategory::Teamwork, PerformanceBand::Proficient) => {
            "You thrived in collaborative settings, ensuring that everyone’s voice was heard and working well with others to achieve common goals."
        }
        (SkillCategory::ProblemSolving, PerformanceBand::NeedsImprovement) => {
            "You encountered some issues finding solutions to complex problems. Developing a structured approach could improve your problem-solving abilities."
        }
        (SkillCategory::ProblemSolving, PerformanceBand::Proficient) => {
            "You've demonstrated strong problem-solving skills, analyzing situations carefully and finding effective solutions to challenges."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_distinct_band_copy() {
        for category in SkillCategory::ordered() {
            let low = category_summary(category, PerformanceBand::NeedsImprovement);
            let high = category_summary(category, PerformanceBand::Proficient);
            assert_ne!(low, high);
        }
    }

    #[test]
    fn copy_matches_the_feedback_screen() {
        assert_eq!(
            category_summary(SkillCategory::Teamwork, PerformanceBand::Proficient),
            "You thrived in collaborative settings, ensuring that everyone’s voice was heard and working well with others to achieve common goals."
        );
        assert!(
            category_summary(SkillCategory::TimeManagement, PerformanceBand::NeedsImprovement)
                .starts_with("You’ve struggled with managing your time efficiently")
        );
    }
}
