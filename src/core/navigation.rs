use crate::domain::model::{CoverageReport, RequirementStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    PersonalInformation,
    Timeline,
    DegreeVerification,
    Signature,
}

impl FormStep {
    pub fn title(&self) -> &'static str {
        match self {
            FormStep::PersonalInformation => "Personal Information",
            FormStep::Timeline => "Timeline Overview",
            FormStep::DegreeVerification => "Degree Verification",
            FormStep::Signature => "Attestation & Signature",
        }
    }
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What the navigator needs to know about the form when moving forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepContext<'a> {
    pub personal_info_complete: bool,
    pub coverage: Option<&'a CoverageReport>,
    pub degree_info_complete: bool,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepBlocked {
    #[error("Please enter your full name and email address.")]
    MissingPersonalInfo,

    #[error("{}", .0.message())]
    TimelineIncomplete(RequirementStatus),

    #[error("Please enter your school name and degree level.")]
    MissingDegreeInfo,

    #[error("Already at the final step")]
    AtFinalStep,
}

/// 多步驟表單的導覽狀態，由呼叫端持有 (不使用全域狀態)
#[derive(Debug, Clone)]
pub struct StepNavigator {
    current: FormStep,
    degree_required: bool,
}

impl StepNavigator {
    pub fn new(degree_required: bool) -> Self {
        Self {
            current: FormStep::PersonalInformation,
            degree_required,
        }
    }

    pub fn current(&self) -> FormStep {
        self.current
    }

    pub fn steps(&self) -> Vec<FormStep> {
        let mut steps = vec![FormStep::PersonalInformation, FormStep::Timeline];
        if self.degree_required {
            steps.push(FormStep::DegreeVerification);
        }
        steps.push(FormStep::Signature);
        steps
    }

    pub fn total_steps(&self) -> usize {
        self.steps().len()
    }

    /// 1-based position of the current step
    pub fn position(&self) -> usize {
        self.steps()
            .iter()
            .position(|step| *step == self.current)
            .map_or(1, |i| i + 1)
    }

    /// "Step 2 of 4: Timeline Overview"
    pub fn indicator(&self) -> String {
        format!(
            "Step {} of {}: {}",
            self.position(),
            self.total_steps(),
            self.current
        )
    }

    /// Advances one step once the current step's conditions hold.
    pub fn next(&mut self, context: &StepContext<'_>) -> Result<FormStep, StepBlocked> {
        match self.current {
            FormStep::PersonalInformation if !context.personal_info_complete => {
                return Err(StepBlocked::MissingPersonalInfo);
            }
            FormStep::Timeline => {
                let status = context
                    .coverage
                    .map(CoverageReport::status)
                    .unwrap_or(RequirementStatus::NeedsEntry);
                if !status.is_satisfied() {
                    return Err(StepBlocked::TimelineIncomplete(status));
                }
            }
            FormStep::DegreeVerification if !context.degree_info_complete => {
                return Err(StepBlocked::MissingDegreeInfo);
            }
            _ => {}
        }

        let steps = self.steps();
        let next = steps
            .get(self.position())
            .copied()
            .ok_or(StepBlocked::AtFinalStep)?;

        tracing::debug!("Navigating from {} to {}", self.current, next);
        self.current = next;
        Ok(next)
    }

    /// Going back is never blocked; stays put on the first step.
    pub fn previous(&mut self) -> FormStep {
        let position = self.position();
        if position > 1 {
            self.current = self.steps()[position - 2];
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::calculate_coverage;
    use crate::domain::model::{EntryKind, EntryRecord};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_walk_without_degree() {
        let report = calculate_coverage(
            &[EntryRecord::new(EntryKind::Job, "2015-01", None)],
            7,
            today(),
        );
        let context = StepContext {
            personal_info_complete: true,
            coverage: Some(&report),
            degree_info_complete: false,
        };

        let mut nav = StepNavigator::new(false);
        assert_eq!(nav.indicator(), "Step 1 of 3: Personal Information");
        assert_eq!(nav.next(&context), Ok(FormStep::Timeline));
        assert_eq!(nav.next(&context), Ok(FormStep::Signature));
        assert_eq!(nav.indicator(), "Step 3 of 3: Attestation & Signature");
        assert_eq!(nav.next(&context), Err(StepBlocked::AtFinalStep));
        assert_eq!(nav.previous(), FormStep::Timeline);
    }

    #[test]
    fn test_timeline_blocks_until_requirement_met() {
        let short = calculate_coverage(
            &[EntryRecord::new(EntryKind::Job, "2024-01", None)],
            7,
            today(),
        );
        let mut nav = StepNavigator::new(true);
        let context = StepContext {
            personal_info_complete: true,
            coverage: Some(&short),
            degree_info_complete: false,
        };
        nav.next(&context).unwrap();

        let err = nav.next(&context).unwrap_err();
        assert_eq!(
            err,
            StepBlocked::TimelineIncomplete(RequirementStatus::Short { required_years: 7 })
        );
        assert_eq!(err.to_string(), "Please account for the full 7 years.");
        assert_eq!(nav.current(), FormStep::Timeline);

        let no_report = StepContext {
            personal_info_complete: true,
            ..Default::default()
        };
        assert_eq!(
            nav.next(&no_report),
            Err(StepBlocked::TimelineIncomplete(RequirementStatus::NeedsEntry))
        );
    }

    #[test]
    fn test_degree_step_when_required() {
        let report = calculate_coverage(
            &[EntryRecord::new(EntryKind::Job, "2010-01", None)],
            7,
            today(),
        );
        let mut nav = StepNavigator::new(true);
        let mut context = StepContext {
            personal_info_complete: true,
            coverage: Some(&report),
            degree_info_complete: false,
        };
        nav.next(&context).unwrap();
        assert_eq!(nav.next(&context), Ok(FormStep::DegreeVerification));
        assert_eq!(nav.indicator(), "Step 3 of 4: Degree Verification");
        assert_eq!(nav.next(&context), Err(StepBlocked::MissingDegreeInfo));

        context.degree_info_complete = true;
        assert_eq!(nav.next(&context), Ok(FormStep::Signature));
    }

    #[test]
    fn test_personal_info_required() {
        let mut nav = StepNavigator::new(false);
        assert_eq!(
            nav.next(&StepContext::default()),
            Err(StepBlocked::MissingPersonalInfo)
        );
        assert_eq!(nav.previous(), FormStep::PersonalInformation);
    }
}
