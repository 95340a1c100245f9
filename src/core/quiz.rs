use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AgeBracket, BudgetTier, Concern, Gender, Lifestyle, QuestionnaireAnswers, QuizAnswer,
    QuizStep, RecommendationResult, SkinType,
};

/// The fixed step order of the questionnaire
pub const QUIZ_STEPS: [QuizStep; 6] = [
    QuizStep::Age,
    QuizStep::Gender,
    QuizStep::SkinType,
    QuizStep::Concerns,
    QuizStep::Budget,
    QuizStep::Lifestyle,
];

/// Errors surfaced by quiz transitions
#[derive(Debug, Error, PartialEq)]
pub enum QuizError {
    #[error("the {0} step is not complete")]
    StepIncomplete(QuizStep),

    #[error("answer targets the {got} step but the current step is {expected}")]
    AnswerMismatch { expected: QuizStep, got: QuizStep },

    #[error("operation is not valid in the current quiz state")]
    InvalidTransition,
}

/// Where a session currently is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuizState {
    Step(usize),
    Submitting,
    Results,
}

/// Answers collected so far, one slot per step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DraftAnswers {
    age_bracket: Option<AgeBracket>,
    gender: Option<Gender>,
    skin_type: Option<SkinType>,
    concerns: Vec<Concern>,
    budget_tier: Option<BudgetTier>,
    lifestyle: Option<Lifestyle>,
}

/// Outcome of a successful `next` call
#[derive(Debug, PartialEq)]
pub enum Advance {
    /// Moved to the given step
    Step(QuizStep),
    /// Final step answered: answers are frozen and the session is in
    /// `Submitting`; the caller fetches the catalog and completes or
    /// fails the submission
    ReadyToSubmit(QuestionnaireAnswers),
}

/// Linear six-step questionnaire session
///
/// Serializable so it can live in the session cache between HTTP calls.
/// The session never performs I/O itself: reaching the end of the quiz
/// hands the frozen answers back to the caller, which runs the catalog
/// fetch and the scoring pipeline and reports the outcome via
/// [`QuizSession::complete`] or [`QuizSession::fail`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    state: QuizState,
    draft: DraftAnswers,
    result: Option<RecommendationResult>,
    error: Option<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: QuizState::Step(0),
            draft: DraftAnswers::default(),
            result: None,
            error: None,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// The step the session is on, if it is on one
    pub fn current_step(&self) -> Option<QuizStep> {
        match self.state {
            QuizState::Step(index) => Some(QUIZ_STEPS[index]),
            _ => None,
        }
    }

    pub fn step_index(&self) -> Option<usize> {
        match self.state {
            QuizState::Step(index) => Some(index),
            _ => None,
        }
    }

    /// Error message from the last failed submission, if any
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&RecommendationResult> {
        self.result.as_ref()
    }

    /// Record an answer for the current step, replacing any previous
    /// value. The step does not advance; that takes an explicit `next`.
    pub fn record_answer(&mut self, answer: QuizAnswer) -> Result<(), QuizError> {
        let QuizState::Step(index) = self.state else {
            return Err(QuizError::InvalidTransition);
        };

        let expected = QUIZ_STEPS[index];
        let got = answer.step();
        if got != expected {
            return Err(QuizError::AnswerMismatch { expected, got });
        }

        match answer {
            QuizAnswer::Age(value) => self.draft.age_bracket = Some(value),
            QuizAnswer::Gender(value) => self.draft.gender = Some(value),
            QuizAnswer::SkinType(value) => self.draft.skin_type = Some(value),
            QuizAnswer::Concerns(values) => self.draft.concerns = values,
            QuizAnswer::Budget(value) => self.draft.budget_tier = Some(value),
            QuizAnswer::Lifestyle(value) => self.draft.lifestyle = Some(value),
        }

        Ok(())
    }

    /// Advance to the following step, or into `Submitting` from the
    /// final step. Guarded by the current step being complete.
    ///
    /// Calling `next` while already in `Submitting` re-freezes the
    /// answers and hands them back again: that is the retry path after
    /// a failed catalog fetch.
    pub fn next(&mut self) -> Result<Advance, QuizError> {
        match self.state {
            QuizState::Step(index) => {
                let step = QUIZ_STEPS[index];
                if !self.step_complete(step) {
                    return Err(QuizError::StepIncomplete(step));
                }

                if index + 1 < QUIZ_STEPS.len() {
                    self.state = QuizState::Step(index + 1);
                    Ok(Advance::Step(QUIZ_STEPS[index + 1]))
                } else {
                    let answers = self.freeze()?;
                    self.state = QuizState::Submitting;
                    self.error = None;
                    Ok(Advance::ReadyToSubmit(answers))
                }
            }
            QuizState::Submitting => {
                let answers = self.freeze()?;
                self.error = None;
                Ok(Advance::ReadyToSubmit(answers))
            }
            QuizState::Results => Err(QuizError::InvalidTransition),
        }
    }

    /// Step back to the previous step
    pub fn previous(&mut self) -> Result<QuizStep, QuizError> {
        match self.state {
            QuizState::Step(index) if index > 0 => {
                self.state = QuizState::Step(index - 1);
                Ok(QUIZ_STEPS[index - 1])
            }
            _ => Err(QuizError::InvalidTransition),
        }
    }

    /// Submission succeeded: store the shortlist and enter `Results`
    pub fn complete(&mut self, result: RecommendationResult) -> Result<(), QuizError> {
        if self.state != QuizState::Submitting {
            return Err(QuizError::InvalidTransition);
        }
        self.result = Some(result);
        self.error = None;
        self.state = QuizState::Results;
        Ok(())
    }

    /// Submission failed: record the error and stay in `Submitting`
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), QuizError> {
        if self.state != QuizState::Submitting {
            return Err(QuizError::InvalidTransition);
        }
        self.error = Some(message.into());
        Ok(())
    }

    /// Restart from the first step, discarding answers and results
    pub fn retake(&mut self) -> Result<(), QuizError> {
        if self.state != QuizState::Results {
            return Err(QuizError::InvalidTransition);
        }
        *self = Self::new();
        Ok(())
    }

    /// Single-choice steps need a value, the concerns step a non-empty set
    fn step_complete(&self, step: QuizStep) -> bool {
        match step {
            QuizStep::Age => self.draft.age_bracket.is_some(),
            QuizStep::Gender => self.draft.gender.is_some(),
            QuizStep::SkinType => self.draft.skin_type.is_some(),
            QuizStep::Concerns => !self.draft.concerns.is_empty(),
            QuizStep::Budget => self.draft.budget_tier.is_some(),
            QuizStep::Lifestyle => self.draft.lifestyle.is_some(),
        }
    }

    /// Turn the draft into an immutable answer set. The step guards make
    /// missing values unreachable through the public API.
    fn freeze(&self) -> Result<QuestionnaireAnswers, QuizError> {
        Ok(QuestionnaireAnswers {
            age_bracket: self
                .draft
                .age_bracket
                .ok_or(QuizError::StepIncomplete(QuizStep::Age))?,
            gender: self
                .draft
                .gender
                .ok_or(QuizError::StepIncomplete(QuizStep::Gender))?,
            skin_type: self
                .draft
                .skin_type
                .ok_or(QuizError::StepIncomplete(QuizStep::SkinType))?,
            concerns: if self.draft.concerns.is_empty() {
                return Err(QuizError::StepIncomplete(QuizStep::Concerns));
            } else {
                self.draft.concerns.clone()
            },
            budget_tier: self
                .draft
                .budget_tier
                .ok_or(QuizError::StepIncomplete(QuizStep::Budget))?,
            lifestyle: self
                .draft
                .lifestyle
                .ok_or(QuizError::StepIncomplete(QuizStep::Lifestyle))?,
        })
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
