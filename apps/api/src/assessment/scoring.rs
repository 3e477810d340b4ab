use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Minimum percentage a candidate needs to become verified.
pub const PASS_THRESHOLD_PERCENT: usize = 80;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizGrade {
    pub correct: usize,
    pub total: usize,
    pub score: f64,
    pub passed: bool,
}

impl QuizGrade {
    /// A finished terminal scenario has no partial credit.
    pub fn terminal_completed() -> Self {
        Self {
            correct: 1,
            total: 1,
            score: 100.0,
            passed: true,
        }
    }
}

/// Grades submitted answers against an answer key.
///
/// `answers[i]` is the chosen option for `question_ids[i]`. Every question must
/// be answered exactly once and belong to the key; anything else is rejected
/// before a score is computed.
pub fn grade_quiz(
    key: &HashMap<u32, usize>,
    question_ids: &[u32],
    answers: &[i32],
) -> Result<QuizGrade, AppError> {
    if question_ids.is_empty() {
        return Err(AppError::Validation("No questions were submitted".to_string()));
    }
    if answers.len() != question_ids.len() {
        return Err(AppError::Validation(format!(
            "Expected {} answers, got {}",
            question_ids.len(),
            answers.len()
        )));
    }

    let mut seen = HashSet::with_capacity(question_ids.len());
    let mut correct = 0;
    for (qid, &answer) in question_ids.iter().zip(answers) {
        if !seen.insert(*qid) {
            return Err(AppError::Validation(format!("Question {qid} submitted twice")));
        }
        let expected = key
            .get(qid)
            .ok_or_else(|| AppError::Validation(format!("Unknown question {qid}")))?;
        let chosen = usize::try_from(answer)
            .ok()
            .filter(|a| *a < 4)
            .ok_or_else(|| AppError::Validation("Please answer all questions".to_string()))?;
        if chosen == *expected {
            correct += 1;
        }
    }

    let total = question_ids.len();
    Ok(QuizGrade {
        correct,
        total,
        score: correct as f64 / total as f64 * 100.0,
        passed: correct * 100 >= total * PASS_THRESHOLD_PERCENT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> HashMap<u32, usize> {
        // the default bank: 1→1, 2→0, 3→0, 4→2, 5→0
        HashMap::from([(1, 1), (2, 0), (3, 0), (4, 2), (5, 0)])
    }

    #[test]
    fn test_all_correct_passes() {
        let g = grade_quiz(&key(), &[1, 2, 3, 4, 5], &[1, 0, 0, 2, 0]).unwrap();
        assert_eq!(g.correct, 5);
        assert!((g.score - 100.0).abs() < f64::EPSILON);
        assert!(g.passed);
    }

    #[test]
    fn test_four_of_five_passes_exactly_at_threshold() {
        let g = grade_quiz(&key(), &[1, 2, 3, 4, 5], &[1, 0, 0, 2, 3]).unwrap();
        assert_eq!(g.correct, 4);
        assert!((g.score - 80.0).abs() < 1e-9);
        assert!(g.passed);
    }

    #[test]
    fn test_three_of_five_fails() {
        let g = grade_quiz(&key(), &[1, 2, 3, 4, 5], &[1, 0, 0, 0, 3]).unwrap();
        assert_eq!(g.correct, 3);
        assert!(!g.passed);
    }

    #[test]
    fn test_order_of_questions_does_not_matter() {
        let g = grade_quiz(&key(), &[5, 4, 3], &[0, 2, 0]).unwrap();
        assert_eq!(g.correct, 3);
        assert!(g.passed);
    }

    #[test]
    fn test_empty_submission_rejected() {
        assert!(matches!(
            grade_quiz(&key(), &[], &[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(grade_quiz(&key(), &[1, 2], &[1]).is_err());
    }

    #[test]
    fn test_unanswered_rejected() {
        let err = grade_quiz(&key(), &[1, 2], &[1, -1]).unwrap_err();
        assert!(err.to_string().contains("answer all"));
    }

    #[test]
    fn test_out_of_range_option_rejected() {
        assert!(grade_quiz(&key(), &[1], &[4]).is_err());
    }

    #[test]
    fn test_duplicate_question_rejected() {
        assert!(grade_quiz(&key(), &[1, 1], &[1, 1]).is_err());
    }

    #[test]
    fn test_unknown_question_rejected() {
        assert!(grade_quiz(&key(), &[1, 99], &[1, 0]).is_err());
    }

    #[test]
    fn test_terminal_completion_grade() {
        let g = QuizGrade::terminal_completed();
        assert!(g.passed);
        assert!((g.score - 100.0).abs() < f64::EPSILON);
    }
}
