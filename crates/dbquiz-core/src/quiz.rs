//! The quiz runner.
//!
//! An attempt walks every question in storage order, asks an
//! [`AnswerSource`] for one answer each, awards [`POINTS_PER_QUESTION`] for
//! every exact label match, and records a single `Scores` row at the end.

use crate::error::Result;
use crate::model::{OptionLabel, Question, UserId};
use crate::storage::Storage;

/// Points awarded for one correct answer. Wrong or unreadable answers score 0.
pub const POINTS_PER_QUESTION: i64 = 10;

/// Where answers come from.
///
/// The terminal front end renders the question and reads a line; tests feed
/// a script. Returning `Ok(None)` means input has ended and the attempt
/// should be abandoned.
pub trait AnswerSource {
    fn answer(
        &mut self,
        question: &Question,
        position: usize,
        total: usize,
    ) -> std::io::Result<Option<String>>;
}

/// What happened when a user attempted the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// The question bank is empty; nothing was recorded.
    Unavailable,
    /// Input ended before the last question; nothing was recorded.
    Abandoned { answered: usize, total: usize },
    /// Every question was answered and one score row was written.
    Completed {
        score: i64,
        correct: usize,
        total: usize,
    },
}

/// Whether `answer` selects the correct option of `question`.
///
/// The comparison is case-insensitive but otherwise exact: `" a"` or `"a "`
/// is wrong even when A is the answer. Callers strip the line terminator.
pub fn is_correct(question: &Question, answer: &str) -> bool {
    answer
        .parse::<OptionLabel>()
        .is_ok_and(|label| label == question.correct)
}

/// Total points for a full set of answers, one per question, in order.
pub fn grade<S: AsRef<str>>(questions: &[Question], answers: &[S]) -> i64 {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| is_correct(q, a.as_ref()))
        .count() as i64
        * POINTS_PER_QUESTION
}

/// Run one attempt for `user_id`.
pub async fn attempt_quiz(
    storage: &mut Storage,
    user_id: UserId,
    answers: &mut dyn AnswerSource,
) -> Result<QuizOutcome> {
    let questions = storage.questions().await?;
    if questions.is_empty() {
        tracing::warn!(user_id = %user_id, "quiz attempted with an empty question bank");
        return Ok(QuizOutcome::Unavailable);
    }

    let total = questions.len();
    let mut given = Vec::with_capacity(total);

    for (i, question) in questions.iter().enumerate() {
        let Some(answer) = answers.answer(question, i + 1, total)? else {
            tracing::info!(user_id = %user_id, answered = i, total, "quiz abandoned");
            return Ok(QuizOutcome::Abandoned { answered: i, total });
        };
        given.push(answer);
    }

    let score = grade(&questions, &given);
    let correct = (score / POINTS_PER_QUESTION) as usize;
    storage.insert_score(user_id, score).await?;
    tracing::info!(user_id = %user_id, score, correct, total, "quiz completed");

    Ok(QuizOutcome::Completed {
        score,
        correct,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crate::accounts::register;
    use crate::seed::populate_questions;

    /// Replays a fixed list of answers, then reports end of input.
    struct ScriptedAnswers(VecDeque<String>);

    impl ScriptedAnswers {
        fn new<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
            Self(answers.into_iter().map(String::from).collect())
        }
    }

    impl AnswerSource for ScriptedAnswers {
        fn answer(&mut self, _: &Question, _: usize, _: usize) -> std::io::Result<Option<String>> {
            Ok(self.0.pop_front())
        }
    }

    async fn seeded() -> (Storage, UserId) {
        let mut storage = Storage::open_in_memory().await.unwrap();
        populate_questions(&mut storage).await.unwrap();
        let user = register(&mut storage, "alice", "pw").await.unwrap();
        (storage, user)
    }

    async fn run(storage: &mut Storage, user: UserId, answers: &[&str]) -> QuizOutcome {
        let mut source = ScriptedAnswers::new(answers.iter().copied());
        attempt_quiz(storage, user, &mut source).await.unwrap()
    }

    #[tokio::test]
    async fn all_correct_any_case_scores_fifty() {
        let (mut storage, user) = seeded().await;
        let outcome = run(&mut storage, user, &["a", "b", "a", "a", "b"]).await;
        assert_eq!(
            outcome,
            QuizOutcome::Completed {
                score: 50,
                correct: 5,
                total: 5
            }
        );
        let outcome = run(&mut storage, user, &["A", "B", "A", "A", "B"]).await;
        assert!(matches!(outcome, QuizOutcome::Completed { score: 50, .. }));
    }

    #[tokio::test]
    async fn garbage_scores_zero_and_is_still_recorded() {
        let (mut storage, user) = seeded().await;
        let outcome = run(&mut storage, user, &["x", "x", "x", "x", "x"]).await;
        assert!(matches!(outcome, QuizOutcome::Completed { score: 0, .. }));
        assert_eq!(storage.scores_for(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mixed_answers_score_forty() {
        let (mut storage, user) = seeded().await;
        let outcome = run(&mut storage, user, &["A", "b", "c", "A", "B"]).await;
        assert_eq!(
            outcome,
            QuizOutcome::Completed {
                score: 40,
                correct: 4,
                total: 5
            }
        );
    }

    #[tokio::test]
    async fn padded_answers_score_nothing() {
        let (mut storage, user) = seeded().await;
        // Key is A,B,A,A,B; only the bare "b" matches.
        let outcome = run(&mut storage, user, &[" a", "b ", "\ta", " A ", "b"]).await;
        assert_eq!(
            outcome,
            QuizOutcome::Completed {
                score: 10,
                correct: 1,
                total: 5
            }
        );
        let scores = storage.scores_for(user).await.unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 10);
    }

    #[tokio::test]
    async fn each_attempt_writes_exactly_one_row() {
        let (mut storage, user) = seeded().await;
        for _ in 0..3 {
            let before = storage.count_scores().await.unwrap();
            let outcome = run(&mut storage, user, &["b", "b", "b", "b", "b"]).await;
            let QuizOutcome::Completed { score, .. } = outcome else {
                panic!("expected a completed attempt, got {outcome:?}");
            };
            assert_eq!(score % POINTS_PER_QUESTION, 0);
            assert!((0..=50).contains(&score));
            assert_eq!(storage.count_scores().await.unwrap(), before + 1);
        }
    }

    #[tokio::test]
    async fn empty_bank_is_unavailable() {
        let mut storage = Storage::open_in_memory().await.unwrap();
        let user = register(&mut storage, "alice", "pw").await.unwrap();
        let outcome = run(&mut storage, user, &["a"]).await;
        assert_eq!(outcome, QuizOutcome::Unavailable);
        assert_eq!(storage.count_scores().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn running_out_of_input_abandons() {
        let (mut storage, user) = seeded().await;
        let outcome = run(&mut storage, user, &["a", "b"]).await;
        assert_eq!(
            outcome,
            QuizOutcome::Abandoned {
                answered: 2,
                total: 5
            }
        );
        assert_eq!(storage.count_scores().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn questions_arrive_in_storage_order() {
        struct Recorder(Vec<(usize, usize, String)>);
        impl AnswerSource for Recorder {
            fn answer(
                &mut self,
                question: &Question,
                position: usize,
                total: usize,
            ) -> std::io::Result<Option<String>> {
                self.0.push((position, total, question.text.clone()));
                Ok(Some(question.correct.to_string()))
            }
        }

        let (mut storage, user) = seeded().await;
        let mut recorder = Recorder(Vec::new());
        let outcome = attempt_quiz(&mut storage, user, &mut recorder).await.unwrap();
        assert!(matches!(outcome, QuizOutcome::Completed { score: 50, .. }));

        let expected: Vec<_> = crate::seed::DBMS_QUESTIONS.iter().map(|q| q.text).collect();
        let seen: Vec<_> = recorder.0.iter().map(|(_, _, t)| t.as_str()).collect();
        assert_eq!(seen, expected);
        assert_eq!(recorder.0[0].0, 1);
        assert_eq!(recorder.0[4], (5, 5, expected[4].to_string()));
    }

    #[test]
    fn grading_rules() {
        let q = Question {
            id: 1,
            text: "q".into(),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            correct: OptionLabel::B,
        };
        assert!(is_correct(&q, "B"));
        assert!(is_correct(&q, "b"));
        assert!(!is_correct(&q, " b"));
        assert!(!is_correct(&q, "b\n"));
        assert!(!is_correct(&q, "A"));
        assert!(!is_correct(&q, "BB"));
        assert!(!is_correct(&q, ""));

        let questions = vec![q.clone(), q.clone(), q];
        assert_eq!(grade(&questions, &["b", "x", "B"]), 20);
        assert_eq!(grade(&questions, &["a", "c", "d"]), 0);
    }
}
