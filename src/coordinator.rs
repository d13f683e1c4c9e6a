//! Tracks the single in-flight generation of a session.
//!
//! Each accepted trigger starts a new epoch. A response is applied only if it
//! carries the current epoch and the coordinator has not been closed, so a
//! reply that arrives after the view went away is dropped on the floor.

use log::{debug, info};

use crate::generator::{GenerationFailed, GenerationParameters};
use crate::quiz::{QuestionSet, QuizRun};

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Pending,
    Ready(QuizRun),
    Failed(GenerationFailed),
}

/// Handed out when a generation is accepted; the caller fetches with the
/// parameters and reports back with the epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub epoch: u64,
    pub params: GenerationParameters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationCoordinator {
    epoch: u64,
    status: Status,
    closed: bool,
}

impl Default for GenerationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationCoordinator {
    pub fn new() -> Self {
        Self {
            epoch: 0,
            status: Status::Idle,
            closed: false,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, Status::Pending)
    }

    /// The trigger is disabled while a generation is pending or after teardown.
    pub fn trigger_enabled(&self) -> bool {
        !self.closed && !self.is_pending()
    }

    /// Starts a generation, discarding the previous question set and answers.
    /// Returns `None` (nothing queued) while another generation is pending.
    pub fn begin(&mut self, params: GenerationParameters) -> Option<Ticket> {
        if !self.trigger_enabled() {
            debug!("generation already pending, trigger ignored");
            return None;
        }
        self.epoch += 1;
        self.status = Status::Pending;
        info!("generation {} started", self.epoch);
        Some(Ticket {
            epoch: self.epoch,
            params,
        })
    }

    pub fn complete(
        &mut self,
        epoch: u64,
        result: Result<QuestionSet, GenerationFailed>,
    ) -> Completion {
        if self.closed || epoch != self.epoch || !self.is_pending() {
            debug!("discarding generation {} (current {})", epoch, self.epoch);
            return Completion::Stale;
        }
        self.status = match result {
            Ok(set) => {
                info!("generation {} ready with {} question(s)", epoch, set.questions.len());
                Status::Ready(QuizRun::new(set))
            }
            Err(e) => {
                info!("generation {} failed: {}", epoch, e);
                Status::Failed(e)
            }
        };
        Completion::Applied
    }

    pub fn run(&self) -> Option<&QuizRun> {
        match &self.status {
            Status::Ready(run) => Some(run),
            _ => None,
        }
    }

    pub fn run_mut(&mut self) -> Option<&mut QuizRun> {
        match &mut self.status {
            Status::Ready(run) => Some(run),
            _ => None,
        }
    }

    /// Teardown: whatever is still in flight will be discarded.
    pub fn close(&mut self) {
        self.closed = true;
        self.epoch += 1;
        self.status = Status::Idle;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Explanation, Question, QuizOption};

    fn one_question() -> QuestionSet {
        QuestionSet::new(
            None,
            vec![Question::new(
                "q".to_string(),
                vec![QuizOption::new("A", "a")],
                "A".to_string(),
                Explanation::Shared(String::new()),
            )],
        )
    }

    #[test]
    fn second_trigger_while_pending_is_ignored() {
        let mut c = GenerationCoordinator::new();
        let first = c.begin(GenerationParameters::new()).unwrap();
        assert!(!c.trigger_enabled());
        assert_eq!(c.begin(GenerationParameters::new()), None);
        assert_eq!(c.epoch(), first.epoch);
    }

    #[test]
    fn success_and_failure_reenable_trigger() {
        let mut c = GenerationCoordinator::new();
        let t = c.begin(GenerationParameters::new()).unwrap();
        assert_eq!(c.complete(t.epoch, Ok(one_question())), Completion::Applied);
        assert!(c.run().is_some());
        assert!(c.trigger_enabled());

        let t = c.begin(GenerationParameters::new()).unwrap();
        assert!(c.run().is_none(), "previous run is dropped on trigger");
        let failed = GenerationFailed::new(Some("rate limited".to_string()));
        assert_eq!(c.complete(t.epoch, Err(failed.clone())), Completion::Applied);
        assert_eq!(c.status(), &Status::Failed(failed));
        assert!(c.trigger_enabled());
    }

    #[test]
    fn responses_after_close_are_discarded() {
        let mut c = GenerationCoordinator::new();
        let t = c.begin(GenerationParameters::new()).unwrap();
        c.close();
        assert_eq!(c.complete(t.epoch, Ok(one_question())), Completion::Stale);
        assert_eq!(c.status(), &Status::Idle);
        assert_eq!(c.begin(GenerationParameters::new()), None);
    }

    #[test]
    fn old_epoch_is_stale() {
        let mut c = GenerationCoordinator::new();
        let t = c.begin(GenerationParameters::new()).unwrap();
        assert_eq!(c.complete(t.epoch + 1, Ok(one_question())), Completion::Stale);
        assert!(c.is_pending());
        assert_eq!(c.complete(t.epoch, Ok(one_question())), Completion::Applied);
        assert_eq!(c.complete(t.epoch, Ok(one_question())), Completion::Stale);
    }
}
