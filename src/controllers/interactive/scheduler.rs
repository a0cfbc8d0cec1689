/// Keeps at most one render in flight. Requests arriving while one is
/// running replace each other in a single pending slot and go out once the
/// in-flight generation completes.
pub struct RenderScheduler<T> {
    pending_request: Option<T>,
    in_flight_generation: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerAction {
    Submitted { generation: u64 },
    Coalesced,
    NothingToDo,
}

impl<T> RenderScheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending_request: None,
            in_flight_generation: None,
        }
    }

    pub fn update(
        &mut self,
        desired: T,
        last_completed_gen: u64,
        submit: impl FnOnce(T) -> u64,
    ) -> SchedulerAction {
        self.mark_completed(last_completed_gen);
        self.pending_request = Some(desired);

        if self.in_flight_generation.is_none() {
            return self.submit_pending(submit);
        }

        SchedulerAction::Coalesced
    }

    /// Sends the pending request if the previous one has completed.
    pub fn flush(&mut self, last_completed_gen: u64, submit: impl FnOnce(T) -> u64) -> SchedulerAction {
        self.mark_completed(last_completed_gen);

        if self.in_flight_generation.is_some() {
            return if self.has_pending() {
                SchedulerAction::Coalesced
            } else {
                SchedulerAction::NothingToDo
            };
        }

        self.submit_pending(submit)
    }

    /// Removes the pending request without submitting it.
    pub fn take_pending(&mut self) -> Option<T> {
        self.pending_request.take()
    }

    pub fn pending_mut(&mut self) -> Option<&mut T> {
        self.pending_request.as_mut()
    }

    pub fn observe_completion(&mut self, last_completed_gen: u64) {
        self.mark_completed(last_completed_gen);
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_request.is_some()
    }

    #[must_use]
    pub fn in_flight_generation(&self) -> Option<u64> {
        self.in_flight_generation
    }

    fn mark_completed(&mut self, last_completed_gen: u64) {
        if self
            .in_flight_generation
            .is_some_and(|generation| last_completed_gen >= generation)
        {
            self.in_flight_generation = None;
        }
    }

    fn submit_pending(&mut self, submit: impl FnOnce(T) -> u64) -> SchedulerAction {
        let Some(request) = self.pending_request.take() else {
            return SchedulerAction::NothingToDo;
        };

        let generation = submit(request);
        self.in_flight_generation = Some(generation);

        SchedulerAction::Submitted { generation }
    }
}

impl<T> Default for RenderScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
