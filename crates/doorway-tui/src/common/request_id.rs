use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Tracks the single login request whose result may still be applied.
///
/// Starting a request supersedes any earlier one; a result is accepted only
/// through [`LatestOnly::finish_if_active`] with the id it was started under.
#[derive(Debug, Default)]
pub struct LatestOnly {
    next: u64,
    active: Option<RequestId>,
    cancel: Option<CancellationToken>,
}

impl LatestOnly {
    pub fn begin(&mut self) -> (RequestId, CancellationToken) {
        if let Some(previous) = self.cancel.take() {
            previous.cancel();
        }
        let id = RequestId(self.next);
        self.next = self.next.wrapping_add(1);
        let cancel = CancellationToken::new();
        self.active = Some(id);
        self.cancel = Some(cancel.clone());
        (id, cancel)
    }

    pub fn is_active(&self, id: RequestId) -> bool {
        self.active == Some(id)
    }

    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        let ok = self.is_active(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Abandons the active request, handing back its token for the runtime
    /// to cancel.
    pub fn cancel(&mut self) -> Option<CancellationToken> {
        self.active = None;
        self.cancel.take()
    }
}
