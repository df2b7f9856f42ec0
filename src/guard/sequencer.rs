use tokio::sync::watch;

/// Hands out one ticket per navigation; the newest ticket wins.
///
/// Starting a navigation bumps a generation counter. Older tickets observe
/// the bump and give up, so a transition stuck waiting for the identity SDK
/// never outlives the one that replaced it.
pub struct NavigationSequencer {
    latest: watch::Sender<u64>,
}

impl NavigationSequencer {
    pub fn new() -> Self {
        let (latest, _receiver) = watch::channel(0);
        Self { latest }
    }

    pub fn begin(&self) -> NavigationTicket {
        let mut id = 0;
        self.latest.send_modify(|generation| {
            *generation += 1;
            id = *generation;
        });
        NavigationTicket {
            id,
            latest: self.latest.subscribe(),
        }
    }
}

impl Default for NavigationSequencer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct NavigationTicket {
    id: u64,
    latest: watch::Receiver<u64>,
}

impl NavigationTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        *self.latest.borrow() == self.id
    }

    /// Resolves once a newer navigation has started.
    pub async fn superseded(&mut self) {
        loop {
            if *self.latest.borrow_and_update() != self.id {
                return;
            }
            if self.latest.changed().await.is_err() {
                // sequencer dropped: nothing can supersede us any more
                std::future::pending::<()>().await;
            }
        }
    }
}
