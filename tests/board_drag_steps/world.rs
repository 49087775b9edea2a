//! Shared world state for board drag-and-drop scenarios.

use std::sync::Arc;

use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{adapters::memory::InMemoryBoardStore, domain::OwnerId, services::CallerContext},
    client::{BoardController, InProcessBoardClient, ReleaseOutcome},
    rpc::{RpcRouter, TaskView},
};
use uuid::Uuid;

/// Router type used by the world.
pub type TestRouter = RpcRouter<InMemoryBoardStore, DefaultClock>;

/// Controller type used by the world.
pub type TestController = BoardController<InProcessBoardClient<InMemoryBoardStore, DefaultClock>>;

/// Scenario world: one server, one signed-in user and their board view.
pub struct BoardWorld {
    pub router: Arc<TestRouter>,
    pub caller: CallerContext,
    pub controller: TestController,
    pub last_release: Option<ReleaseOutcome>,
}

impl BoardWorld {
    /// Creates a world with an empty store.
    #[must_use]
    pub fn new() -> Self {
        let router = Arc::new(RpcRouter::new(
            Arc::new(InMemoryBoardStore::new()),
            Arc::new(DefaultClock),
        ));
        let caller = CallerContext::new(OwnerId::from_uuid(Uuid::new_v4()));
        let controller = BoardController::new(InProcessBoardClient::new(Arc::clone(&router), caller));
        Self {
            router,
            caller,
            controller,
            last_release: None,
        }
    }

    /// Finds a card on the displayed board by title.
    pub fn card(&self, title: &str) -> Result<&TaskView, eyre::Report> {
        self.controller
            .tasks()
            .iter()
            .find(|task| task.title == title)
            .ok_or_else(|| eyre!("no card titled {title:?} on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
