//! Task spawning abstraction for runtime independence.
//!
//! The coordinator's icon swap and the cast status forwarder are
//! fire-and-forget background work. The [`TaskSpawner`] trait lets that
//! work run on whatever runtime hosts the library, without the services
//! naming Tokio directly.

use std::future::Future;

/// Abstraction for spawning background tasks.
///
/// Allows core services to spawn asynchronous work without knowing the
/// underlying runtime. The spawner does not provide a way to cancel or
/// join the spawned task; completion effects (clearing the reentrancy
/// guard, publishing status) happen inside the task itself.
pub trait TaskSpawner: Send + Sync {
    /// Spawns a future as a background task.
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Spawner backed by the Tokio runtime the shell embeds the library in.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: tokio::runtime::Handle,
}

impl TokioSpawner {
    /// Captures the current runtime's handle.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    #[must_use]
    pub fn current() -> Self {
        Self {
            handle: tokio::runtime::Handle::current(),
        }
    }
}

impl TaskSpawner for TokioSpawner {
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(future);
    }
}
