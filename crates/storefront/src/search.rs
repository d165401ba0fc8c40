//! Product search: debounced input and client-side filtering.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use shopverse_core::Product;

/// Quiet period before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

type Action<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Runs an action only after calls have stopped for a quiet period.
///
/// Each [`call`](Self::call) aborts the pending one and restarts the
/// delay, so only the last value of a burst reaches the action. Must be
/// used inside a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Duration, action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            action: Arc::new(action),
            pending: Mutex::new(None),
        }
    }

    /// A debouncer with the search quiet period.
    #[must_use]
    pub fn for_search(action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(SEARCH_DEBOUNCE, action)
    }

    /// Schedule `value`, replacing whatever was pending.
    ///
    /// The lock is held across abort and spawn so concurrent callers
    /// cannot leave an older value as the surviving task.
    pub fn call(&self, value: T) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let deadline = Instant::now() + self.delay;
        let action = Arc::clone(&self.action);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            action(value);
        }));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }
}

/// Products whose name or description contains `term`, ignoring case.
/// A blank term matches everything.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    if term.trim().is_empty() {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.matches(term)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        (fired, move |term: String| sink.lock().unwrap().push(term))
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_of_burst_fires() {
        let (fired, action) = recorder();
        let debouncer = Debouncer::for_search(action);

        debouncer.call("l".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.call("la".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.call("lam".to_string());

        sleep(Duration::from_millis(299)).await;
        assert!(fired.lock().unwrap().is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["lam".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_fire() {
        let (fired, action) = recorder();
        let debouncer = Debouncer::for_search(action);

        debouncer.call("mug".to_string());
        sleep(Duration::from_millis(400)).await;
        debouncer.call("lamp".to_string());
        sleep(Duration::from_millis(400)).await;

        assert_eq!(
            *fired.lock().unwrap(),
            vec!["mug".to_string(), "lamp".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_stop_pending_call() {
        let (fired, action) = recorder();
        let debouncer = Debouncer::for_search(action);
        debouncer.call("mug".to_string());
        debouncer.cancel();
        sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());

        debouncer.call("lamp".to_string());
        drop(debouncer);
        sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_leave_one_pending_task() {
        let (fired, action) = recorder();
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(50), action));

        let callers: Vec<_> = (0..8)
            .map(|i| {
                let debouncer = Arc::clone(&debouncer);
                tokio::spawn(async move { debouncer.call(format!("term-{i}")) })
            })
            .collect();
        for caller in callers {
            caller.await.unwrap();
        }
        assert!(debouncer.pending.lock().unwrap().is_some());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    fn product(name: &str, description: &str) -> Product {
        Product {
            name: name.to_string(),
            description: description.to_string(),
            ..Product::default()
        }
    }

    #[test]
    fn test_filter_products() {
        let products = vec![
            product("Brass Lamp", "Hand polished"),
            product("Clay Mug", "Holds 350ml"),
            product("Rug", "Hand-knotted wool"),
        ];

        assert_eq!(filter_products(&products, "").len(), 3);
        assert_eq!(filter_products(&products, "   ").len(), 3);

        let names: Vec<_> = filter_products(&products, "LAMP")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Brass Lamp"]);

        let names: Vec<_> = filter_products(&products, "hand")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Brass Lamp", "Rug"]);

        assert!(filter_products(&products, "sofa").is_empty());
    }
}
