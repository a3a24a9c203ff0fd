use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

/// Keyed pub/sub hub built on `tokio::sync::broadcast`.
///
/// One broadcast channel exists per key. Channels are created lazily by the
/// first subscriber or publisher and can be dropped again with
/// [`cleanup_idle`](Self::cleanup_idle) once nobody listens.
///
/// A subscriber that falls more than `buffer_size` events behind loses the
/// oldest events; publishers never wait on slow subscribers.
///
/// ```rust,no_run
/// use hackernews::utils::EventBroadcaster;
///
/// # async fn example() {
/// let broadcaster = EventBroadcaster::<&'static str, String>::new(64);
/// let mut receiver = broadcaster.subscribe("links").await;
///
/// broadcaster.publish("links", "posted".to_string()).await;
/// assert_eq!(receiver.recv().await.unwrap(), "posted");
/// # }
/// ```
pub struct EventBroadcaster<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    channels: Arc<RwLock<HashMap<K, broadcast::Sender<V>>>>,
    buffer_size: usize,
}

impl<K, V> EventBroadcaster<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            buffer_size,
        }
    }

    pub async fn subscribe(&self, key: K) -> broadcast::Receiver<V> {
        self.get_or_create(key).await.subscribe()
    }

    /// Send `event` to everyone subscribed to `key`.
    ///
    /// Returns how many receivers got it; zero when nobody is listening.
    pub async fn publish(&self, key: K, event: V) -> usize {
        let sender = self.get_or_create(key).await;
        sender.send(event).unwrap_or(0)
    }

    pub async fn receiver_count(&self, key: &K) -> usize {
        let channels = self.channels.read().await;
        channels
            .get(key)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drop channels without receivers. Returns how many were removed.
    pub async fn cleanup_idle(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        before - channels.len()
    }

    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }

    async fn get_or_create(&self, key: K) -> broadcast::Sender<V> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(&key) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;

        // Another task may have created it while we waited for the write lock
        channels
            .entry(key)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .clone()
    }
}

impl<K, V> EventBroadcaster<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + 'static,
{
    /// Subscribe to `key` as a stream.
    ///
    /// Lagging subscribers skip the events they missed and keep going.
    pub async fn stream(&self, key: K) -> impl Stream<Item = V> + Send + 'static {
        let receiver = self.subscribe(key.clone()).await;

        BroadcastStream::new(receiver).filter_map(move |item| match item {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!("Subscriber on {:?} lagged, skipped {} events", key, skipped);
                None
            }
        })
    }
}

impl<K, V> Clone for EventBroadcaster<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
            buffer_size: self.buffer_size,
        }
    }
}
