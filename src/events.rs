//! Application event bus.
//!
//! Mutations publish the rows they create; GraphQL subscriptions read them
//! back as streams. Both event kinds share one [`EventBroadcaster`], keyed
//! by [`Topic`].

use tokio_stream::{Stream, StreamExt};

use crate::database::entities::{links, votes};
use crate::utils::EventBroadcaster;

/// Events buffered per topic before a slow subscriber starts losing them
pub const EVENT_BUFFER_SIZE: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    NewLink,
    NewVote,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HackernewsEvent {
    NewLink(links::Model),
    NewVote(votes::Model),
}

impl HackernewsEvent {
    pub fn topic(&self) -> Topic {
        match self {
            HackernewsEvent::NewLink(_) => Topic::NewLink,
            HackernewsEvent::NewVote(_) => Topic::NewVote,
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    broadcaster: EventBroadcaster<Topic, HackernewsEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_BUFFER_SIZE)
    }
}

impl EventBus {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            broadcaster: EventBroadcaster::new(buffer_size),
        }
    }

    pub async fn publish(&self, event: HackernewsEvent) -> usize {
        let topic = event.topic();
        let delivered = self.broadcaster.publish(topic, event).await;
        tracing::debug!("Published {:?} to {} subscribers", topic, delivered);
        delivered
    }

    pub async fn publish_new_link(&self, link: links::Model) -> usize {
        self.publish(HackernewsEvent::NewLink(link)).await
    }

    pub async fn publish_new_vote(&self, vote: votes::Model) -> usize {
        self.publish(HackernewsEvent::NewVote(vote)).await
    }

    pub async fn new_links(&self) -> impl Stream<Item = links::Model> + Send + 'static {
        self.broadcaster
            .stream(Topic::NewLink)
            .await
            .filter_map(|event| match event {
                HackernewsEvent::NewLink(link) => Some(link),
                _ => None,
            })
    }

    pub async fn new_votes(&self) -> impl Stream<Item = votes::Model> + Send + 'static {
        self.broadcaster
            .stream(Topic::NewVote)
            .await
            .filter_map(|event| match event {
                HackernewsEvent::NewVote(vote) => Some(vote),
                _ => None,
            })
    }

    pub async fn subscriber_count(&self, topic: Topic) -> usize {
        self.broadcaster.receiver_count(&topic).await
    }
}
