//! Subscription entity - a user following a channel

use chrono::{DateTime, Utc};

use crate::value_objects::{SubscriptionId, UserId};

/// Relation between a subscriber and the channel (another user) they follow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub subscriber_id: UserId,
    pub channel_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(subscriber_id: UserId, channel_id: UserId) -> Self {
        Self {
            id: SubscriptionId::generate(),
            subscriber_id,
            channel_id,
            created_at: Utc::now(),
        }
    }
}
