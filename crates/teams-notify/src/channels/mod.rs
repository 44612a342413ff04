//! Delivery channels for rendered alert cards.

pub mod teams;

use async_trait::async_trait;

use crate::card::MessageCard;
use crate::error::ChannelError;

/// Trait for alert delivery channels.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Check if this channel is enabled/configured.
    fn enabled(&self) -> bool;

    /// Deliver a rendered card to this channel.
    async fn send(&self, card: &MessageCard) -> Result<(), ChannelError>;
}
