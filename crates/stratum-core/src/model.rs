//! Core message models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stratum_api::model::StatusMessage;

/// Payload published on the broker's notify channel. Whichever instance
/// holds the account's realtime connections delivers the status message.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNotice {
    pub account_id: Uuid,
    pub status: StatusMessage,
}
