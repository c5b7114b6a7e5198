use serde_json::{Map, Value};
use tracing::info;

use crate::client::PubSubClient;
use crate::grill::plan::CookPlan;
use crate::grill::topics;
use crate::utils::Result;

/// Typed publishers for the controller's command topics.
///
/// Like [`PubSubClient::publish`], every call is a silent no-op while
/// disconnected.
#[derive(Debug, Clone, Copy)]
pub struct GrillCommands<'a> {
    client: &'a PubSubClient,
}

impl<'a> GrillCommands<'a> {
    pub fn new(client: &'a PubSubClient) -> Self {
        Self { client }
    }

    /// Asks the controller to push its current state on every telemetry topic.
    pub fn request_status(&self) {
        self.client.publish(topics::COMMAND, topics::GET_STATUS);
    }

    pub fn set_power(&self, on: bool) {
        self.client
            .publish(topics::POWER, if on { "true" } else { "false" });
    }

    /// Target grill temperature, in the controller's configured unit.
    pub fn set_target(&self, degrees: u32) {
        self.client.publish(topics::TARGET, &degrees.to_string());
    }

    pub fn request_history(&self) {
        self.client.publish(topics::HISTORY_REQUEST, "all");
    }

    pub fn request_system_info(&self) {
        self.client.publish(topics::SYSTEM_INFO_REQUEST, "true");
    }

    /// Resets the controller. Stops any active cook.
    pub fn reset_system(&self) {
        info!("requesting controller reset");
        self.client.publish(topics::SYSTEM_RESET, "true");
    }

    /// Publishes `{key: value}` on the settings topic.
    pub fn update_setting(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut update = Map::new();
        update.insert(key.to_string(), value.into());
        let payload = serde_json::to_string(&Value::Object(update))?;
        self.client.publish(topics::SETTINGS_UPDATE, &payload);
        Ok(())
    }

    pub fn save_plan(&self, plan: &CookPlan) -> Result<()> {
        let payload = serde_json::to_string(plan)?;
        self.client.publish(topics::PLANS_SAVE, &payload);
        Ok(())
    }

    pub fn start_plan(&self, plan: &CookPlan) -> Result<()> {
        let payload = serde_json::to_string(plan)?;
        self.client.publish(topics::PLANS_START, &payload);
        Ok(())
    }
}
