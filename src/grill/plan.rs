//! Cook plans
//!
//! A plan is a sequence of optional stages (preheat or cold smoke, smoke,
//! hold) with per-stage temperatures and durations. The controller receives
//! it as camelCase JSON on `grill/plans/save` or `grill/plans/start`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("plan name must not be empty")]
    EmptyName,
    #[error("plan must enable at least one stage")]
    NoStages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preheat,
    ColdSmoke,
    Smoke,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stages {
    pub preheat: bool,
    pub cold_smoke: bool,
    pub smoke: bool,
    pub hold: bool,
}

impl Default for Stages {
    fn default() -> Self {
        Self {
            preheat: false,
            cold_smoke: false,
            smoke: true,
            hold: false,
        }
    }
}

impl Stages {
    /// Flips `stage`. Preheat and cold smoke exclude each other, so enabling
    /// one disables the other.
    pub fn toggle(&mut self, stage: Stage) {
        match stage {
            Stage::Preheat if !self.preheat => {
                self.preheat = true;
                self.cold_smoke = false;
            }
            Stage::ColdSmoke if !self.cold_smoke => {
                self.cold_smoke = true;
                self.preheat = false;
            }
            Stage::Preheat => self.preheat = false,
            Stage::ColdSmoke => self.cold_smoke = false,
            Stage::Smoke => self.smoke = !self.smoke,
            Stage::Hold => self.hold = !self.hold,
        }
    }

    pub fn any(&self) -> bool {
        self.preheat || self.cold_smoke || self.smoke || self.hold
    }
}

/// Temperatures in degrees, timeouts in minutes, durations in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSettings {
    pub preheat_temp: u32,
    pub preheat_timeout: u32,
    pub cold_smoke_grill: u32,
    pub cold_smoke_probe: u32,
    pub cold_smoke_duration: u32,
    pub smoke_grill: u32,
    pub smoke_probe: u32,
    pub smoke_duration: u32,
    pub hold_grill: u32,
    pub hold_probe: u32,
    pub hold_duration: u32,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            preheat_temp: 225,
            preheat_timeout: 30,
            cold_smoke_grill: 180,
            cold_smoke_probe: 110,
            cold_smoke_duration: 2,
            smoke_grill: 225,
            smoke_probe: 165,
            smoke_duration: 4,
            hold_grill: 160,
            hold_probe: 190,
            hold_duration: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookPlan {
    pub name: String,
    pub description: String,
    pub stages: Stages,
    pub settings: StageSettings,
    pub created_at: DateTime<Utc>,
}

impl CookPlan {
    /// New plan with default stages and settings, stamped with the current time.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            stages: Stages::default(),
            settings: StageSettings::default(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::EmptyName);
        }
        if !self.stages.any() {
            return Err(PlanError::NoStages);
        }
        Ok(())
    }
}
