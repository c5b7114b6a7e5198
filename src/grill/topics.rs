// Topic names served by the controller's flow

pub const TEMP: &str = "grill/temp";
pub const TARGET: &str = "grill/target";
pub const FAN: &str = "grill/fan";
pub const LID_STATUS: &str = "grill/status/lid";
pub const HOPPER_STATUS: &str = "grill/status/hopper";
pub const ASH_STATUS: &str = "grill/status/ash";
pub const POWER: &str = "grill/power";

pub const COMMAND: &str = "grill/command";
pub const GET_STATUS: &str = "getStatus";

pub const PLANS_SAVE: &str = "grill/plans/save";
pub const PLANS_START: &str = "grill/plans/start";

pub const HISTORY_REQUEST: &str = "grill/history/request";
pub const HISTORY_DATA: &str = "grill/history/data";

pub const SYSTEM_INFO: &str = "grill/system/info";
pub const SYSTEM_INFO_REQUEST: &str = "grill/system/info/request";
pub const SYSTEM_RESET: &str = "grill/system/reset";

pub const SETTINGS_UPDATE: &str = "grill/settings/update";

/// Topics the dashboard listens to for live state.
pub const TELEMETRY: [&str; 7] = [
    TEMP,
    TARGET,
    FAN,
    LID_STATUS,
    HOPPER_STATUS,
    ASH_STATUS,
    POWER,
];
