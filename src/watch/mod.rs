//! Background watchdogs and their polling supervisor.

pub mod cross;
pub mod supervisor;
pub mod symbol;

pub use cross::{
    waypoint_bit, BridgeWatchdog, JungleWatchdog, PowerCondition, PowerWatchdog, DOT_INTERSECTION,
    NODE_DOT,
};
pub use supervisor::{spawn_watchdog, CancelToken, Tick, Watchdog, WatchdogHandle, WatchdogPool};
pub use symbol::{SymbolWatchdog, REJECT_NODE};
