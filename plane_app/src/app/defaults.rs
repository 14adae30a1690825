//! # Default values
//!
//! Used as initial values of the driver.

use std::time::Duration;

/// Rows of the text histogram, bins are merged to fit
pub const HISTOGRAM_ROWS: usize = 20;
/// Width of the longest histogram bar
pub const HISTOGRAM_WIDTH: usize = 50;

/// How long to wait for late editor events before exiting
pub const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

pub const PROMPT_HELP: &str = "\
commands:
  x <v> | y <v>        rotation slider readings, <-1;1>
  t <v>                translation along the normal
  side above|below     visible half-space
  color <#rrggbb>      plane color
  indicator on|off     plane indicator visibility
  load <path>          load .dat volume
  iso <value> <alpha>  move live iso layer
  save <#rrggbb>       commit live iso layer
  delete               remove last iso layer
  layers               print iso layers
  flush                apply pending changes now
  reset                orientation back to identity
  help                 this text
  quit";
