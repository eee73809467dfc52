mod state_init;

pub use state_init::*;
