mod health_check;
mod home;
mod refresh;
mod submissions;
mod trend_summary;

pub use {health_check::*, home::*, refresh::*, submissions::*, trend_summary::*};
