//! One module per composite-score component. Every `calculate` returns a
//! value in [0.0, 1.0] and never fails: missing inputs yield the component's
//! documented neutral default.

pub mod aesthetics;
pub mod content;
pub mod density;
pub mod holiday;
pub mod liveliness;
pub mod location;
pub mod novelty;
pub mod people;
pub mod poi;
pub mod quality;
pub mod recency;
pub mod temporal;
