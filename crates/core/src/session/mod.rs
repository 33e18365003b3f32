//! Session module - the view controller that owns the document.

mod view_controller;

pub use view_controller::{LoginOutcome, Screen, ViewController};
