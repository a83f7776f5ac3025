// engine module: Jira backend engine

mod interface;
pub mod jira;
pub mod stub;

pub use interface::{Engine, EngineHandle, Event, Request};
pub use jira::JiraEngine;
pub use stub::StubEngine;
