//! Domain layer: entities, storage contracts, and the click pipeline.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod user_agent;
