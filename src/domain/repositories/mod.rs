//! Repository traits defining the storage contract.
//!
//! Services depend on these traits, never on concrete database types; the
//! PostgreSQL implementations live in
//! [`crate::infrastructure::persistence`]. Under `cfg(test)` each trait also
//! exposes a mockall automock.

mod link_repository;
mod stats_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
