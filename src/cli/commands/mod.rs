//! Command definitions grouped by concern.

mod export;
mod schedule;
mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in schedule::definitions()
        .into_iter()
        .chain(export::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
