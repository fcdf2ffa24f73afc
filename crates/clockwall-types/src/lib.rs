//! Shared type definitions for the Clockwall multi-clock core.
//!
//! This crate holds the data that crosses the boundary between the clock
//! core and its rendering collaborators. Types flow downstream to
//! `TypeScript` via `ts-rs` for the browser side.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for clock identities
//! - [`enums`] -- Clock kind, edit mode and cycle, time format, meridiem
//! - [`structs`] -- Wall-clock time triple and the clock snapshot
//! - [`timezone`] -- The fixed table of selectable time zones

pub mod enums;
pub mod ids;
pub mod structs;
pub mod timezone;

// Re-export all public types at crate root for convenience.
pub use enums::{ClockKind, EditCycle, EditMode, Meridiem, TimeFormat};
pub use ids::ClockId;
pub use structs::{
    ClockSnapshot, HOURS_PER_DAY, MINUTES_PER_HOUR, SECONDS_PER_MINUTE, WallTime,
};
pub use timezone::{
    TIME_ZONE_COUNT, TIME_ZONES, TimeZone, label_for_offset, offset_for_label, time_zones,
};

#[cfg(test)]
mod tests {
    //! Binding generation for the rendering collaborator.

    #[test]
    fn export_bindings() {
        // ts-rs writes the TypeScript definitions to `bindings/` relative
        // to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::ClockId::export_all();
        let _ = crate::enums::ClockKind::export_all();
        let _ = crate::enums::EditMode::export_all();
        let _ = crate::enums::EditCycle::export_all();
        let _ = crate::enums::TimeFormat::export_all();
        let _ = crate::enums::Meridiem::export_all();
        let _ = crate::structs::WallTime::export_all();
        let _ = crate::structs::ClockSnapshot::export_all();
    }
}
