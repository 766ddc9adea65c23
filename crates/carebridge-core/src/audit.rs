//! Fixed audit-reason strings recorded against persistence operations that
//! originate from the interop layer.

/// Reason recorded when an observation is created through the interop API.
pub const CREATED_VIA_INTEROP: &str = "Created via CareBridge interop API";

/// Reason recorded when an observation is updated through the interop API.
pub const UPDATED_VIA_INTEROP: &str = "Updated via CareBridge interop API";

/// Reason recorded when an observation is voided through the interop API.
pub const VOIDED_VIA_INTEROP: &str = "Voided via CareBridge interop API";
